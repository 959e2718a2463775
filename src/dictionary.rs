use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use csv::Trim;
use serde::Deserialize;
use tracing::{debug, info};

use crate::pipeline::{ConfigError, Pipeline};

const BUILTIN_S2T: &str = include_str!("../data/s2t.txt");
const BUILTIN_NAME: &str = "<built-in s2t>";

#[derive(Deserialize, Debug)]
struct DictEntry {
    key: String,
    candidates: String,
}

/// Phrase table applied by greedy longest-prefix matching.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Dictionary {
    entries: HashMap<String, String>,
    // longest key, in chars
    max_key_len: usize,
}

impl Dictionary {
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_reader(BUILTIN_S2T.as_bytes(), Path::new(BUILTIN_NAME))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(file, path)
    }

    /// Reads `key<TAB>candidate [candidate...]` lines. Blank lines and lines
    /// starting with `#` are skipped; the first candidate of each entry wins.
    pub fn from_reader<R: io::Read>(input: R, origin: &Path) -> Result<Self, ConfigError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .comment(Some(b'#'))
            .trim(Trim::All)
            .from_reader(input);

        let mut dict = Dictionary::default();

        for result in rdr.deserialize::<DictEntry>() {
            let entry = result.map_err(|source| malformed(origin, source))?;
            if entry.key.is_empty() {
                debug!("skipping entry with empty key in {}", origin.display());
                continue;
            }

            let value = match entry.candidates.split_whitespace().next() {
                Some(val) => val.to_string(),
                None => {
                    return Err(ConfigError::EmptyCandidates {
                        path: origin.to_path_buf(),
                        key: entry.key,
                    })
                }
            };

            dict.insert(entry.key, value);
        }

        info!("loaded {} entries from {}", dict.len(), origin.display());
        Ok(dict)
    }

    pub fn insert(&mut self, key: String, value: String) {
        self.max_key_len = self.max_key_len.max(key.chars().count());
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest key that prefixes `text`, as (byte length, replacement).
    fn longest_match(&self, text: &str) -> Option<(usize, &str)> {
        let mut found = None;

        for (idx, ch) in text.char_indices().take(self.max_key_len) {
            let end = idx + ch.len_utf8();
            if let Some(value) = self.entries.get(&text[..end]) {
                found = Some((end, value.as_str()));
            }
        }

        found
    }
}

impl Pipeline for Dictionary {
    fn convert(&self, line: &str) -> String {
        let mut converted = String::with_capacity(line.len());
        let mut rest = line;

        while let Some(ch) = rest.chars().next() {
            match self.longest_match(rest) {
                Some((len, value)) => {
                    converted.push_str(value);
                    rest = &rest[len..];
                }
                None => {
                    converted.push(ch);
                    rest = &rest[ch.len_utf8()..];
                }
            }
        }

        converted
    }
}

fn malformed(origin: &Path, source: csv::Error) -> ConfigError {
    ConfigError::Malformed {
        path: PathBuf::from(origin),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(text: &str) -> Dictionary {
        Dictionary::from_reader(text.as_bytes(), Path::new("test")).expect("failed to load dictionary")
    }

    #[test]
    fn from_reader_skips_comments_and_blank_lines() {
        let d = dict("# header\n\n汉\t漢\n\n语\t語 语\n");

        assert_eq!(d.len(), 2);
        assert_eq!(d.convert("汉语"), "漢語");
    }

    #[test]
    fn from_reader_fails_on_missing_candidates() {
        let result = Dictionary::from_reader("汉\t \n".as_bytes(), Path::new("bad.txt"));

        match result {
            Err(ConfigError::EmptyCandidates { path, key }) => {
                assert_eq!(path, PathBuf::from("bad.txt"));
                assert_eq!(key, "汉");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn from_reader_fails_on_entry_without_tab() {
        let result = Dictionary::from_reader("汉漢\n".as_bytes(), Path::new("bad.txt"));

        assert!(matches!(result, Err(ConfigError::Malformed { .. })));
    }

    #[test]
    fn convert_prefers_longest_phrase() {
        let d = dict("头\t頭\n发\t發\n头发\t頭髮\n");

        assert_eq!(d.convert("头发"), "頭髮");
        assert_eq!(d.convert("发头"), "發頭");
    }

    #[test]
    fn convert_passes_unknown_text_through() {
        let d = dict("汉\t漢\n");

        assert_eq!(d.convert("abc 汉 ✓"), "abc 漢 ✓");
        assert_eq!(d.convert(""), "");
    }

    #[test]
    fn convert_with_empty_dictionary_is_identity() {
        let d = Dictionary::default();

        assert!(d.is_empty());
        assert_eq!(d.convert("简体中文"), "简体中文");
    }

    #[test]
    fn builtin_converts_common_text() {
        let d = Dictionary::builtin().expect("failed to load built-in dictionary");

        assert_eq!(d.convert("简体中文"), "簡體中文");
        assert_eq!(d.convert("理发以后头发干净"), "理髮以後頭髮乾淨");
        assert_eq!(d.convert("你好"), "你好");
    }
}
