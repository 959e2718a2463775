/// Static identity text shown by `--version` and `--help`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banner {
    pub program: &'static str,
    pub title: &'static str,
    pub version: &'static str,
    pub author: &'static str,
    pub bug_report: &'static str,
}

impl Banner {
    pub const DEFAULT: Banner = Banner {
        program: env!("CARGO_PKG_NAME"),
        title: "Chinese Text Conversion Command Line Tool",
        version: env!("CARGO_PKG_VERSION"),
        author: env!("CARGO_PKG_AUTHORS"),
        bug_report: env!("CARGO_PKG_REPOSITORY"),
    };

    /// Author and bug report lines are left out when the package metadata
    /// does not provide them. Cargo joins several authors with `:`.
    pub fn version_text(&self) -> String {
        let mut text = format!("\n{}\nVersion {}\n\n", self.title, self.version);
        if !self.author.is_empty() {
            text.push_str(&format!("Author: {}\n", self.author.replace(':', ", ")));
        }
        if !self.bug_report.is_empty() {
            text.push_str(&format!("Bug Report: {}\n", self.bug_report));
        }
        text.push('\n');
        text
    }

    pub fn usage_text(&self) -> String {
        format!(
            "{version}Usage:\n {program} [Options]\n\n\
             Options:\n \
             -i [file], --input=[file]   Read original text from [file].\n \
             -o [file], --output=[file]  Write converted text to [file].\n \
             -c [file], --config=[file]  Load configuration from [file].\n \
             -v, --version               Print version and build information.\n \
             -h, --help                  Print this help.\n\n\
             With no input file, reads standard input and writes converted stream to standard output.\n\
             Default configuration (simplified to traditional) will be loaded if not set.\n\n",
            version = self.version_text(),
            program = self.program
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANNER: Banner = Banner {
        program: "tool",
        title: "Tool",
        version: "9.9.9",
        author: "Someone <someone@example.com>",
        bug_report: "https://example.com/issues",
    };

    #[test]
    fn version_text_lists_identity() {
        let text = BANNER.version_text();

        assert!(text.contains("Version 9.9.9"));
        assert!(text.contains("Author: Someone <someone@example.com>"));
        assert!(text.contains("Bug Report: https://example.com/issues"));
    }

    #[test]
    fn version_text_skips_missing_metadata() {
        let banner = Banner {
            author: "",
            bug_report: "",
            ..BANNER
        };
        let text = banner.version_text();

        assert_eq!(text, "\nTool\nVersion 9.9.9\n\n\n");
        assert!(!text.contains("Author"));
        assert!(!text.contains("Bug Report"));
    }

    #[test]
    fn version_text_lists_every_author() {
        let banner = Banner {
            author: "A <a@example.com>:B <b@example.com>",
            ..BANNER
        };

        assert!(banner
            .version_text()
            .contains("Author: A <a@example.com>, B <b@example.com>\n"));
    }

    #[test]
    fn usage_text_starts_with_version_text() {
        let text = BANNER.usage_text();

        assert!(text.starts_with(&BANNER.version_text()));
        assert!(text.contains(" tool [Options]"));
        assert!(text.contains("--input=[file]"));
        assert!(text.contains("--config=[file]"));
    }
}
