use std::ffi::OsString;
use std::path::PathBuf;

use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use tracing::debug;

/// Configuration reference selecting the built-in Simplified to Traditional dictionary.
pub const DEFAULT_CONFIG: &str = "s2t";

/// Convert text line by line through a conversion dictionary
#[derive(Parser, Debug)]
#[command(disable_help_flag = true, disable_version_flag = true, args_override_self = true)]
struct Args {
    /// read original text from FILE instead of standard input
    #[arg(short, long, value_name = "FILE", allow_hyphen_values = true)]
    input: Option<PathBuf>,

    /// write converted text to FILE instead of standard output
    #[arg(short, long, value_name = "FILE", allow_hyphen_values = true)]
    output: Option<PathBuf>,

    /// load conversion configuration from FILE
    #[arg(short, long, value_name = "FILE", allow_hyphen_values = true)]
    config: Option<String>,

    /// print version and build information
    #[arg(short, long)]
    version: bool,

    /// print help
    #[arg(short, long)]
    help: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Convert,
    ShowVersion,
    ShowHelp,
}

/// Everything one invocation needs, fixed once the arguments are parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub config: String,
    pub action: Action,
}

impl OptionSet {
    /// Parses a full argument vector, program name first.
    ///
    /// Never fails: unknown flags, missing values and stray positionals all
    /// select [`Action::ShowHelp`], unless `--version` or `--help` came
    /// earlier on the command line. Between `--version` and `--help` the first
    /// one given wins. Value flags take the next argument even if it starts
    /// with `-`.
    pub fn parse_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

        let err = match Args::command().try_get_matches_from(args.clone()) {
            Ok(matches) => match Args::from_arg_matches(&matches) {
                Ok(parsed) => return Self::from_args(parsed, requested_action(&matches)),
                Err(err) => err,
            },
            Err(err) => err,
        };
        debug!("unusable arguments: {}", err.kind());

        // flags before the bad argument still count, the bad one itself asks for help
        let action = Args::command()
            .ignore_errors(true)
            .try_get_matches_from(args)
            .ok()
            .and_then(|matches| requested_action(&matches))
            .unwrap_or(Action::ShowHelp);

        Self::with_action(action)
    }

    fn with_action(action: Action) -> Self {
        Self {
            input: None,
            output: None,
            config: DEFAULT_CONFIG.to_string(),
            action,
        }
    }

    fn from_args(args: Args, requested: Option<Action>) -> Self {
        let config = match args.config {
            Some(config) if !config.is_empty() => config,
            _ => DEFAULT_CONFIG.to_string(),
        };

        Self {
            input: args.input,
            output: args.output,
            config,
            action: requested.unwrap_or(Action::Convert),
        }
    }
}

/// Position of a flag the user actually typed.
fn flag_index(matches: &ArgMatches, id: &str) -> Option<usize> {
    match matches.value_source(id) {
        Some(ValueSource::CommandLine) => matches.index_of(id),
        _ => None,
    }
}

/// `--version` or `--help`, whichever appears first.
fn requested_action(matches: &ArgMatches) -> Option<Action> {
    match (flag_index(matches, "version"), flag_index(matches, "help")) {
        (Some(version), Some(help)) if help < version => Some(Action::ShowHelp),
        (Some(_), _) => Some(Action::ShowVersion),
        (None, Some(_)) => Some(Action::ShowHelp),
        (None, None) => None,
    }
}
