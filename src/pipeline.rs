use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::dictionary::Dictionary;
use crate::models::options::DEFAULT_CONFIG;

/// Converts a single line of text. Implementations may keep internal state,
/// but callers treat every call as independent.
pub trait Pipeline {
    fn convert(&self, line: &str) -> String;
}

/// Builds a [`Pipeline`] from a configuration reference.
pub trait PipelineBuilder {
    type Pipeline: Pipeline;

    fn build(&self, config: &str) -> Result<Self::Pipeline, ConfigError>;
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{}: cannot read configuration: {source}", path.display())]
    Unreadable { path: PathBuf, source: io::Error },

    #[error("{}: malformed dictionary: {source}", path.display())]
    Malformed { path: PathBuf, source: csv::Error },

    #[error("{}: entry {key:?} has no conversion candidates", path.display())]
    EmptyCandidates { path: PathBuf, key: String },
}

/// Passes every line through untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl Pipeline for Identity {
    fn convert(&self, line: &str) -> String {
        line.to_string()
    }
}

/// Builds [`Identity`] regardless of the configuration reference.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityBuilder;

impl PipelineBuilder for IdentityBuilder {
    type Pipeline = Identity;

    fn build(&self, _config: &str) -> Result<Identity, ConfigError> {
        Ok(Identity)
    }
}

/// Builds dictionary pipelines: [`DEFAULT_CONFIG`] selects the bundled
/// Simplified to Traditional table, anything else is read as a dictionary file.
#[derive(Debug, Default, Clone, Copy)]
pub struct DictionaryBuilder;

impl PipelineBuilder for DictionaryBuilder {
    type Pipeline = Dictionary;

    fn build(&self, config: &str) -> Result<Dictionary, ConfigError> {
        if config == DEFAULT_CONFIG {
            debug!("using built-in dictionary");
            return Dictionary::builtin();
        }

        debug!("loading dictionary from {}", config);
        Dictionary::load(config)
    }
}
