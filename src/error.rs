use std::{io, path::PathBuf};

/// A enum that contains the different types of errors that the library returns as part of Result's.
#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    /// Invalid word count, passphrase count, length bounds or separator set.
    Config(String),
    WordlistNotFound(PathBuf),
    /// The word filter rejected every candidate.
    EmptyWordList,
    Network(reqwest::Error),
    Settings(config::ConfigError),
    SerError(toml::ser::Error),
    PersistError(tempfile::PersistError),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err)
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Settings(err)
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::SerError(err)
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Self::PersistError(err)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::WordlistNotFound(path) => {
                write!(f, "wordlist file not found: {}", path.display())
            }
            Self::EmptyWordList => write!(
                f,
                "no usable words left after filtering, check the length bounds and the wordlist"
            ),
            Self::Network(err) => write!(f, "failed to download wordlist: {err}"),
            Self::Settings(err) => write!(f, "failed to read settings: {err}"),
            Self::SerError(err) => write!(f, "{err}"),
            Self::PersistError(err) => write!(f, "failed to write wordlist cache: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// Convenience type for Results
pub type Result<T> = std::result::Result<T, Error>;
