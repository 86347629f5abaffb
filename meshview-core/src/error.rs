/// Error types for asset loading and configuration
use std::io;
use std::path::PathBuf;

/// Reason a single asset line was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("`{directive}` expects {expected} values, found {found}")]
    TokenCount {
        directive: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("invalid vertex index `{0}`")]
    InvalidIndex(String),

    #[error("vertex index {index} out of range, {available} vertices declared so far")]
    IndexOutOfRange { index: u64, available: usize },
}

/// An asset line that could not be parsed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value: {0}")]
    Invalid(String),
}

/// Top-level error for loading a viewer session
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
