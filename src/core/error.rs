use thiserror::Error;

/// Errors returned by the grouping core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error
{
    /// A caller-supplied argument is outside its accepted domain.
    #[error("invalid argument {name}: {message}")]
    InvalidArgument
    {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: String,
    },

    /// A configured pattern failed to compile.
    #[error("invalid pattern {name}: {source}")]
    Pattern
    {
        /// Which configured pattern was rejected.
        name: &'static str,
        #[source]
        source: regex::Error,
    },
}

/// Result type used by the grouping core.
pub type Result<T> = std::result::Result<T, Error>;
