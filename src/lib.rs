use std::path::Path;
use crate::config::Options;
use crate::document::ObjectDocument;
use crate::error_code::Domain;
use crate::reason::FailureReason;

pub use crate::error_code::ErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// A failure carried as a domain-tagged code, usually a [`FailureReason`].
    #[error(transparent)]
    Code(#[from] ErrorCode),
    #[error("invalid configuration: {0}")]
    Config(toml::de::Error),
    #[error("failed to emit document: {0}")]
    Emit(#[from] toml::ser::Error),
}
impl Error {
    /// The conversion failure behind this error, if there is one.
    pub fn reason(&self) -> Option<FailureReason> {
        match self {
            Error::Code(code) => code.reason(),
            _ => None,
        }
    }

    /// Process exit status for this error. A conversion code holding `success` maps to `0`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Code(code) if code.domain() == Domain::Conversion => {
                code.reason().map(FailureReason::exit_code).unwrap_or(OTHER_FAILURE_EXIT_CODE)
            },
            _ => OTHER_FAILURE_EXIT_CODE,
        }
    }
}
impl From<FailureReason> for Error {
    fn from(reason: FailureReason) -> Self {
        Error::Code(reason.into())
    }
}

/// Exit status for failures that are not a [`FailureReason`].
pub const OTHER_FAILURE_EXIT_CODE: i32 = 4;

pub type Result<T> = std::result::Result<T, Error>;

pub mod config;
pub mod detect;
pub mod document;
pub mod error_code;
pub mod reason;

/// Reads the object file at `path` and renders it as TOML text.
pub fn convert<P: AsRef<Path>>(path: P, options: &Options) -> Result<String> {
    let raw = detect::read_input(path)?;
    let (format, obj) = detect::parse(&raw)?;

    ObjectDocument::build(format, &obj, options).to_text()
}
