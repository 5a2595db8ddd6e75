//! Failure reasons reported by the object conversion layers.

use std::borrow::Cow;
use crate::error_code::{Category, Domain, ErrorCode};

/// Why a conversion failed.
///
/// The discriminants are part of the public interface (they are logged and used as exit
/// statuses), so existing values must never be renumbered.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FailureReason {
    Success = 0,
    /// The input path does not exist.
    FileNotFound = 1,
    /// No known container magic matched the input.
    UnrecognizedFileFormat = 2,
    /// The container was recognized, but this variant of it is not handled.
    UnsupportedObjFileFormat = 3,
}
impl FailureReason {
    pub const ALL: [FailureReason; 4] = [
        FailureReason::Success,
        FailureReason::FileNotFound,
        FailureReason::UnrecognizedFileFormat,
        FailureReason::UnsupportedObjFileFormat,
    ];

    pub fn from_ordinal(value: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|reason| reason.ordinal() == value)
    }

    pub const fn ordinal(self) -> i32 {
        self as i32
    }

    pub fn message(self) -> &'static str {
        message(self.ordinal())
    }

    /// Process exit status the command-line front end uses for this reason.
    pub const fn exit_code(self) -> i32 {
        self.ordinal()
    }
}

impl From<FailureReason> for ErrorCode {
    fn from(reason: FailureReason) -> Self {
        ErrorCode::new(reason.ordinal(), category())
    }
}

static CONVERSION: Category = Category {
    domain: Domain::Conversion,
    name: "obj2text",
    describe: describe,
};

fn describe(value: i32) -> Cow<'static, str> {
    Cow::Borrowed(message(value))
}

/// The category shared by every [`FailureReason`] code.
pub fn category() -> &'static Category {
    &CONVERSION
}

/// Human-readable text for a [`FailureReason`] ordinal.
pub fn message(value: i32) -> &'static str {
    match value {
        0 => "success",
        1 => "no such file",
        2 => "unrecognized file format",
        3 => "unsupported object file format",
        _ => "unknown error",
    }
}
