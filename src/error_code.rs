use std::borrow::Cow;
use std::fmt;
use crate::reason::FailureReason;

/// Subsystem that an [`ErrorCode`] belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Operating system errors (`errno` / `GetLastError` values).
    System,
    /// Object conversion failures, see [`FailureReason`].
    Conversion,
}

/// Describes one error domain: its name and how to render its integer codes.
///
/// Exactly one `Category` exists per [`Domain`]. They are plain `static`s, so they are built at
/// compile time and never change afterwards.
pub struct Category {
    pub(crate) domain: Domain,
    pub(crate) name: &'static str,
    pub(crate) describe: fn(i32) -> Cow<'static, str>,
}
impl Category {
    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Renders a code from this domain. Never fails, unknown codes get a fallback text.
    pub fn message(&self, value: i32) -> Cow<'static, str> {
        (self.describe)(value)
    }
}
impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Category")
            .field("domain", &self.domain)
            .field("name", &self.name)
            .finish()
    }
}

static SYSTEM: Category = Category {
    domain: Domain::System,
    name: "system",
    describe: describe_os_error,
};

fn describe_os_error(value: i32) -> Cow<'static, str> {
    std::io::Error::from_raw_os_error(value).to_string().into()
}

/// The category for operating system errors.
pub fn system_category() -> &'static Category {
    &SYSTEM
}

/// An integer code tagged with the domain it came from.
///
/// This is the common currency between the object conversion code and unrelated layers (file
/// I/O for now). A value of `0` means success in every domain.
#[derive(Copy, Clone)]
pub struct ErrorCode {
    value: i32,
    category: &'static Category,
}
impl ErrorCode {
    pub fn new(value: i32, category: &'static Category) -> Self {
        Self { value, category }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn category(&self) -> &'static Category {
        self.category
    }

    pub fn domain(&self) -> Domain {
        self.category.domain
    }

    pub fn is_ok(&self) -> bool {
        self.value == 0
    }

    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }

    pub fn message(&self) -> Cow<'static, str> {
        self.category.message(self.value)
    }

    /// Reads the code back as a [`FailureReason`], if it belongs to the conversion domain.
    pub fn reason(&self) -> Option<FailureReason> {
        match self.domain() {
            Domain::Conversion => FailureReason::from_ordinal(self.value),
            _ => None,
        }
    }
}
impl PartialEq for ErrorCode {
    fn eq(&self, other: &Self) -> bool {
        self.domain() == other.domain() && self.value == other.value
    }
}
impl Eq for ErrorCode {}

impl fmt::Debug for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ErrorCode({}:{})", self.category.name, self.value)
    }
}
impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category.name, self.message())
    }
}
impl std::error::Error for ErrorCode {}

impl From<std::io::Error> for ErrorCode {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            return FailureReason::FileNotFound.into();
        }

        ErrorCode::new(err.raw_os_error().unwrap_or(-1), system_category())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reason::category;

    #[test]
    fn equality_depends_on_domain() {
        let conversion = ErrorCode::from(FailureReason::FileNotFound);
        let system = ErrorCode::new(1, system_category());

        assert_eq!(conversion.value(), system.value());
        assert_ne!(conversion, system);
        assert_eq!(conversion, ErrorCode::new(1, category()));
    }

    #[test]
    fn zero_is_success_in_every_domain() {
        assert!(ErrorCode::new(0, system_category()).is_ok());
        assert!(ErrorCode::new(0, category()).is_ok());
        assert!(ErrorCode::new(2, system_category()).is_err());
    }

    #[test]
    fn io_not_found_becomes_file_not_found() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let code = ErrorCode::from(err);

        assert_eq!(code, FailureReason::FileNotFound.into());
        assert_eq!(code.reason(), Some(FailureReason::FileNotFound));
    }

    #[test]
    fn other_io_errors_stay_in_system_domain() {
        let code = ErrorCode::from(std::io::Error::from_raw_os_error(13));
        assert_eq!(code.domain(), Domain::System);
        assert_eq!(code.value(), 13);
        assert_eq!(code.reason(), None);
        assert!(!code.message().is_empty());

        let code = ErrorCode::from(std::io::Error::new(std::io::ErrorKind::Other, "custom"));
        assert_eq!(code.domain(), Domain::System);
        assert_eq!(code.value(), -1);
    }

    #[test]
    fn display_names_the_category() {
        let code = ErrorCode::from(FailureReason::UnrecognizedFileFormat);
        assert_eq!(code.to_string(), "obj2text: unrecognized file format");
    }
}
