use std::fmt;
use std::path::Path;
use object::{File, FileKind};
use tracing::debug;
use crate::error_code::ErrorCode;
use crate::reason::FailureReason;

/// Container formats that can be converted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Elf32,
    Elf64,
    MachO32,
    MachO64,
    Coff,
    Pe32,
    Pe64,
}
impl Format {
    pub fn name(&self) -> &'static str {
        match self {
            Format::Elf32 => "ELF32",
            Format::Elf64 => "ELF64",
            Format::MachO32 => "MachO32",
            Format::MachO64 => "MachO64",
            Format::Coff => "COFF",
            Format::Pe32 => "PE32",
            Format::Pe64 => "PE32+",
        }
    }
}
impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reads the whole input file.
///
/// A missing file is reported as [`FailureReason::FileNotFound`], other I/O failures keep their
/// OS error code.
pub fn read_input<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, ErrorCode> {
    let path = path.as_ref();
    match std::fs::read(path) {
        Ok(raw) => {
            debug!(path = %path.display(), len = raw.len(), "read input");
            Ok(raw)
        },
        Err(err) => {
            debug!(path = %path.display(), %err, "failed to read input");
            Err(err.into())
        }
    }
}

/// Classifies the container format of `data` from its magic bytes.
pub fn detect(data: &[u8]) -> Result<Format, FailureReason> {
    let kind = match FileKind::parse(data) {
        Ok(kind) => kind,
        Err(err) => {
            debug!(%err, "no container magic matched");
            return Err(FailureReason::UnrecognizedFileFormat);
        }
    };

    match kind {
        FileKind::Elf32 => Ok(Format::Elf32),
        FileKind::Elf64 => Ok(Format::Elf64),
        FileKind::MachO32 => Ok(Format::MachO32),
        FileKind::MachO64 => Ok(Format::MachO64),
        FileKind::Coff => Ok(Format::Coff),
        FileKind::Pe32 => Ok(Format::Pe32),
        FileKind::Pe64 => Ok(Format::Pe64),
        other => {
            debug!(kind = ?other, "container recognized but not handled");
            Err(FailureReason::UnsupportedObjFileFormat)
        }
    }
}

/// Detects and parses `data`.
///
/// Once the magic has matched, a body the reader rejects is an unsupported variant of a known
/// format, never an unrecognized one.
pub fn parse(data: &[u8]) -> Result<(Format, File), FailureReason> {
    let format = detect(data)?;
    match File::parse(data) {
        Ok(file) => Ok((format, file)),
        Err(err) => {
            debug!(%format, %err, "reader rejected object body");
            Err(FailureReason::UnsupportedObjFileFormat)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(magic: &[u8]) -> Vec<u8> {
        let mut data = magic.to_vec();
        data.resize(64, 0);
        data
    }

    #[test]
    fn empty_and_text_input_is_unrecognized() {
        assert_eq!(detect(&[]), Err(FailureReason::UnrecognizedFileFormat));
        assert_eq!(detect(b"ab"), Err(FailureReason::UnrecognizedFileFormat));
        assert_eq!(
            detect(b"this is a plain text file, definitely not an object file\n"),
            Err(FailureReason::UnrecognizedFileFormat)
        );
    }

    #[test]
    fn archives_are_unsupported() {
        assert_eq!(detect(&padded(b"!<arch>\n")), Err(FailureReason::UnsupportedObjFileFormat));
    }

    #[test]
    fn elf_magic_is_detected() {
        assert_eq!(detect(&padded(b"\x7fELF\x01")), Ok(Format::Elf32));
        assert_eq!(detect(&padded(b"\x7fELF\x02")), Ok(Format::Elf64));
    }

    fn pe_image(optional_magic: u16) -> Vec<u8> {
        let mut data = vec![0u8; 0x200];
        data[..2].copy_from_slice(b"MZ");
        data[0x3c..0x40].copy_from_slice(&0x40u32.to_le_bytes());
        data[0x40..0x44].copy_from_slice(b"PE\0\0");
        // optional header follows the 20-byte file header
        data[0x58..0x5a].copy_from_slice(&optional_magic.to_le_bytes());
        data
    }

    #[test]
    fn pe_optional_header_selects_width() {
        assert_eq!(detect(&pe_image(0x10b)), Ok(Format::Pe32));
        assert_eq!(detect(&pe_image(0x20b)), Ok(Format::Pe64));
    }

    #[test]
    fn truncated_elf_is_unsupported() {
        let mut data = b"\x7fELF\x02\x01\x01".to_vec();
        data.resize(20, 0);
        assert_eq!(detect(&data), Ok(Format::Elf64));
        assert!(matches!(parse(&data), Err(FailureReason::UnsupportedObjFileFormat)));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_input(dir.path().join("missing.o")).unwrap_err();
        assert_eq!(err.reason(), Some(FailureReason::FileNotFound));
        assert_eq!(err.message(), "no such file");
    }
}
