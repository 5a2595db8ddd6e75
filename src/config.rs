use std::path::Path;
use serde::Deserialize;
use crate::{Error, Result};

/// Controls which parts of an object file end up in the generated document.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    pub sections: bool,
    pub symbols: bool,
    /// Emit a CRC-32 of each section's contents.
    pub checksums: bool,
    pub undefined_symbols: bool,
}
impl Default for Options {
    fn default() -> Self {
        Self {
            sections: true,
            symbols: true,
            checksums: true,
            undefined_symbols: false,
        }
    }
}
impl Options {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(Error::Config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&text)
    }
}
