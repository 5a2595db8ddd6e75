use crc::{Crc, CRC_32_ISO_HDLC};
use object::{File, Object, ObjectSection, ObjectSymbol, SectionFlags, SymbolSection};
use serde::{Serialize, Serializer};
use tracing::debug;
use crate::config::Options;
use crate::detect::Format;
use crate::Result;

/// Checksum used for section contents.
pub const CRC: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// File-level properties of an object.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct FileHeader {
    pub format: String,
    pub architecture: String,
    pub endianness: String,
    pub bits: u8,
    pub entry: String,
}

/// Simplified view of an object section.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct SectionEntry {
    pub name: String,
    pub address: String,
    #[serde(serialize_with = "int_or_hex")]
    pub size: u64,
    #[serde(serialize_with = "int_or_hex")]
    pub align: u64,
    pub kind: String,
    #[serde(serialize_with = "int_or_hex")]
    pub flags: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crc32: Option<u32>,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct SymbolEntry {
    pub name: String,
    pub address: String,
    #[serde(serialize_with = "int_or_hex")]
    pub size: u64,
    pub kind: String,
    pub scope: String,
    pub section: String,
}

/// Text representation of an object file. Serialized as TOML by [`Self::to_text()`].
///
/// Addresses are stored as hex strings since TOML integers are signed 64-bit. Sizes, alignments
/// and flags stay integers unless they exceed `i64::MAX`, in which case they are hex strings too.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct ObjectDocument {
    pub file: FileHeader,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<SectionEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub symbols: Vec<SymbolEntry>,
}
impl ObjectDocument {
    pub fn build(format: Format, obj: &File, options: &Options) -> Self {
        let file = FileHeader {
            format: format.name().to_string(),
            architecture: format!("{:?}", obj.architecture()),
            endianness: if obj.is_little_endian() { "little" } else { "big" }.to_string(),
            bits: if obj.is_64() { 64 } else { 32 },
            entry: hex(obj.entry()),
        };

        let sections = if options.sections { Self::sections(obj, options) } else { vec![] };
        let symbols = if options.symbols { Self::symbols(obj, options) } else { vec![] };
        debug!(%format, sections = sections.len(), symbols = symbols.len(), "built document");

        Self { file, sections, symbols }
    }

    fn sections(obj: &File, options: &Options) -> Vec<SectionEntry> {
        let mut sections = vec![];
        for section in obj.sections() {
            let crc32 = if options.checksums {
                section.data().ok().map(|data| CRC.checksum(data))
            } else {
                None
            };

            sections.push((section.address(), SectionEntry {
                name: section.name().unwrap_or_default().to_string(),
                address: hex(section.address()),
                size: section.size(),
                align: section.align(),
                kind: format!("{:?}", section.kind()),
                flags: match section.flags() {
                    SectionFlags::Elf { sh_flags } => sh_flags,
                    SectionFlags::MachO { flags } => flags as u64,
                    SectionFlags::Coff { characteristics } => characteristics as u64,
                    _ => 0,
                },
                crc32,
            }));
        }
        sections.sort_by(|a, b| a.0.cmp(&b.0));

        sections.into_iter().map(|(_, entry)| entry).collect()
    }

    fn symbols(obj: &File, options: &Options) -> Vec<SymbolEntry> {
        obj.symbols()
            .filter(|symbol| options.undefined_symbols || !symbol.is_undefined())
            .map(|symbol| SymbolEntry {
                name: symbol.name().unwrap_or_default().to_string(),
                address: hex(symbol.address()),
                size: symbol.size(),
                kind: format!("{:?}", symbol.kind()),
                scope: format!("{:?}", symbol.scope()),
                section: match symbol.section() {
                    SymbolSection::Section(index) => obj.section_by_index(index)
                        .ok()
                        .and_then(|section| section.name().ok().map(|name| name.to_string()))
                        .unwrap_or_default(),
                    SymbolSection::Undefined => "*UND*".to_string(),
                    SymbolSection::Absolute => "*ABS*".to_string(),
                    SymbolSection::Common => "*COM*".to_string(),
                    _ => String::new(),
                },
            })
            .collect()
    }

    pub fn to_text(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn section_by_name<S: AsRef<str>>(&self, name: S) -> Option<&SectionEntry> {
        self.sections.iter().find(|section| section.name == name.as_ref())
    }
}

fn hex(value: u64) -> String {
    format!("{:#x}", value)
}

fn int_or_hex<S: Serializer>(value: &u64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    match i64::try_from(*value) {
        Ok(value) => serializer.serialize_i64(value),
        Err(_) => serializer.serialize_str(&hex(*value)),
    }
}
