use derive_more::derive::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A tag grouping install files, such as a platform, locale or architecture
#[derive(Display, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[display("{name} (type {tag_type})")]
pub struct InstallTag {
    pub name: String,
    pub tag_type: u16,
    /// One bit per file in manifest order, most significant bit first
    pub mask: Vec<u8>,
}

/// A file to install along with the names of every tag selecting it
#[derive(Display, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[display("{name} {hash} ({size} bytes)")]
pub struct InstallFile {
    pub name: String,
    /// Lowercase hex encoded content hash
    pub hash: String,
    pub size: u32,
    /// Tag names in the order the tags are declared
    pub tags: Vec<String>,
}

impl InstallFile {
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag == name)
    }
}
