use byteorder::{BigEndian, WriteBytesExt};
use pretty_assertions::assert_eq;
use tracing_test::traced_test;
use wex_install::error::{Error, Result};
use wex_install::InstallManifest;

struct ManifestBuilder {
    hash_size: u8,
    tags: Vec<(String, u16, Vec<u8>)>,
    files: Vec<(String, Vec<u8>, u32)>,
}

impl ManifestBuilder {
    fn new(hash_size: u8) -> Self {
        ManifestBuilder {
            hash_size,
            tags: Vec::new(),
            files: Vec::new(),
        }
    }

    fn tag(mut self, name: &str, tag_type: u16, mask: &[u8]) -> Self {
        self.tags.push((name.into(), tag_type, mask.to_vec()));
        self
    }

    fn file(mut self, name: &str, hash: u8, size: u32) -> Self {
        let hash = vec![hash; self.hash_size as usize];
        self.files.push((name.into(), hash, size));
        self
    }

    fn build(self) -> Vec<u8> {
        let mut buf = b"IN".to_vec();
        buf.push(1);
        buf.push(self.hash_size);
        buf.write_u16::<BigEndian>(self.tags.len() as u16).unwrap();
        buf.write_u32::<BigEndian>(self.files.len() as u32).unwrap();

        for (name, tag_type, mask) in self.tags {
            buf.extend(name.as_bytes());
            buf.push(0);
            buf.write_u16::<BigEndian>(tag_type).unwrap();
            buf.extend(mask);
        }

        for (name, hash, size) in self.files {
            buf.extend(name.as_bytes());
            buf.push(0);
            buf.extend(hash);
            buf.write_u32::<BigEndian>(size).unwrap();
        }

        buf
    }
}

#[traced_test]
#[test]
fn two_files_one_tag() -> Result<()> {
    let data = ManifestBuilder::new(16)
        .tag("Windows", 1, &[0b1100_0000])
        .file("Wow.exe", 0xAB, 1024)
        .file("Data/config.wtf", 0x01, 16)
        .build();

    let manifest = InstallManifest::parse(&data)?;
    assert_eq!(manifest.version, 1);
    assert_eq!(manifest.hash_size, 16);
    assert_eq!(manifest.len(), 2);

    let exe = &manifest.files[0];
    assert_eq!(exe.name, "Wow.exe");
    assert_eq!(exe.hash, "ab".repeat(16));
    assert_eq!(exe.size, 1024);
    assert_eq!(exe.tags, vec!["Windows".to_string()]);

    assert_eq!(manifest.files[1].tags, vec!["Windows".to_string()]);
    Ok(())
}

#[traced_test]
#[test]
fn tags_in_declaration_order() -> Result<()> {
    let data = ManifestBuilder::new(4)
        .tag("x86_64", 2, &[0b0110_0000])
        .tag("enUS", 3, &[0b1110_0000])
        .tag("deDE", 3, &[0b0001_0000])
        .file("a", 1, 1)
        .file("b", 2, 2)
        .file("c", 3, 3)
        .file("d", 4, 4)
        .build();

    let manifest = InstallManifest::parse(&data)?;

    let tags = manifest
        .files
        .iter()
        .map(|f| f.tags.join(","))
        .collect::<Vec<_>>();
    assert_eq!(tags, vec!["enUS", "x86_64,enUS", "x86_64,enUS", "deDE"]);

    let en = manifest
        .files_with_tag("enUS")
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(en, vec!["a", "b", "c"]);
    assert_eq!(manifest.files_with_tag("frFR").count(), 0);

    let tag = manifest.tag_by_name("deDE").unwrap();
    assert_eq!(tag.tag_type, 3);
    assert_eq!(tag.to_string(), "deDE (type 3)");

    let file = manifest.file_by_name("d").unwrap();
    assert_eq!(file.hash, "04040404");
    assert!(manifest.file_by_name("e").is_none());
    Ok(())
}

#[traced_test]
#[test]
fn padding_bits_are_ignored() -> Result<()> {
    let data = ManifestBuilder::new(1)
        .tag("All", 1, &[0xFF, 0xFF])
        .file("0", 0, 0)
        .file("1", 0, 0)
        .file("2", 0, 0)
        .file("3", 0, 0)
        .file("4", 0, 0)
        .file("5", 0, 0)
        .file("6", 0, 0)
        .file("7", 0, 0)
        .file("8", 0, 0)
        .build();

    let manifest = InstallManifest::parse(&data)?;
    assert_eq!(manifest.tags[0].mask.len(), 2);
    assert_eq!(manifest.files_with_tag("All").count(), 9);
    assert!(manifest.files.iter().all(|f| f.tags.len() == 1));
    Ok(())
}

#[traced_test]
#[test]
fn empty_manifest() -> Result<()> {
    let data = ManifestBuilder::new(16).build();

    let manifest = InstallManifest::parse(&data)?;
    assert!(manifest.is_empty());
    assert!(manifest.tags.is_empty());
    Ok(())
}

#[traced_test]
#[test]
fn invalid_signature() {
    let mut data = ManifestBuilder::new(16).build();
    data[0] = b'E';

    let err = InstallManifest::parse(&data).unwrap_err();
    assert!(matches!(err, Error::InvalidSignature(0x4E45)));
}

#[traced_test]
#[test]
fn truncated_file_table() {
    let mut data = ManifestBuilder::new(16)
        .tag("Windows", 1, &[0x80])
        .file("Wow.exe", 0xAB, 1024)
        .build();
    data.truncate(data.len() - 2);

    let err = InstallManifest::parse(&data).unwrap_err();
    assert!(matches!(
        err,
        Error::ChunkError(wex_chunk::error::Error::TruncatedBuffer { .. })
    ));
}

#[traced_test]
#[test]
fn file_count_larger_than_buffer() {
    let data = [b'I', b'N', 1, 16, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF];

    let err = InstallManifest::parse(&data).unwrap_err();
    assert!(matches!(
        err,
        Error::ChunkError(wex_chunk::error::Error::TruncatedBuffer {
            offset: 10,
            remaining: 0
        })
    ));
}

#[cfg(feature = "serde")]
#[traced_test]
#[test]
fn serialize_manifest() -> Result<()> {
    let data = ManifestBuilder::new(2)
        .tag("Windows", 1, &[0x80])
        .file("Wow.exe", 0xAB, 1024)
        .build();

    let manifest = InstallManifest::parse(&data)?;
    let json = serde_json::to_value(&manifest).unwrap();

    assert_eq!(json["files"][0]["hash"], "abab");
    assert_eq!(json["files"][0]["tags"][0], "Windows");
    assert_eq!(json["tags"][0]["tag_type"], 1);
    Ok(())
}
