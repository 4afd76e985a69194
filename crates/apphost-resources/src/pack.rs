//! Binary resource data packs
//!
//! Packs are little endian. Version 4 header: `u32 version`, `u32 count`,
//! `u8 encoding`. Version 5 header: `u32 version`, `u8 encoding`, 3 bytes of
//! padding, `u16 count`, `u16 alias count`. Both are followed by `count + 1`
//! entries of `u16 id, u32 offset` (the last one is a sentinel whose offset
//! marks the end of the final resource). Version 5 then lists aliases as
//! `u16 id, u16 entry index`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use apphost_core::{Result, StartupError};
use log::debug;

const V4: u32 = 4;
const V5: u32 = 5;
const V4_HEADER_LEN: usize = 9;
const V5_HEADER_LEN: usize = 12;
const ENTRY_LEN: usize = 6;
const ALIAS_LEN: usize = 4;

/// Text encoding declared by a pack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Binary,
    Utf8,
    Utf16,
}

impl TextEncoding {
    fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(TextEncoding::Binary),
            1 => Some(TextEncoding::Utf8),
            2 => Some(TextEncoding::Utf16),
            _ => None,
        }
    }

    fn as_byte(self) -> u8 {
        match self {
            TextEncoding::Binary => 0,
            TextEncoding::Utf8 => 1,
            TextEncoding::Utf16 => 2,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    id: u16,
    offset: u32,
}

/// A validated, fully loaded data pack
#[derive(Debug, Clone)]
pub struct DataPack {
    path: PathBuf,
    version: u32,
    encoding: TextEncoding,
    /// Includes the trailing sentinel
    entries: Vec<Entry>,
    /// `(alias id, entry index)`, sorted by id
    aliases: Vec<(u16, u16)>,
    data: Vec<u8>,
}

impl DataPack {
    /// Read and validate a pack from disk
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StartupError::MissingPack {
                path: path.to_path_buf(),
            },
            _ => StartupError::Io(e),
        })?;

        let pack = Self::parse(data, path).map_err(|reason| StartupError::CorruptPack {
            path: path.to_path_buf(),
            reason,
        })?;

        debug!(
            "Loaded pack {} (v{}, {} resources, {} aliases)",
            path.display(),
            pack.version,
            pack.len(),
            pack.aliases.len()
        );
        Ok(pack)
    }

    /// Validate an in-memory pack; `path` is only used for diagnostics
    pub fn from_bytes(data: Vec<u8>, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        Self::parse(data, &path).map_err(|reason| StartupError::CorruptPack { path, reason })
    }

    fn parse(data: Vec<u8>, path: &Path) -> std::result::Result<Self, String> {
        let version = read_u32(&data, 0).ok_or("truncated header")?;

        let (encoding_byte, count, alias_count, table_start) = match version {
            V4 => {
                if data.len() < V4_HEADER_LEN {
                    return Err("truncated header".to_string());
                }
                let count = read_u32(&data, 4).ok_or("truncated header")? as usize;
                (data[8], count, 0usize, V4_HEADER_LEN)
            }
            V5 => {
                if data.len() < V5_HEADER_LEN {
                    return Err("truncated header".to_string());
                }
                let count = read_u16(&data, 8).ok_or("truncated header")? as usize;
                let aliases = read_u16(&data, 10).ok_or("truncated header")? as usize;
                (data[4], count, aliases, V5_HEADER_LEN)
            }
            other => return Err(format!("unsupported version {}", other)),
        };

        let encoding = TextEncoding::from_byte(encoding_byte)
            .ok_or_else(|| format!("unknown encoding {}", encoding_byte))?;

        let entries_len = (count + 1)
            .checked_mul(ENTRY_LEN)
            .ok_or("entry table overflow")?;
        let alias_start = table_start + entries_len;
        let data_start = alias_start + alias_count * ALIAS_LEN;
        if data_start > data.len() {
            return Err("entry table exceeds file length".to_string());
        }

        let mut entries: Vec<Entry> = Vec::with_capacity(count + 1);
        for i in 0..=count {
            let at = table_start + i * ENTRY_LEN;
            let id = read_u16(&data, at).ok_or("truncated entry")?;
            let offset = read_u32(&data, at + 2).ok_or("truncated entry")?;
            if (offset as usize) > data.len() {
                return Err(format!("entry {} offset {} beyond end of file", i, offset));
            }
            if let Some(prev) = entries.last() {
                if offset < prev.offset {
                    return Err(format!("entry {} offset goes backwards", i));
                }
                if i < count && id <= prev.id {
                    return Err(format!("entry {} id {} out of order", i, id));
                }
            }
            entries.push(Entry { id, offset });
        }
        if let Some(first) = entries.first() {
            if count > 0 && (first.offset as usize) < data_start {
                return Err("resource data overlaps entry table".to_string());
            }
        }

        let mut aliases = Vec::with_capacity(alias_count);
        for i in 0..alias_count {
            let at = alias_start + i * ALIAS_LEN;
            let id = read_u16(&data, at).ok_or("truncated alias")?;
            let index = read_u16(&data, at + 2).ok_or("truncated alias")?;
            if index as usize >= count {
                return Err(format!("alias {} points past entry table", id));
            }
            aliases.push((id, index));
        }
        aliases.sort_unstable_by_key(|&(id, _)| id);

        Ok(Self {
            path: path.to_path_buf(),
            version,
            encoding,
            entries,
            aliases,
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Number of resources, excluding aliases
    pub fn len(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: u16) -> bool {
        self.index_of(id).is_some()
    }

    /// Bytes of a resource, following aliases
    pub fn get(&self, id: u16) -> Option<&[u8]> {
        let index = self.index_of(id)?;
        let start = self.entries[index].offset as usize;
        let end = self.entries[index + 1].offset as usize;
        self.data.get(start..end)
    }

    fn index_of(&self, id: u16) -> Option<usize> {
        let resources = &self.entries[..self.len()];
        if let Ok(index) = resources.binary_search_by_key(&id, |e| e.id) {
            return Some(index);
        }
        self.aliases
            .binary_search_by_key(&id, |&(alias, _)| alias)
            .ok()
            .map(|i| self.aliases[i].1 as usize)
    }
}

/// Encode resources as a version 5 pack without aliases.
///
/// Fails when the resources do not fit the format's 16 bit count or 32 bit
/// offsets.
pub fn encode_v5(
    resources: &BTreeMap<u16, Vec<u8>>,
    encoding: TextEncoding,
) -> Result<Vec<u8>> {
    let count = u16::try_from(resources.len()).map_err(|_| {
        StartupError::PackTooLarge(format!("{} resources", resources.len()))
    })?;
    let data_start = V5_HEADER_LEN + (resources.len() + 1) * ENTRY_LEN;
    let body_len: usize = resources.values().map(Vec::len).sum();
    let end = u32::try_from(data_start + body_len)
        .map_err(|_| StartupError::PackTooLarge(format!("{} bytes of data", body_len)))?;

    let mut out = Vec::with_capacity(end as usize);
    out.extend_from_slice(&V5.to_le_bytes());
    out.push(encoding.as_byte());
    out.extend_from_slice(&[0, 0, 0]);
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());

    // Offsets never exceed `end`, checked above.
    let mut offset = data_start as u32;
    for (id, bytes) in resources {
        out.extend_from_slice(&id.to_le_bytes());
        out.extend_from_slice(&offset.to_le_bytes());
        offset += bytes.len() as u32;
    }
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&offset.to_le_bytes());

    for bytes in resources.values() {
        out.extend_from_slice(bytes);
    }
    Ok(out)
}

fn read_u16(data: &[u8], at: usize) -> Option<u16> {
    let bytes = data.get(at..at + 2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn read_u32(data: &[u8], at: usize) -> Option<u32> {
    let bytes = data.get(at..at + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BTreeMap<u16, Vec<u8>> {
        let mut resources = BTreeMap::new();
        resources.insert(4, b"four".to_vec());
        resources.insert(1, b"one".to_vec());
        resources.insert(9, Vec::new());
        resources
    }

    fn v4_pack() -> Vec<u8> {
        // two resources: 10 -> "ab", 20 -> "cde"
        let mut out = Vec::new();
        out.extend_from_slice(&4u32.to_le_bytes());
        out.extend_from_slice(&2u32.to_le_bytes());
        out.push(1);
        let data_start = (V4_HEADER_LEN + 3 * ENTRY_LEN) as u32;
        for (id, off) in [(10u16, data_start), (20, data_start + 2), (0, data_start + 5)] {
            out.extend_from_slice(&id.to_le_bytes());
            out.extend_from_slice(&off.to_le_bytes());
        }
        out.extend_from_slice(b"abcde");
        out
    }

    #[test]
    fn v5_lookup() {
        let pack = DataPack::from_bytes(encode_v5(&sample(), TextEncoding::Utf8).unwrap(), "mem").unwrap();

        assert_eq!(pack.version(), 5);
        assert_eq!(pack.encoding(), TextEncoding::Utf8);
        assert_eq!(pack.len(), 3);
        assert_eq!(pack.get(1), Some(&b"one"[..]));
        assert_eq!(pack.get(4), Some(&b"four"[..]));
        assert_eq!(pack.get(9), Some(&b""[..]));
        assert_eq!(pack.get(2), None);
    }

    #[test]
    fn v4_lookup() {
        let pack = DataPack::from_bytes(v4_pack(), "mem").unwrap();
        assert_eq!(pack.version(), 4);
        assert_eq!(pack.get(10), Some(&b"ab"[..]));
        assert_eq!(pack.get(20), Some(&b"cde"[..]));
    }

    #[test]
    fn v5_aliases_resolve_to_entries() {
        let mut resources = BTreeMap::new();
        resources.insert(1u16, b"shared".to_vec());
        let mut bytes = encode_v5(&resources, TextEncoding::Binary).unwrap();

        // Rebuild with one alias: id 7 -> entry 0
        bytes[10..12].copy_from_slice(&1u16.to_le_bytes());
        let alias_at = V5_HEADER_LEN + 2 * ENTRY_LEN;
        bytes.splice(alias_at..alias_at, [7u8, 0, 0, 0]);
        for i in 0..2 {
            let at = V5_HEADER_LEN + i * ENTRY_LEN + 2;
            let off = read_u32(&bytes, at).unwrap() + ALIAS_LEN as u32;
            bytes[at..at + 4].copy_from_slice(&off.to_le_bytes());
        }

        let pack = DataPack::from_bytes(bytes, "mem").unwrap();
        assert!(pack.contains(7));
        assert_eq!(pack.get(7), pack.get(1));
        assert_eq!(pack.len(), 1);
    }

    #[test]
    fn empty_pack_is_valid() {
        let pack =
            DataPack::from_bytes(encode_v5(&BTreeMap::new(), TextEncoding::Binary).unwrap(), "mem").unwrap();
        assert!(pack.is_empty());
        assert_eq!(pack.get(0), None);
    }

    #[test]
    fn rejects_unknown_version() {
        let mut bytes = encode_v5(&sample(), TextEncoding::Utf8).unwrap();
        bytes[0] = 3;
        let err = DataPack::from_bytes(bytes, "bad.pak").unwrap_err();
        assert!(err.to_string().contains("unsupported version 3"));
    }

    #[test]
    fn rejects_truncated_header() {
        let err = DataPack::from_bytes(vec![5, 0, 0], "bad.pak").unwrap_err();
        assert!(matches!(err, StartupError::CorruptPack { .. }));
    }

    #[test]
    fn rejects_unknown_encoding() {
        let mut bytes = encode_v5(&sample(), TextEncoding::Utf8).unwrap();
        bytes[4] = 9;
        assert!(DataPack::from_bytes(bytes, "bad.pak").is_err());
    }

    #[test]
    fn rejects_truncated_body() {
        let mut bytes = encode_v5(&sample(), TextEncoding::Utf8).unwrap();
        bytes.truncate(bytes.len() - 2);
        let err = DataPack::from_bytes(bytes, "bad.pak").unwrap_err();
        assert!(err.to_string().contains("beyond end of file"));
    }

    #[test]
    fn rejects_unsorted_ids() {
        let mut bytes = encode_v5(&sample(), TextEncoding::Utf8).unwrap();
        // swap the ids of the first two entries
        let first = V5_HEADER_LEN;
        let second = V5_HEADER_LEN + ENTRY_LEN;
        bytes[first..first + 2].copy_from_slice(&5u16.to_le_bytes());
        bytes[second..second + 2].copy_from_slice(&2u16.to_le_bytes());
        let err = DataPack::from_bytes(bytes, "bad.pak").unwrap_err();
        assert!(err.to_string().contains("out of order"));
    }

    #[test]
    fn encode_rejects_more_resources_than_the_count_holds() {
        let resources: BTreeMap<u16, Vec<u8>> =
            (0..=u16::MAX).map(|id| (id, Vec::new())).collect();
        assert_eq!(resources.len(), 65536);

        let err = encode_v5(&resources, TextEncoding::Binary).unwrap_err();
        assert!(matches!(err, StartupError::PackTooLarge(_)));
    }

    #[test]
    fn encode_accepts_the_largest_count() {
        let resources: BTreeMap<u16, Vec<u8>> =
            (1..=u16::MAX).map(|id| (id, Vec::new())).collect();
        let bytes = encode_v5(&resources, TextEncoding::Binary).unwrap();
        let pack = DataPack::from_bytes(bytes, "mem").unwrap();
        assert_eq!(pack.len(), u16::MAX as usize);
        assert_eq!(pack.get(u16::MAX), Some(&b""[..]));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = DataPack::load(Path::new("/nonexistent/apphost/resources.pak")).unwrap_err();
        assert!(matches!(err, StartupError::MissingPack { .. }));
    }
}
