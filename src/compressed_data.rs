use std::io::{self, Cursor, Read, Write};

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

/// Leading bytes of a framed huffman file.
pub const MAGIC: [u8; 4] = *b"HUFP";

/// A packed payload together with what a decoder needs to rebuild the tree.
///
/// Layout, little endian: magic, original length (u64), bit count (u64),
/// tree length (u64) and tree data, payload length (u64) and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedData {
    pub compressed_bits: Vec<u8>,
    pub bit_count: usize,
    /// Serialized [`FrequencyTable`].
    pub tree_data: Vec<u8>,
    pub original_length: usize,
}

impl CompressedData {
    pub fn frequencies(&self) -> Result<FrequencyTable> {
        FrequencyTable::deserialize(&self.tree_data)
            .map_err(|e| HuffmanError::corrupted(format!("bad frequency table: {}", e)))
    }

    pub fn serialize(&self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(
            MAGIC.len() + 32 + self.tree_data.len() + self.compressed_bits.len(),
        );
        bytes.write_all(&MAGIC)?;

        // write the original length
        let original_length = self.original_length as u64;
        bytes.write_all(&original_length.to_le_bytes())?;

        // write the total bit count
        let bit_count = self.bit_count as u64;
        bytes.write_all(&bit_count.to_le_bytes())?;

        // write the tree data length, then tree data
        let tree_len = self.tree_data.len() as u64;
        bytes.write_all(&tree_len.to_le_bytes())?;
        bytes.write_all(&self.tree_data)?;

        // write compressed data length, then data
        let data_len = self.compressed_bits.len() as u64;
        bytes.write_all(&data_len.to_le_bytes())?;
        bytes.write_all(&self.compressed_bits)?;

        Ok(bytes)
    }

    pub fn deserialize(cursor: &mut Cursor<&[u8]>) -> Result<CompressedData> {
        let mut magic = [0u8; 4];
        read_section(cursor, &mut magic, "magic")?;
        if magic != MAGIC {
            return Err(HuffmanError::corrupted(
                "missing container header, raw huffman output cannot be unpacked",
            ));
        }

        let original_length = read_length(cursor, "original length")?;
        let bit_count = read_length(cursor, "bit count")?;

        let tree_len = read_length(cursor, "tree length")?;
        let tree_data = read_block(cursor, tree_len, "tree data")?;

        let data_len = read_length(cursor, "data length")?;
        let compressed_bits = read_block(cursor, data_len, "packed data")?;

        if bit_count > compressed_bits.len() * 8 {
            return Err(HuffmanError::corrupted(format!(
                "bit count {} exceeds {} payload bytes",
                bit_count,
                compressed_bits.len()
            )));
        }

        Ok(CompressedData {
            compressed_bits,
            bit_count,
            tree_data,
            original_length,
        })
    }
}

fn read_section(cursor: &mut Cursor<&[u8]>, buf: &mut [u8], what: &str) -> Result<()> {
    cursor.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => HuffmanError::corrupted(format!("truncated {}", what)),
        _ => HuffmanError::Io(e),
    })
}

fn read_length(cursor: &mut Cursor<&[u8]>, what: &str) -> Result<usize> {
    let mut bytes = [0u8; 8];
    read_section(cursor, &mut bytes, what)?;
    usize::try_from(u64::from_le_bytes(bytes))
        .map_err(|_| HuffmanError::corrupted(format!("{} does not fit in memory", what)))
}

fn read_block(cursor: &mut Cursor<&[u8]>, len: usize, what: &str) -> Result<Vec<u8>> {
    let remaining = cursor.get_ref().len().saturating_sub(cursor.position() as usize);
    if len > remaining {
        return Err(HuffmanError::corrupted(format!(
            "{} claims {} bytes, only {} left",
            what, len, remaining
        )));
    }
    let mut block = vec![0u8; len];
    read_section(cursor, &mut block, what)?;
    Ok(block)
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample() -> CompressedData {
        CompressedData {
            compressed_bits: vec![0xC0],
            bit_count: 3,
            tree_data: FrequencyTable::from_bytes(b"AAB").serialize().unwrap(),
            original_length: 3,
        }
    }

    #[test]
    fn test_layout() {
        let bytes = sample().serialize().unwrap();
        assert_eq!(&bytes[..4], b"HUFP");
        assert_eq!(&bytes[4..12], &3u64.to_le_bytes());
        assert_eq!(&bytes[12..20], &3u64.to_le_bytes());
        assert_eq!(&bytes[20..28], &22u64.to_le_bytes());
        assert_eq!(bytes.len(), 4 + 8 + 8 + 8 + 22 + 8 + 1);
        assert_eq!(bytes.last(), Some(&0xC0));
    }

    #[test]
    fn test_serialize_then_deserialize() {
        let original = sample();
        let bytes = original.serialize().unwrap();
        let restored = CompressedData::deserialize(&mut Cursor::new(&bytes[..])).unwrap();
        assert_eq!(restored, original);
        assert_eq!(restored.frequencies().unwrap().get(b'A'), 2);
    }

    #[test]
    fn test_rejects_raw_payload() {
        let raw = [0xC0u8];
        let err = CompressedData::deserialize(&mut Cursor::new(&raw[..])).unwrap_err();
        assert!(matches!(err, HuffmanError::Corrupted(_)));
    }

    #[test]
    fn test_rejects_oversized_block() {
        let mut bytes = sample().serialize().unwrap();
        // claim a huge tree section
        bytes[20..28].copy_from_slice(&u64::MAX.to_le_bytes());
        let err = CompressedData::deserialize(&mut Cursor::new(&bytes[..])).unwrap_err();
        assert!(matches!(err, HuffmanError::Corrupted(_)));
    }

    #[test]
    fn test_rejects_truncated_payload() {
        let bytes = sample().serialize().unwrap();
        let err = CompressedData::deserialize(&mut Cursor::new(&bytes[..bytes.len() - 1]))
            .unwrap_err();
        assert!(matches!(err, HuffmanError::Corrupted(_)));
    }
}
