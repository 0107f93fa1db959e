use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use tracing::debug;

use crate::ascii;
use crate::bit_packer::{iter_bits, BitPacker};
use crate::compressed_data::CompressedData;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::hufftree::{HuffNode, HuffmanTree};
use crate::metadata::PackStats;
use crate::storage;

#[derive(Debug)]
pub struct HuffmanCodec {
    tree: HuffmanTree,
    frequencies: FrequencyTable,
    encode_table: HashMap<u8, (u64, usize)>, // byte -> (code, bit length)
}

impl HuffmanCodec {
    pub fn new(frequencies: FrequencyTable) -> Result<Self> {
        let tree = HuffmanTree::from_frequencies(&frequencies)?;
        let encode_table = tree.generate_table().into_iter().collect();
        Ok(HuffmanCodec {
            tree,
            frequencies,
            encode_table,
        })
    }

    /// Count `data` and build a codec for it.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::new(FrequencyTable::from_bytes(data))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = storage::read_bytes(path)?;
        Self::from_bytes(&data)
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    /// Code and bit length assigned to `byte`.
    pub fn code_for(&self, byte: u8) -> Option<(u64, usize)> {
        self.encode_table.get(&byte).copied()
    }

    pub fn encode_symbol(&self, byte: u8, packer: &mut BitPacker) -> Result<()> {
        let (code, bit_length) = self
            .code_for(byte)
            .ok_or(HuffmanError::SymbolNotFound(byte))?;
        packer.push_bits(code, bit_length);
        Ok(())
    }

    /// Pack `data` into the bare wire format: no header, final byte zero
    /// padded.
    pub fn encode_raw(&self, data: &[u8]) -> Result<(Vec<u8>, PackStats)> {
        let mut packer = BitPacker::with_capacity(data.len() / 2 + 1);
        for &byte in data {
            self.encode_symbol(byte, &mut packer)?;
        }

        let bits_out = packer.bit_count();
        let packed = packer.finish();
        let stats = PackStats {
            bytes_in: data.len(),
            bits_out,
            bytes_out: packed.len(),
        };
        debug!(
            bytes_in = stats.bytes_in,
            bits_out = stats.bits_out,
            bytes_out = stats.bytes_out,
            "huffman encode finished"
        );

        Ok((packed, stats))
    }

    /// Pack `data` and frame it with the frequency table and symbol count.
    pub fn encode(&self, data: &[u8]) -> Result<CompressedData> {
        let (compressed_bits, stats) = self.encode_raw(data)?;
        Ok(CompressedData {
            compressed_bits,
            bit_count: stats.bits_out,
            tree_data: self.frequencies.serialize()?,
            original_length: data.len(),
        })
    }

    /// Walk the tree over `packed`, reading each byte from its most
    /// significant bit, until `symbol_count` bytes have been produced.
    /// Whatever bits remain after that are padding.
    pub fn decode_raw(&self, packed: &[u8], symbol_count: usize) -> Result<Vec<u8>> {
        // every symbol costs at least one bit
        let available = packed.len().saturating_mul(8);
        let mut result = Vec::with_capacity(symbol_count.min(available));
        if symbol_count == 0 {
            return Ok(result);
        }

        let root = &self.tree.root;

        if let HuffNode::Leaf { byte, .. } = root {
            if available < symbol_count {
                return Err(HuffmanError::Truncated {
                    expected: symbol_count,
                    decoded: available,
                });
            }
            result.resize(symbol_count, *byte);
            return Ok(result);
        }

        let mut node = root;
        for bit in iter_bits(packed) {
            if let HuffNode::Internal { left, right, .. } = node {
                node = if bit { right } else { left };
            }

            if let HuffNode::Leaf { byte, .. } = node {
                result.push(*byte);
                if result.len() == symbol_count {
                    return Ok(result);
                }
                node = root;
            }
        }

        Err(HuffmanError::Truncated {
            expected: symbol_count,
            decoded: result.len(),
        })
    }

    /// Decode a framed payload. The tree is rebuilt from the stored
    /// frequencies, so this works without the codec that produced it.
    pub fn decode(compressed: &CompressedData) -> Result<Vec<u8>> {
        if compressed.original_length == 0 {
            return Ok(Vec::new());
        }

        let frequencies = compressed.frequencies()?;
        let total = frequencies
            .total()
            .ok_or_else(|| HuffmanError::corrupted("frequency table counts overflow"))?;
        if total != compressed.original_length {
            return Err(HuffmanError::corrupted(format!(
                "frequency table counts {} symbols, header says {}",
                total, compressed.original_length
            )));
        }

        let codec = HuffmanCodec::new(frequencies)?;
        let decoded = codec.decode_raw(&compressed.compressed_bits, compressed.original_length)?;
        debug!(
            bytes_in = compressed.compressed_bits.len(),
            bytes_out = decoded.len(),
            "huffman decode finished"
        );
        Ok(decoded)
    }

    /// Read printable text from `input`, pack it and write the result to
    /// `output`, framed unless `raw` is set. The returned frame holds the
    /// packed payload in either case.
    pub fn encode_file(
        input: &Path,
        output: &Path,
        raw: bool,
    ) -> Result<(HuffmanCodec, CompressedData, PackStats)> {
        let data = storage::read_bytes(input)?;
        ascii::validate(&data)?;

        let codec = HuffmanCodec::from_bytes(&data)?;
        let compressed = codec.encode(&data)?;
        let bytes = if raw {
            compressed.compressed_bits.clone()
        } else {
            compressed.serialize()?
        };

        storage::write_bytes(output, &bytes)?;
        let stats = PackStats {
            bytes_in: data.len(),
            bits_out: compressed.bit_count,
            bytes_out: bytes.len(),
        };
        Ok((codec, compressed, stats))
    }

    /// Read a framed file written by [`HuffmanCodec::encode_file`] and write
    /// the restored bytes to `output`.
    pub fn decode_file(input: &Path, output: &Path) -> Result<PackStats> {
        let framed = storage::read_bytes(input)?;
        let compressed = CompressedData::deserialize(&mut Cursor::new(&framed[..]))?;
        let decoded = Self::decode(&compressed)?;

        storage::write_bytes(output, &decoded)?;
        Ok(PackStats::from_sizes(framed.len(), decoded.len()))
    }
}
