//! # huffpack
//!
//! Byte oriented Huffman packing with a run-length codec on the side.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffpack::HuffmanCodec;
//!
//! let text = b"AAB";
//! let codec = HuffmanCodec::from_bytes(text)?;
//!
//! // bare wire bytes: A = 1, B = 0, padded to a byte
//! let (packed, _stats) = codec.encode_raw(text)?;
//! assert_eq!(packed, vec![0xC0]);
//! assert_eq!(codec.decode_raw(&packed, text.len())?, text.to_vec());
//!
//! // framed form carries the frequency table, so it decodes on its own
//! let framed = codec.encode(text)?;
//! assert_eq!(HuffmanCodec::decode(&framed)?, text.to_vec());
//! # Ok::<(), huffpack::HuffmanError>(())
//! ```

pub mod ascii;
pub mod bit_packer;
pub mod cli;
pub mod compressed_data;
pub mod config;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod metadata;
pub mod rle;
pub mod storage;

// Internal modules - not part of public API
mod work_list;

// Re-export main types for convenience
pub use compressed_data::CompressedData;
pub use config::Config;
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::HuffmanCodec;
pub use hufftree::{HuffNode, HuffmanTree};
pub use metadata::PackStats;
