//! Run-length codec.
//!
//! ```text
//! Unpacked : AAAAAFFFFAF
//! Packed   : 0x05 'A' 0x04 'F' 0xFF 0x02 'A' 'F'
//! ```
//!
//! A run is a count byte followed by the repeated byte. `0xFF` in count
//! position starts a run of distinct bytes instead: a length byte, then that
//! many literal bytes. Because of the escape, repeat counts stop at 254.

use tracing::debug;

use crate::error::{HuffmanError, Result};

pub const UNIQUE_RUN_START: u8 = 0xFF;
pub const MAX_REPEAT_RUN: usize = 254;
pub const MAX_UNIQUE_RUN: usize = 255;

pub fn pack(data: &[u8]) -> Vec<u8> {
    let mut packed = Vec::with_capacity(data.len() / 2 + 2);
    let mut singles = Vec::with_capacity(MAX_UNIQUE_RUN);
    let mut i = 0;

    while i < data.len() {
        let byte = data[i];
        let run = data[i..]
            .iter()
            .take(MAX_REPEAT_RUN)
            .take_while(|&&b| b == byte)
            .count();

        if run > 1 {
            flush_singles(&mut packed, &mut singles);
            packed.push(run as u8);
            packed.push(byte);
        } else {
            singles.push(byte);
            if singles.len() == MAX_UNIQUE_RUN {
                flush_singles(&mut packed, &mut singles);
            }
        }
        i += run;
    }
    flush_singles(&mut packed, &mut singles);

    debug!(bytes_in = data.len(), bytes_out = packed.len(), "rle pack finished");
    packed
}

fn flush_singles(packed: &mut Vec<u8>, singles: &mut Vec<u8>) {
    match singles.len() {
        0 => {}
        // cheaper as a run of one than as an escaped run
        1 => {
            packed.push(1);
            packed.push(singles[0]);
        }
        n => {
            packed.push(UNIQUE_RUN_START);
            packed.push(n as u8);
            packed.extend_from_slice(singles);
        }
    }
    singles.clear();
}

pub fn unpack(packed: &[u8]) -> Result<Vec<u8>> {
    let mut unpacked = Vec::with_capacity(packed.len() * 2);
    let mut i = 0;

    while i < packed.len() {
        let marker = packed[i];
        let truncated = || HuffmanError::corrupted(format!("rle stream truncated at offset {}", i));

        if marker == UNIQUE_RUN_START {
            let len = *packed.get(i + 1).ok_or_else(truncated)? as usize;
            let run = packed.get(i + 2..i + 2 + len).ok_or_else(truncated)?;
            unpacked.extend_from_slice(run);
            i += 2 + len;
        } else {
            let byte = *packed.get(i + 1).ok_or_else(truncated)?;
            unpacked.extend(std::iter::repeat(byte).take(marker as usize));
            i += 2;
        }
    }

    debug!(bytes_in = packed.len(), bytes_out = unpacked.len(), "rle unpack finished");
    Ok(unpacked)
}
