//! Printable text check run before huffman packing.

use crate::error::{HuffmanError, Result};

fn is_allowed(byte: u8) -> bool {
    byte == b'\n' || (0x20..=0x7E).contains(&byte)
}

/// True when every byte is a printable ASCII character or a newline.
pub fn is_printable(bytes: &[u8]) -> bool {
    bytes.iter().copied().all(is_allowed)
}

/// Like [`is_printable`], reporting the first offending byte.
pub fn validate(bytes: &[u8]) -> Result<()> {
    match bytes.iter().position(|&b| !is_allowed(b)) {
        Some(offset) => Err(HuffmanError::NotAscii {
            offset,
            byte: bytes[offset],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_printable_text() {
        assert!(is_printable(b"Hello, world!\nSecond line ~{}\n"));
        assert!(is_printable(b""));
        assert!(validate(b" !~").is_ok());
    }

    #[test]
    fn test_rejects_control_and_high_bytes() {
        assert!(!is_printable(b"tab\there"));
        assert!(!is_printable(b"crlf\r\n"));
        assert!(!is_printable(&[b'a', 0x80]));
        assert!(!is_printable(&[0x7F]));

        match validate(b"ok\x01") {
            Err(HuffmanError::NotAscii { offset, byte }) => {
                assert_eq!(offset, 2);
                assert_eq!(byte, 0x01);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
