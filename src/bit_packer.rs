/// Packs single bits into bytes.
///
/// Bits land in the accumulator least significant first; each completed byte
/// is bit-reversed on its way out, so the first bit written ends up as the
/// most significant bit of the stored byte.
#[derive(Default, Debug)]
pub struct BitPacker {
    bytes: Vec<u8>,
    accumulator: u8,
    cursor: u8,
    bit_count: usize,
}

impl BitPacker {
    pub fn new() -> Self {
        BitPacker::default()
    }

    pub fn with_capacity(bytes: usize) -> Self {
        BitPacker {
            bytes: Vec::with_capacity(bytes),
            ..BitPacker::default()
        }
    }

    /// Bytes flushed so far. A partially filled accumulator is not included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Total bits pushed, padding excluded.
    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    /// Bits sitting in the accumulator waiting for a flush.
    pub fn pending_bits(&self) -> u8 {
        self.cursor
    }

    pub fn push_bit(&mut self, bit: bool) {
        self.accumulator |= (bit as u8) << self.cursor;
        self.cursor += 1;
        self.bit_count += 1;

        if self.cursor == 8 {
            self.flush_byte();
        }
    }

    /// Push the low `bit_length` bits of `code`, most significant first.
    pub fn push_bits(&mut self, code: u64, bit_length: usize) {
        for bit_pos in (0..bit_length).rev() {
            let bit = (code >> bit_pos) & 1;
            self.push_bit(bit != 0);
        }
    }

    fn flush_byte(&mut self) {
        self.bytes.push(flip_bits(self.accumulator));
        self.accumulator = 0;
        self.cursor = 0;
    }

    /// Flush any partial byte (zero padded in its low bits) and hand back the
    /// packed output.
    pub fn finish(mut self) -> Vec<u8> {
        if self.cursor != 0 {
            self.flush_byte();
        }
        self.bytes
    }
}

/// Reverse the bit order of a byte: bit 0 becomes bit 7 and so on.
pub fn flip_bits(byte: u8) -> u8 {
    byte.reverse_bits()
}

/// Bits of `bytes`, each byte read from its most significant bit down.
pub fn iter_bits(bytes: &[u8]) -> impl Iterator<Item = bool> + '_ {
    bytes.iter().flat_map(|&byte| {
        let mut mask = 0x80u8;
        std::iter::from_fn(move || {
            if mask == 0 {
                return None;
            }
            let bit = byte & mask != 0;
            mask >>= 1;
            Some(bit)
        })
    })
}

/// `bytes` as space separated groups of eight binary digits.
pub fn to_binary_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:08b}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_flip_bits() {
        assert_eq!(flip_bits(0b1001_1100), 0b0011_1001);
        assert_eq!(flip_bits(0x01), 0x80);
        assert_eq!(flip_bits(0x00), 0x00);
        assert_eq!(flip_bits(0xFF), 0xFF);
        assert_eq!(flip_bits(0xF0), 0x0F);
    }

    #[test]
    fn test_first_bit_lands_in_msb() {
        let mut packer = BitPacker::new();
        packer.push_bit(true);
        assert_eq!(packer.pending_bits(), 1);
        assert!(packer.as_bytes().is_empty());
        assert_eq!(packer.finish(), vec![0x80]);
    }

    #[test]
    fn test_full_byte_flushes() {
        let mut packer = BitPacker::new();
        for bit in [true, false, true, true, false, false, false, true] {
            packer.push_bit(bit);
        }
        assert_eq!(packer.pending_bits(), 0);
        assert_eq!(packer.as_bytes(), &[0b1011_0001]);
        assert_eq!(packer.bit_count(), 8);
        assert_eq!(packer.finish(), vec![0b1011_0001]);
    }

    #[test]
    fn test_push_bits_spans_bytes() {
        let mut packer = BitPacker::new();
        packer.push_bits(0b110, 3);
        packer.push_bits(0b1010_1010, 8);
        assert_eq!(packer.bit_count(), 11);
        // 110 10101 | 010 + padding
        assert_eq!(packer.finish(), vec![0b1101_0101, 0b0100_0000]);
    }

    #[test]
    fn test_iter_bits_reads_msb_first() {
        let bits: Vec<bool> = iter_bits(&[0b1000_0001]).collect();
        assert_eq!(
            bits,
            vec![true, false, false, false, false, false, false, true]
        );
        assert_eq!(iter_bits(&[0xAA, 0x55]).count(), 16);
    }

    #[test]
    fn test_binary_string() {
        assert_eq!(to_binary_string(&[0xC0, 0x01]), "11000000 00000001");
    }
}
