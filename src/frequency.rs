use std::io::{self, Cursor, Read, Write};

/// Occurrence count for every possible byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [usize; 256],
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable { counts: [0; 256] }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut table = FrequencyTable::new();
        for &byte in bytes {
            table.counts[byte as usize] += 1;
        }
        table
    }

    pub fn set(&mut self, byte: u8, count: usize) {
        self.counts[byte as usize] = count;
    }

    pub fn get(&self, byte: u8) -> usize {
        self.counts[byte as usize]
    }

    /// Number of symbols with a nonzero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Total number of symbols counted, `None` if the sum overflows.
    pub fn total(&self) -> Option<usize> {
        self.counts
            .iter()
            .try_fold(0usize, |sum, &count| sum.checked_add(count))
    }

    pub fn is_empty(&self) -> bool {
        self.distinct() == 0
    }

    /// Nonzero `(byte, count)` pairs in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(byte, &count)| (byte as u8, count))
    }

    /// `u32` distinct count, then one `(u8 byte, u64 count)` pair per symbol,
    /// little endian, ascending byte order.
    pub fn serialize(&self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let distinct = self.distinct() as u32;
        bytes.write_all(&distinct.to_le_bytes())?;

        for (byte, count) in self.iter() {
            bytes.push(byte);
            bytes.write_all(&(count as u64).to_le_bytes())?;
        }

        Ok(bytes)
    }

    pub fn deserialize(data: &[u8]) -> io::Result<FrequencyTable> {
        let mut cursor = Cursor::new(data);

        let mut distinct_bytes = [0u8; 4];
        cursor.read_exact(&mut distinct_bytes)?;
        let distinct = u32::from_le_bytes(distinct_bytes) as usize;
        if distinct > 256 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("frequency table lists {} symbols", distinct),
            ));
        }

        let mut table = FrequencyTable::new();
        for _ in 0..distinct {
            let mut byte_val = [0u8; 1];
            cursor.read_exact(&mut byte_val)?;

            let mut count_bytes = [0u8; 8];
            cursor.read_exact(&mut count_bytes)?;
            let count = usize::try_from(u64::from_le_bytes(count_bytes)).map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("count for byte {} does not fit in memory", byte_val[0]),
                )
            })?;

            table.set(byte_val[0], count);
        }

        Ok(table)
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&[u8]> for FrequencyTable {
    fn from(bytes: &[u8]) -> Self {
        FrequencyTable::from_bytes(bytes)
    }
}
