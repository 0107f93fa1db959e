use std::fmt;

/// Size accounting for one pack or unpack run. Purely diagnostic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackStats {
    pub bytes_in: usize,
    /// Payload bits produced by the bit packer, padding and framing
    /// excluded. Zero for byte oriented codecs.
    pub bits_out: usize,
    pub bytes_out: usize,
}

impl PackStats {
    pub fn from_sizes(bytes_in: usize, bytes_out: usize) -> Self {
        PackStats {
            bytes_in,
            bits_out: 0,
            bytes_out,
        }
    }

    /// Output size over input size.
    pub fn ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            return 0.0;
        }
        self.bytes_out as f64 / self.bytes_in as f64
    }

    /// Space saved as a percentage of the input; negative when the output grew.
    pub fn savings_percent(&self) -> f64 {
        if self.bytes_in == 0 {
            return 0.0;
        }
        (self.bytes_in as f64 - self.bytes_out as f64) / self.bytes_in as f64 * 100.0
    }

    /// Zero bits padding out the final payload byte.
    pub fn padding_bits(&self) -> usize {
        (8 - self.bits_out % 8) % 8
    }
}

impl fmt::Display for PackStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Status Report...")?;
        writeln!(f, "{:<15}{} bytes", "Before: ", self.bytes_in)?;
        writeln!(f, "{:<15}{} bytes", "After: ", self.bytes_out)?;
        write!(f, "{:<15}{:.2}%", "Compression: ", self.savings_percent())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ratio_and_savings() {
        let stats = PackStats {
            bytes_in: 200,
            bits_out: 395,
            bytes_out: 50,
        };
        assert_eq!(stats.ratio(), 0.25);
        assert_eq!(stats.savings_percent(), 75.0);
        assert_eq!(stats.padding_bits(), 5);
    }

    #[test]
    fn test_empty_input_has_no_ratio() {
        let stats = PackStats::default();
        assert_eq!(stats.ratio(), 0.0);
        assert_eq!(stats.savings_percent(), 0.0);
    }

    #[test]
    fn test_report_format() {
        let stats = PackStats::from_sizes(10, 12);
        assert_eq!(stats.bits_out, 0);
        assert_eq!(stats.padding_bits(), 0);
        let report = stats.to_string();
        assert!(report.starts_with("Status Report..."));
        assert!(report.contains("Before:        10 bytes"));
        assert!(report.contains("After:         12 bytes"));
        assert!(report.ends_with("-20.00%"));
    }
}
