//! Command line surface of the `huffpack` binary.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;

use crate::bit_packer::to_binary_string;
use crate::config::Config;
use crate::error::Result;
use crate::huffman_codec::HuffmanCodec;
use crate::metadata::PackStats;
use crate::rle;
use crate::storage;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Printed for anything the parser does not accept.
pub const USAGE_HINT: &str = "% Invalid parameter(s).\nType 'help' for program commands.";

#[derive(Parser, Debug)]
#[command(name = "huffpack")]
#[command(version)]
#[command(about = "Huffman and run-length packer", long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Print the huffman tree and the packed bytes
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Pack or unpack printable text with huffman coding
    Huffman {
        #[command(subcommand)]
        method: HuffmanMethod,
    },
    /// Pack or unpack data with run-length encoding
    Rle {
        #[command(subcommand)]
        method: RleMethod,
    },
    /// Display the command set
    Help,
    /// Display version and author
    Credits,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum HuffmanMethod {
    Pack {
        input: PathBuf,
        output: PathBuf,
        /// Write bare packed bits without the frequency table header
        #[arg(long)]
        raw: bool,
    },
    Unpack {
        input: PathBuf,
        output: PathBuf,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum RleMethod {
    Pack { input: PathBuf, output: PathBuf },
    Unpack { input: PathBuf, output: PathBuf },
}

impl Cli {
    pub fn config(&self) -> Config {
        let raw = matches!(
            self.command,
            Command::Huffman {
                method: HuffmanMethod::Pack { raw: true, .. }
            }
        );
        Config::from_env(self.log_level.as_deref(), self.verbose, raw)
    }
}

pub fn run(command: &Command, config: &Config) -> Result<()> {
    match command {
        Command::Huffman { method } => match method {
            HuffmanMethod::Pack { input, output, .. } => {
                announce("Huffman Pack", input, output);
                let stats = huffman_pack(input, output, config)?;
                info!("\n{}", stats);
            }
            HuffmanMethod::Unpack { input, output } => {
                announce("Huffman Unpack", input, output);
                let stats = HuffmanCodec::decode_file(input, output)?;
                info!(before = stats.bytes_in, after = stats.bytes_out, "huffman unpack finished");
            }
        },
        Command::Rle { method } => match method {
            RleMethod::Pack { input, output } => {
                announce("RLE Pack", input, output);
                let stats = rle_pack(input, output)?;
                info!("\n{}", stats);
            }
            RleMethod::Unpack { input, output } => {
                announce("RLE Unpack", input, output);
                let stats = rle_unpack(input, output)?;
                info!(before = stats.bytes_in, after = stats.bytes_out, "rle unpack finished");
            }
        },
        Command::Help => print!("{}", help_text()),
        Command::Credits => print!("{}", credits_text()),
    }
    Ok(())
}

fn announce(operation: &str, input: &Path, output: &Path) {
    info!(
        input = %input.display(),
        output = %output.display(),
        "Running {}...",
        operation
    );
}

pub fn huffman_pack(input: &Path, output: &Path, config: &Config) -> Result<PackStats> {
    let (codec, compressed, stats) = HuffmanCodec::encode_file(input, output, !config.container)?;
    if config.verbose {
        println!("{}", codec.tree().render_levels());
        codec.tree().print_structure();

        let packed = &compressed.compressed_bits;
        println!("Binary  : {}", to_binary_string(packed));
        let hex: Vec<String> = packed.iter().map(|b| format!("{:#04x}", b)).collect();
        println!("Hex     : {}", hex.join(" "));
    }
    Ok(stats)
}

pub fn rle_pack(input: &Path, output: &Path) -> Result<PackStats> {
    let data = storage::read_bytes(input)?;
    let packed = rle::pack(&data);
    storage::write_bytes(output, &packed)?;
    Ok(PackStats::from_sizes(data.len(), packed.len()))
}

pub fn rle_unpack(input: &Path, output: &Path) -> Result<PackStats> {
    let packed = storage::read_bytes(input)?;
    let unpacked = rle::unpack(&packed)?;
    storage::write_bytes(output, &unpacked)?;
    Ok(PackStats::from_sizes(packed.len(), unpacked.len()))
}

fn banner(out: &mut String) {
    let _ = writeln!(out, "------------");
    let _ = writeln!(out, "| HUFFPACK |");
    let _ = writeln!(out, "------------");
}

pub fn help_text() -> String {
    let mut out = String::new();
    banner(&mut out);
    let _ = writeln!(out, "Command Set:");
    let commands = [
        ("huffman <method> <inFile> <outFile>", "pack/unpack printable text using Huffman"),
        ("rle <method> <inFile> <outFile>", "pack/unpack data using RLE"),
        ("help", "display help menu"),
        ("credits", "display credits"),
    ];
    for (command, what) in commands {
        let _ = writeln!(out, "{:<40}- {}", command, what);
    }

    let _ = writeln!(out, "\nArguments:");
    let arguments = [
        ("method", "pack/unpack"),
        ("inFile", "path to input file"),
        ("outFile", "desired path for output"),
        ("--raw", "huffman pack only: omit the frequency table header"),
        ("--verbose", "print the huffman tree and packed bytes"),
        ("--log-level <level>", "trace, debug, info, warn or error"),
    ];
    for (argument, what) in arguments {
        let _ = writeln!(out, "{:<40}- {}", argument, what);
    }
    out
}

pub fn credits_text() -> String {
    let mut out = String::new();
    banner(&mut out);
    let _ = writeln!(out, "{:<20}{}", "Version: ", VERSION);
    let _ = writeln!(out, "\nRelease Notes:");
    let _ = writeln!(out, "{:<10}- RLE/Huffman compression", "v0.1");
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_huffman_pack() {
        let cli = Cli::try_parse_from(["huffpack", "huffman", "pack", "in.txt", "out.huf", "--raw"])
            .unwrap();
        assert_eq!(
            cli.command,
            Command::Huffman {
                method: HuffmanMethod::Pack {
                    input: PathBuf::from("in.txt"),
                    output: PathBuf::from("out.huf"),
                    raw: true,
                }
            }
        );
        assert!(!cli.config().container);
    }

    #[test]
    fn test_parse_help_and_credits() {
        let cli = Cli::try_parse_from(["huffpack", "help"]).unwrap();
        assert_eq!(cli.command, Command::Help);
        let cli = Cli::try_parse_from(["huffpack", "--verbose", "credits"]).unwrap();
        assert_eq!(cli.command, Command::Credits);
        assert!(cli.verbose);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(Cli::try_parse_from(["huffpack"]).is_err());
        assert!(Cli::try_parse_from(["huffpack", "lzw", "pack", "a", "b"]).is_err());
        assert!(Cli::try_parse_from(["huffpack", "rle", "pack", "a"]).is_err());
        assert!(Cli::try_parse_from(["huffpack", "rle", "squash", "a", "b"]).is_err());
    }

    #[test]
    fn test_help_lists_commands() {
        let text = help_text();
        assert!(text.contains("huffman <method> <inFile> <outFile>"));
        assert!(text.contains("rle <method>"));
        assert!(credits_text().contains(VERSION));
    }

    #[test]
    fn test_huffman_pack_rejects_binary_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.bin");
        let output = dir.path().join("out.huf");
        std::fs::write(&input, [0u8, 1, 2]).unwrap();

        let err = huffman_pack(&input, &output, &Config::default()).unwrap_err();
        assert!(matches!(err, crate::HuffmanError::NotAscii { offset: 0, byte: 0 }));
        assert!(!output.exists());
    }

    #[test]
    fn test_run_rle_roundtrip() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.bin");
        let packed = dir.path().join("in.rle");
        let output = dir.path().join("out.bin");
        std::fs::write(&input, b"aaaaabbbcdef").unwrap();

        let config = Config::default();
        run(
            &Command::Rle {
                method: RleMethod::Pack {
                    input: input.clone(),
                    output: packed.clone(),
                },
            },
            &config,
        )
        .unwrap();
        run(
            &Command::Rle {
                method: RleMethod::Unpack {
                    input: packed,
                    output: output.clone(),
                },
            },
            &config,
        )
        .unwrap();

        assert_eq!(std::fs::read(output).unwrap(), b"aaaaabbbcdef".to_vec());
    }
}
