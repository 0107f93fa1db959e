//! huffpack command line tool.
//!
//! ```bash
//! huffpack huffman pack notes.txt notes.huf
//! huffpack huffman unpack notes.huf notes.txt
//! huffpack rle pack tiles.bin tiles.rle
//! huffpack --log-level debug --verbose huffman pack notes.txt notes.huf
//! ```

use clap::error::ErrorKind;
use clap::Parser;
use tracing::error;
use tracing_subscriber::FmtSubscriber;

use huffpack::cli::{self, Cli, USAGE_HINT};

fn main() {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = e.print();
                }
                _ => println!("{}", USAGE_HINT),
            }
            return;
        }
    };

    let config = args.config();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_target(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("failed to install tracing subscriber");
    }

    // failures are reported, never turned into an exit code
    if let Err(e) = cli::run(&args.command, &config) {
        error!("{}", e);
    }
}
