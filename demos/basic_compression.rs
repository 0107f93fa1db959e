use huffpack::HuffmanCodec;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create a sample file
    let sample_text = "Hello, world! This is a sample text for Huffman compression. \
                      The quick brown fox jumps over the lazy dog. \
                      Huffman encoding is a greedy algorithm that builds optimal prefix codes.";

    std::fs::write("sample.txt", sample_text)?;

    println!("Created sample file: {} bytes", sample_text.len());

    // Compress the file
    let (codec, _, stats) =
        HuffmanCodec::encode_file(Path::new("sample.txt"), Path::new("sample.huf"), false)?;

    println!("{}", codec.tree().render_levels());
    println!(
        "Compressed to: {} bytes ({:.1}% of original)",
        stats.bytes_out,
        stats.ratio() * 100.0
    );

    // Decompress the file
    HuffmanCodec::decode_file(Path::new("sample.huf"), Path::new("decompressed.txt"))?;

    // Verify the result
    let decompressed_text = std::fs::read_to_string("decompressed.txt")?;

    if sample_text == decompressed_text {
        println!("Decompression successful! Data matches exactly.");
    } else {
        println!("Decompression failed! Data mismatch.");
        return Err("Decompression verification failed".into());
    }

    // Cleanup
    std::fs::remove_file("sample.txt")?;
    std::fs::remove_file("sample.huf")?;
    std::fs::remove_file("decompressed.txt")?;

    println!("Cleaned up temporary files");

    Ok(())
}
