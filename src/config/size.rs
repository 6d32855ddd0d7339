//! Byte size parsing utilities.

use anyhow::Context;

/// Default cap on the total size of a seed run's output files.
pub const DEFAULT_MAX_OUTPUT: &str = "50MiB";

/// Parse a size string like "50MiB", "10KB", "1G", "4096" into bytes.
/// Supports:
/// - Plain numbers (interpreted as bytes): "4096"
/// - Bytes suffix: "4096B"
/// - Decimal suffixes: "KB", "MB", "GB" (powers of 1000)
/// - Binary suffixes: "KiB", "MiB", "GiB", and the short "K", "M", "G"
///   (powers of 1024)
///
/// Suffixes are case-insensitive.
pub fn parse_byte_size(s: &str) -> anyhow::Result<u64> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty size string");
    }

    let split = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    let (num_str, suffix) = s.split_at(split);
    let value: u64 = num_str
        .parse()
        .with_context(|| format!("Invalid size value: {s}"))?;

    let multiplier: u64 = match suffix.trim().to_ascii_lowercase().as_str() {
        "" | "b" => 1,
        "kb" => 1_000,
        "mb" => 1_000_000,
        "gb" => 1_000_000_000,
        "k" | "kib" => 1 << 10,
        "m" | "mib" => 1 << 20,
        "g" | "gib" => 1 << 30,
        other => anyhow::bail!("Unknown size suffix '{other}' in {s}"),
    };

    value
        .checked_mul(multiplier)
        .with_context(|| format!("Size too large: {s}"))
}
