/*!
 * Utility functions for dirmerge
 */

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;

/// Format a human-readable file size
pub fn format_size(size: u64) -> String {
    let mut value = size as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if value < 1024.0 {
            return format!("{:.1} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.1} TB", value)
}

static SIZE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([\d.]+)\s*([KMGB]+)$").unwrap());

/// Parse a size string like `"1M"`, `"500K"` or `"1.5G"` into bytes
pub fn parse_size(size_str: &str) -> Result<u64> {
    let normalized = size_str.trim().to_uppercase();

    let caps = SIZE_RE.captures(&normalized).ok_or_else(|| {
        crate::error!(
            InvalidArgument,
            "Invalid size format: {}. Use format like '1M', '500K', '1.5G'",
            size_str
        )
    })?;

    let number: f64 = caps[1]
        .parse()
        .map_err(|_| crate::error!(InvalidArgument, "Invalid size number: {}", &caps[1]))?;

    let multiplier: u64 = match &caps[2] {
        "B" => 1,
        "K" | "KB" => 1024,
        "M" | "MB" => 1024 * 1024,
        "G" | "GB" => 1024 * 1024 * 1024,
        unit => crate::bail!(InvalidArgument, "Unknown unit: {}. Use B, K, M, or G", unit),
    };

    Ok((number * multiplier as f64) as u64)
}

/// Marker line appended or prepended when a file is windowed
pub const TRUNCATION_MARKER: &str = "... (truncated)";

/// Limit content to its first or last N lines
///
/// head-N keeps the first N lines and appends the truncation marker only when
/// exactly N lines were kept and the result is non-empty. tail-N keeps the
/// last N lines and always prepends the marker. The two limits are mutually
/// exclusive at the CLI boundary; `head` wins if both reach this function.
pub fn limit_lines(content: &str, head: Option<usize>, tail: Option<usize>) -> String {
    if let Some(n) = head {
        let lines: Vec<&str> = content.split('\n').take(n).collect();
        let kept = lines.len();
        let mut limited = lines.join("\n");
        if kept == n && !limited.is_empty() {
            limited.push_str(&format!("\n{}\n", TRUNCATION_MARKER));
        }
        limited
    } else if let Some(n) = tail {
        let lines: Vec<&str> = content.split('\n').collect();
        let start = lines.len().saturating_sub(n);
        format!("{}\n{}", TRUNCATION_MARKER, lines[start..].join("\n"))
    } else {
        content.to_string()
    }
}

/// Check whether a file looks like text
///
/// Reads up to 8 KiB and requires valid UTF-8 with a control-character ratio
/// under 10%. Files of 8 MB or more, empty files and unreadable files are
/// treated as non-text.
pub fn is_text_file(path: &Path) -> bool {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(_) => return false,
    };

    if !metadata.is_file() || metadata.len() >= 8_000_000 {
        return false;
    }

    let mut buffer = vec![0u8; std::cmp::min(8192, metadata.len() as usize)];
    if buffer.is_empty() {
        return false;
    }

    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };
    let bytes_read = match file.read(&mut buffer) {
        Ok(n) => n,
        Err(_) => return false,
    };
    buffer.truncate(bytes_read);

    if buffer.is_empty() || std::str::from_utf8(&buffer).is_err() {
        return false;
    }

    // Count binary characters (0x00-0x08, 0x0E-0x1F)
    let binary_count = buffer
        .iter()
        .filter(|&&b| (b < 9) || (b > 13 && b < 32))
        .count();

    (binary_count as f32 / buffer.len() as f32) < 0.1
}

/// Convert a path to its root-relative, forward-slash form
///
/// Returns `None` when the path is not under `base`; callers drop such paths.
pub fn relative_to(path: &Path, base: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    Some(
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
    )
}
