use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\d)+").expect("valid regex"));

// Checked in this order, first hit wins regardless of where the word sits in the text.
// NOTE: "2 hours 30 minutes" therefore resolves to minutes with the number 2.
const UNITS: [&str; 4] = ["minute", "hour", "day", "week"];

/// Converts a relative time phrase like `"3 days ago"` to the canonical `"<n> <unit>s ago"`.
///
/// Text without a known unit is passed through trimmed.
/// Text with a unit but without an ASCII number fails with [`Error::MalformedTimeText`].
/// The number is kept as written, minus leading zeros, so it never overflows.
pub fn normalize_relative_time(text: &str) -> Result<String> {
    let trimmed = text.trim();
    let lowered = trimmed.to_lowercase();

    let Some(unit) = UNITS.iter().find(|unit| lowered.contains(*unit)) else {
        return Ok(trimmed.to_string());
    };

    let digits = NUMBER
        .find(&lowered)
        .ok_or_else(|| Error::MalformedTimeText(trimmed.to_string()))?
        .as_str();
    let n = match digits.trim_start_matches('0') {
        "" => "0",
        n => n,
    };

    Ok(format!("{n} {unit}s ago"))
}
