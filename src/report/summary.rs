//! Human-readable summary of extracted attributes.

use crate::extract::Attributes;

/// Attributes rendered with binary byte units instead of raw integers.
const BYTE_ATTRIBUTES: &[&str] = &["bytesSent", "bytesRecv"];

/// Format a byte count with binary units and one decimal place.
///
/// ```
/// assert_eq!(bep_metrics::report::format_bytes(2048), "2.0 KB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if value < 1024.0 {
            return format!("{value:.1} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.1} TB")
}

/// Render every attribute as an indented `name: value` line.
///
/// Byte counts that parse as integers are scaled; anything else, including
/// failed queries, is shown as-is.
pub fn render_summary(attributes: &Attributes) -> String {
    let mut out = String::from("Parsed attributes:\n");
    for attr in attributes.iter() {
        let value = match &attr.value {
            None => "(absent)".to_string(),
            Some(v) => {
                let text = v.to_string();
                match text.parse::<u64>() {
                    Ok(bytes) if BYTE_ATTRIBUTES.contains(&attr.name.as_str()) => {
                        format_bytes(bytes)
                    }
                    _ => text,
                }
            }
        };
        out.push_str(&format!("  {}: {}\n", attr.name, value));
    }
    out
}
