//! Recorded detector output: one JSON `DetectionResult` per line.
//!
//! ```text
//! # comments and blank lines are skipped
//! {"timestamp_ms": 0, "hands": [[{"x": 0.5, "y": 0.5}, ...21 points]]}
//! {"timestamp_ms": 33, "hands": []}
//! ```

use std::path::Path;
use sw_core::landmarks::DetectionResult;

/// Parse a JSON-lines recording.
///
/// # Errors
/// Reports the 1-based line number of the first unparseable record.
/// Structurally valid records with bad landmark data are kept; the state
/// machine rejects those per frame.
pub fn parse_recording(text: &str) -> Result<Vec<DetectionResult>, String> {
    let mut out = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if let Some(detection) = parse_line(line).map_err(|e| format!("line {}: {e}", i + 1))? {
            out.push(detection);
        }
    }
    Ok(out)
}

/// Parse one recording line; `Ok(None)` for blanks and comments.
pub fn parse_line(line: &str) -> Result<Option<DetectionResult>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| e.to_string())
}

pub fn load_recording(path: &Path) -> Result<Vec<DetectionResult>, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    parse_recording(&text)
}
