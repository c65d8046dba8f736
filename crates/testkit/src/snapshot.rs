//! Golden-file snapshot helper.
//!
//! Snapshots are canonical pretty JSON: object keys sorted, floats rounded to
//! [`FLOAT_DECIMALS`] places with negative zero folded to zero, trailing
//! newline. Single-precision positions therefore print as `0.6`, not
//! `0.6000000238418579`.
//!
//! Tests compare against the golden file on disk. To update goldens, rerun
//! with `BYLDR_UPDATE_SNAPSHOTS=1`.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Number, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that enables snapshot updates.
pub const UPDATE_SNAPSHOTS_ENV: &str = "BYLDR_UPDATE_SNAPSHOTS";

/// Decimal places kept for floating-point values.
pub const FLOAT_DECIMALS: i32 = 4;

/// Path of golden file `name` under `<manifest_dir>/tests/snapshots/`.
pub fn snapshot_path(manifest_dir: &str, name: &str) -> PathBuf {
    Path::new(manifest_dir).join("tests").join("snapshots").join(name)
}

/// Assert that `value` matches the JSON snapshot stored at `path`.
///
/// If `BYLDR_UPDATE_SNAPSHOTS=1` is set, the snapshot file is written/overwritten
/// with the current value instead.
pub fn assert_json_snapshot<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    let actual = canonical_json(value)?;

    if should_update_snapshots() {
        write_snapshot(path, &actual)?;
        return Ok(());
    }

    let expected = fs::read_to_string(path).with_context(|| {
        format!(
            "Snapshot missing at {} (run with {}=1 to create/update)",
            path.display(),
            UPDATE_SNAPSHOTS_ENV
        )
    })?;

    if expected != actual {
        let line = first_difference(&expected, &actual);
        anyhow::bail!(
            "Snapshot mismatch at {} line {} (run with {}=1 to update)\n  \
             expected: {}\n  actual:   {}",
            path.display(),
            line.0 + 1,
            UPDATE_SNAPSHOTS_ENV,
            line.1,
            line.2
        );
    }

    Ok(())
}

/// Serialize `value` the way snapshots are stored.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value).context("Failed to serialize snapshot value")?;
    let value = canonicalize_value(value);
    let mut s =
        serde_json::to_string_pretty(&value).context("Failed to format snapshot JSON")?;
    s.push('\n');
    Ok(s)
}

fn should_update_snapshots() -> bool {
    matches!(
        std::env::var(UPDATE_SNAPSHOTS_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE") | Ok("yes") | Ok("YES")
    )
}

fn write_snapshot(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create snapshot directory {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write snapshot {}", path.display()))
}

fn first_difference<'a>(expected: &'a str, actual: &'a str) -> (usize, &'a str, &'a str) {
    let mut expected_lines = expected.lines();
    let mut actual_lines = actual.lines();
    let mut index = 0;
    loop {
        match (expected_lines.next(), actual_lines.next()) {
            (Some(e), Some(a)) if e == a => index += 1,
            (e, a) => return (index, e.unwrap_or("<eof>"), a.unwrap_or("<eof>")),
        }
    }
}

fn round_float(value: f64) -> f64 {
    let scale = 10f64.powi(FLOAT_DECIMALS);
    // adding 0.0 turns -0.0 into 0.0
    (value * scale).round() / scale + 0.0
}

fn canonicalize_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut out = serde_json::Map::with_capacity(entries.len());
            for (k, v) in entries {
                out.insert(k, canonicalize_value(v));
            }
            Value::Object(out)
        }
        Value::Array(values) => {
            Value::Array(values.into_iter().map(canonicalize_value).collect())
        }
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .and_then(|f| Number::from_f64(round_float(f)))
            .map_or(Value::Number(n), Value::Number),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn floats_are_rounded_and_keys_sorted() {
        let value = json!({ "z": 0.6f32, "a": -0.0, "m": [1, 1.8f32] });
        let text = canonical_json(&value).expect("serializable");
        assert_eq!(
            text,
            "{\n  \"a\": 0.0,\n  \"m\": [\n    1,\n    1.8\n  ],\n  \"z\": 0.6\n}\n"
        );
    }

    #[test]
    fn first_difference_reports_the_line() {
        assert_eq!(first_difference("a\nb\nc", "a\nx\nc"), (1, "b", "x"));
        assert_eq!(first_difference("a", "a\nb"), (1, "<eof>", "b"));
    }
}
