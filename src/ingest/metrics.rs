//! Per-record metric extraction
//!
//! Volume comes from an owners range such as `"20000 - 50000"`; only the
//! lower bound is used. Satisfaction is `positive / (positive + negative) * 100`.
//! Neither ever fails a record: a malformed owners range contributes 0 and an
//! uncomputable ratio contributes no sample at all.

use serde_json::Value;
use thiserror::Error;

/// Why an owners range could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricError {
    #[error("owners range '{0}' is not '<lower> - <upper>' or a bare integer")]
    MalformedRange(String),

    #[error("owners value {0} is not an integer")]
    NotAnInteger(String),

    #[error("owners value {0} is negative")]
    Negative(i64),
}

/// Parse the owners cell. `Ok(None)` when the cell is absent (null).
///
/// Owner counts are never negative: a negative number is rejected just like
/// the string `"-5"`, which does not parse as a range.
pub fn try_volume_estimate(cell: &Value) -> Result<Option<i64>, MetricError> {
    let volume = match cell {
        Value::Null => return Ok(None),
        Value::Number(n) => match n.as_i64() {
            Some(v) => v,
            None => match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => f as i64,
                _ => return Err(MetricError::NotAnInteger(n.to_string())),
            },
        },
        Value::String(text) => parse_range_lower(text)?,
        other => return Err(MetricError::NotAnInteger(other.to_string())),
    };
    if volume < 0 {
        return Err(MetricError::Negative(volume));
    }
    Ok(Some(volume))
}

fn parse_range_lower(text: &str) -> Result<i64, MetricError> {
    let malformed = || MetricError::MalformedRange(text.to_string());
    let trimmed = text.trim();
    let (lower, upper) = match trimmed.split_once('-') {
        Some((lower, upper)) => (lower, Some(upper)),
        None => (trimmed, None),
    };

    let lower: i64 = lower.trim().parse().map_err(|_| malformed())?;
    if let Some(upper) = upper {
        upper.trim().parse::<i64>().map_err(|_| malformed())?;
    }
    Ok(lower)
}

/// Read a review count: a JSON number or a numeric string.
fn review_count(cell: &Value) -> Option<f64> {
    let count = match cell {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (count.is_finite() && count >= 0.0).then_some(count)
}

/// Satisfaction ratio in [0, 100], or `None` when either count is missing,
/// non-numeric, or both are zero.
pub fn satisfaction_ratio(positive: &Value, negative: &Value) -> Option<f64> {
    let positive = review_count(positive)?;
    let negative = review_count(negative)?;
    let total = positive + negative;
    (total > 0.0).then(|| positive / total * 100.0)
}
