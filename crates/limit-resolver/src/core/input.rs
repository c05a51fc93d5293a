use std::num::NonZeroU64;

use serde_json::Value;

/// A limit exactly as a caller handed it over, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawLimitInput {
    #[default]
    Absent,
    Text(String),
    Integer(i128),
}

impl RawLimitInput {
    /// Case-insensitive match against the `all` token. No trimming: `" all"` is not `all`.
    pub fn is_all_token(&self) -> bool {
        match self {
            RawLimitInput::Text(s) => s.eq_ignore_ascii_case("all"),
            RawLimitInput::Absent | RawLimitInput::Integer(_) => false,
        }
    }

    /// The input as a positive count, if it reads as one.
    pub fn positive_count(&self) -> Option<NonZeroU64> {
        match self {
            RawLimitInput::Absent => None,
            RawLimitInput::Integer(n) if *n > 0 => {
                NonZeroU64::new(u64::try_from(*n).unwrap_or(u64::MAX))
            }
            RawLimitInput::Integer(_) => None,
            RawLimitInput::Text(s) => leading_positive_count(s),
        }
    }
}

impl From<&str> for RawLimitInput {
    fn from(s: &str) -> Self {
        RawLimitInput::Text(s.to_string())
    }
}

impl From<String> for RawLimitInput {
    fn from(s: String) -> Self {
        RawLimitInput::Text(s)
    }
}

impl From<i64> for RawLimitInput {
    fn from(n: i64) -> Self {
        RawLimitInput::Integer(i128::from(n))
    }
}

impl From<i32> for RawLimitInput {
    fn from(n: i32) -> Self {
        RawLimitInput::Integer(i128::from(n))
    }
}

impl From<u32> for RawLimitInput {
    fn from(n: u32) -> Self {
        RawLimitInput::Integer(i128::from(n))
    }
}

impl From<u64> for RawLimitInput {
    fn from(n: u64) -> Self {
        RawLimitInput::Integer(i128::from(n))
    }
}

impl From<usize> for RawLimitInput {
    fn from(n: usize) -> Self {
        RawLimitInput::Integer(n as i128)
    }
}

impl<T: Into<RawLimitInput>> From<Option<T>> for RawLimitInput {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or_default()
    }
}

impl From<&Value> for RawLimitInput {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => RawLimitInput::Absent,
            Value::String(s) => RawLimitInput::Text(s.clone()),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i.into()
                } else if let Some(u) = n.as_u64() {
                    u.into()
                } else {
                    // `as` truncates toward zero and saturates; NaN is not representable in JSON.
                    RawLimitInput::Integer(n.as_f64().unwrap_or(0.0) as i128)
                }
            }
            other => RawLimitInput::Text(other.to_string()),
        }
    }
}

/// Best-effort truncating parse: leading whitespace, optional sign, digits with
/// single underscores between them, stop at anything else. Only positive results
/// are returned; overflow saturates at `u64::MAX`.
fn leading_positive_count(s: &str) -> Option<NonZeroU64> {
    let s = s.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b');
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: u64 = 0;
    let mut prev_digit = false;
    for b in digits.bytes() {
        match b {
            b'0'..=b'9' => {
                value = value.saturating_mul(10).saturating_add(u64::from(b - b'0'));
                prev_digit = true;
            }
            b'_' if prev_digit => prev_digit = false,
            _ => break,
        }
    }

    if negative {
        return None;
    }
    NonZeroU64::new(value)
}
