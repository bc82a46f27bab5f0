use std::str::FromStr;

use serde::{de::Error as _, Deserialize, Deserializer};

// query parameters that fail to parse fall back to their default, the same way
// a missing parameter does
pub fn deserialize_lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.trim().parse::<T>().ok()))
}

/// Integer body fields: JSON integers, floats without a fractional part
/// (`6.0`) and numeric strings are accepted; null, absent and empty strings are `None`.
pub fn deserialize_optional_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntegerLike {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Option::<IntegerLike>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IntegerLike::Int(n)) => Ok(Some(n)),
        Some(IntegerLike::Float(f))
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
        {
            Ok(Some(f as i64))
        }
        Some(IntegerLike::Float(f)) => Err(D::Error::custom(format!(
            "expected an integer, found {f}"
        ))),
        Some(IntegerLike::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(IntegerLike::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected an integer, found {s:?}"))),
    }
}
