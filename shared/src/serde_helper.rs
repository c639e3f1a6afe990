//! 宽松数值反序列化
//!
//! 后端（Laravel decimal 列）会把金额序列化为字符串，例如 `"150.00"`，
//! 聚合字段有时是数字、有时是字符串，`null` 视为 0。

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// 数字或数字字符串 -> `f64`
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0.0),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom("amount out of range")),
        Value::String(s) => parse_decimal(&s).map_err(de::Error::custom),
        other => Err(de::Error::custom(format!(
            "expected number or numeric string, got {}",
            other
        ))),
    }
}

/// 数字或数字字符串 -> `u64`
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .ok_or_else(|| de::Error::custom("count must be a non-negative number")),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|e| de::Error::custom(format!("invalid count '{}': {}", s, e))),
        other => Err(de::Error::custom(format!(
            "expected number or numeric string, got {}",
            other
        ))),
    }
}

/// 解析十进制字符串，兼容逗号小数点（"1.234,56" 不支持，只替换单个逗号）
pub fn parse_decimal(s: &str) -> Result<f64, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("empty amount".to_string());
    }
    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replacen(',', ".", 1)
    } else {
        trimmed.to_string()
    };
    normalized
        .parse::<f64>()
        .map_err(|e| format!("invalid amount '{}': {}", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "lenient_amount")]
        amount: f64,
        #[serde(deserialize_with = "lenient_count")]
        count: u64,
    }

    fn decode_sample(v: Value) -> Result<Sample, serde_json::Error> {
        serde_json::from_value(v)
    }

    #[test]
    fn accepts_numbers_strings_and_null() {
        let p = decode_sample(serde_json::json!({ "amount": "12.5", "count": 3 })).unwrap();
        assert_eq!(p.amount, 12.5);
        assert_eq!(p.count, 3);

        let p = decode_sample(serde_json::json!({ "amount": null, "count": "7" })).unwrap();
        assert_eq!(p.amount, 0.0);
        assert_eq!(p.count, 7);
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode_sample(serde_json::json!({ "amount": "abc", "count": 1 })).is_err());
        assert!(decode_sample(serde_json::json!({ "amount": 1, "count": -2 })).is_err());
        assert!(decode_sample(serde_json::json!({ "amount": [], "count": 1 })).is_err());
    }

    #[test]
    fn decimal_comma() {
        assert_eq!(parse_decimal("10,75"), Ok(10.75));
        assert_eq!(parse_decimal(" 3 "), Ok(3.0));
        assert!(parse_decimal("").is_err());
    }
}
