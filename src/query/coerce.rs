use serde_json::{Number, Value};

/// Turn a raw query token into the most specific comparable value.
///
/// Tries a 32-bit integer, then a finite double, then keeps the string.
pub fn coerce(raw: &str) -> Value {
    let trimmed = raw.trim();

    if let Ok(int) = trimmed.parse::<i32>() {
        return Value::Number(Number::from(int as i64));
    }

    if let Ok(float) = trimmed.parse::<f64>() {
        if let Some(number) = Number::from_f64(float) {
            return Value::Number(number);
        }
    }

    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer() {
        assert_eq!(coerce("42"), json!(42));
        assert_eq!(coerce("-7"), json!(-7));
        assert!(coerce("42").is_i64());
    }

    #[test]
    fn test_out_of_i32_range_becomes_double() {
        let v = coerce("3000000000");
        assert!(v.is_f64());
        assert_eq!(v.as_f64(), Some(3_000_000_000.0));
    }

    #[test]
    fn test_double() {
        assert_eq!(coerce("2.5"), json!(2.5));
        assert_eq!(coerce("1e3").as_f64(), Some(1000.0));
    }

    #[test]
    fn test_non_finite_stays_string() {
        assert_eq!(coerce("NaN"), json!("NaN"));
        assert_eq!(coerce("inf"), json!("inf"));
    }

    #[test]
    fn test_string_fallback() {
        assert_eq!(coerce("SF"), json!("SF"));
        assert_eq!(coerce(""), json!(""));
        assert_eq!(coerce("12abc"), json!("12abc"));
    }
}
