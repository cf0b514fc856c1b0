//! Duration validation

use serde_json::Value;
use tracing::warn;

use crate::error::TimerError;

/// Validate a countdown duration
///
/// Only a JSON number holding a non-negative whole number of seconds is
/// accepted; the value is returned unchanged. Numeric strings are rejected
/// just like any other non-number. Fractional values such as `2.5` are
/// rejected too, since the countdown only moves in whole-second ticks.
pub fn sanitize_duration(value: &Value) -> Result<u64, TimerError> {
    match value {
        Value::Number(number) => match number.as_u64() {
            Some(seconds) => Ok(seconds),
            // Floats like 5.0 are whole numbers too
            None => match number.as_f64() {
                Some(seconds)
                    if seconds >= 0.0 && seconds.fract() == 0.0 && seconds < u64::MAX as f64 =>
                {
                    Ok(seconds as u64)
                }
                _ => Err(invalid(value)),
            },
        },
        _ => Err(invalid(value)),
    }
}

fn invalid(value: &Value) -> TimerError {
    warn!("Rejected timer duration: {}", value);
    TimerError::InvalidDuration {
        value: value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_non_negative_numbers() {
        assert_eq!(sanitize_duration(&json!(10)), Ok(10));
        assert_eq!(sanitize_duration(&json!(0)), Ok(0));
        assert_eq!(sanitize_duration(&json!(5.0)), Ok(5));
        assert_eq!(sanitize_duration(&json!(u64::MAX)), Ok(u64::MAX));
    }

    #[test]
    fn rejects_everything_else() {
        let rejected = [
            json!(-1),
            json!("-1"),
            json!("1"),
            json!("ten"),
            json!(null),
            json!({}),
            json!([]),
            json!(true),
            json!(2.5),
            json!(-0.5),
            json!(18446744073709551616.0),
        ];

        for value in rejected {
            assert_eq!(
                sanitize_duration(&value),
                Err(TimerError::InvalidDuration { value: value.clone() }),
                "{} should be rejected",
                value
            );
        }
    }
}
