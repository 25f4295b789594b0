// ==========================================
// Ministry Performance Tracking - Ratio Computer
// ==========================================
// Responsibility: the single implementation of performance-over-target
// ratios, shared by report aggregation and the on-demand detail path.
// Rule: a non-numeric input or a zero target yields NoRatio, never a
// panic or a propagated NaN.
// ==========================================

use serde::Serialize;
use serde_json::Value;
use std::fmt;

// ==========================================
// RatioValue
// ==========================================
/// Outcome of a ratio computation: a rounded percentage, or the
/// explicit "no ratio" sentinel rendered as a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RatioValue {
    Percent(i64),
    NoRatio,
}

impl RatioValue {
    pub fn percent(&self) -> Option<i64> {
        match self {
            RatioValue::Percent(value) => Some(*value),
            RatioValue::NoRatio => None,
        }
    }
}

impl fmt::Display for RatioValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatioValue::Percent(value) => write!(f, "{}", value),
            RatioValue::NoRatio => write!(f, "-"),
        }
    }
}

// ==========================================
// Numeric coercion
// ==========================================
/// Coerce a raw producer value to a finite number. JSON numbers and
/// numeric strings count; everything else is non-numeric.
pub fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

// ==========================================
// Ratio computation
// ==========================================

/// Ratio from raw producer values (absent or non-numeric guarded)
pub fn ratio_percent(performance: Option<&Value>, target: Option<&Value>) -> RatioValue {
    match (performance.and_then(as_number), target.and_then(as_number)) {
        (Some(performance), Some(target)) => ratio_percent_f64(performance, target),
        _ => RatioValue::NoRatio,
    }
}

/// Ratio from already-numeric inputs: performance / target x 100,
/// rounded to an integer; zero target yields NoRatio.
pub fn ratio_percent_f64(performance: f64, target: f64) -> RatioValue {
    if target == 0.0 || !performance.is_finite() || !target.is_finite() {
        return RatioValue::NoRatio;
    }
    let percent = (performance / target) * 100.0;
    if !percent.is_finite() {
        return RatioValue::NoRatio;
    }
    RatioValue::Percent(percent.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ratio_basic() {
        assert_eq!(ratio_percent_f64(80.0, 100.0), RatioValue::Percent(80));
        assert_eq!(ratio_percent_f64(75.0, 100.0), RatioValue::Percent(75));
        assert_eq!(ratio_percent_f64(1.0, 3.0), RatioValue::Percent(33));
        assert_eq!(ratio_percent_f64(2.0, 3.0), RatioValue::Percent(67));
        assert_eq!(ratio_percent_f64(110.0, 100.0), RatioValue::Percent(110));
    }

    #[test]
    fn test_ratio_zero_target_is_no_ratio() {
        assert_eq!(ratio_percent_f64(5.0, 0.0), RatioValue::NoRatio);
        assert_eq!(ratio_percent(Some(&json!(5)), Some(&json!(0))), RatioValue::NoRatio);
    }

    #[test]
    fn test_ratio_non_numeric_is_no_ratio() {
        assert_eq!(ratio_percent(Some(&json!("abc")), Some(&json!(50))), RatioValue::NoRatio);
        assert_eq!(ratio_percent(Some(&json!(null)), Some(&json!(50))), RatioValue::NoRatio);
        assert_eq!(ratio_percent(None, Some(&json!(50))), RatioValue::NoRatio);
        assert_eq!(ratio_percent(Some(&json!(80)), None), RatioValue::NoRatio);
    }

    #[test]
    fn test_ratio_numeric_strings_are_accepted() {
        assert_eq!(
            ratio_percent(Some(&json!("80")), Some(&json!("100"))),
            RatioValue::Percent(80)
        );
        assert_eq!(ratio_percent(Some(&json!(" 75 ")), Some(&json!(100))), RatioValue::Percent(75));
    }

    #[test]
    fn test_as_number() {
        assert_eq!(as_number(&json!(42)), Some(42.0));
        assert_eq!(as_number(&json!(4.5)), Some(4.5));
        assert_eq!(as_number(&json!("12.5")), Some(12.5));
        assert_eq!(as_number(&json!("abc")), None);
        assert_eq!(as_number(&json!(true)), None);
        assert_eq!(as_number(&json!(null)), None);
        assert_eq!(as_number(&json!([1])), None);
    }

    #[test]
    fn test_display_renders_placeholder() {
        assert_eq!(RatioValue::Percent(75).to_string(), "75");
        assert_eq!(RatioValue::NoRatio.to_string(), "-");
    }
}
