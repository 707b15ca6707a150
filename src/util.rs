// NaN for an empty slice, which is what an all-missing column averages to
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let mut sum = 0.0;
    for i in values { sum += i }
    sum / values.len() as f64
}

// Up to six decimals, trailing zeros dropped but always one decimal left. 2 => "2.0", 1/3 => "0.333333"
pub fn format_float(val: f64) -> String {
    if val.is_nan() {
        return "NaN".to_string();
    }

    let fixed = format!("{val:.6}");
    let trimmed = fixed.trim_end_matches('0');
    let out = if trimmed.ends_with('.') { format!("{trimmed}0") } else { trimmed.to_string() };

    if out == "-0.0" { "0.0".to_string() } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(mean(&[4.5]), 4.5);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(2.0), "2.0");
        assert_eq!(format_float(1.0 / 3.0), "0.333333");
        assert_eq!(format_float(12.25), "12.25");
        assert_eq!(format_float(-1.5), "-1.5");
        assert_eq!(format_float(-0.0000001), "0.0");
        assert_eq!(format_float(f64::NAN), "NaN");
    }
}
