//! Forgiving typed lookups into a scene-kind parameter object.
//!
//! Each helper takes a JSON value, a key and a default. A missing key or a
//! value of the wrong type yields the default, so kind recipes always get a
//! usable value.

use serde_json::Value;

use crate::color::Rgba;

/// Extracts an `f64`, accepting integers too. Non-finite results fall back
/// to `default`.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params
        .get(name)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// Extracts a non-negative integer as `usize`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a `bool`.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a `String`.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Extracts a color given as `"#rrggbb"` or `"rgba(r,g,b,a)"`.
pub fn param_color(params: &Value, name: &str, default: Rgba) -> Rgba {
    params
        .get(name)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_reads_floats_and_integers() {
        let params = json!({"height": 250.5, "width": 400});
        assert_eq!(param_f64(&params, "height", 0.0), 250.5);
        assert_eq!(param_f64(&params, "width", 0.0), 400.0);
    }

    #[test]
    fn param_f64_falls_back_on_missing_or_wrong_type() {
        let params = json!({"height": "tall", "depth": null});
        assert_eq!(param_f64(&params, "height", 3.0), 3.0);
        assert_eq!(param_f64(&params, "depth", 4.0), 4.0);
        assert_eq!(param_f64(&params, "absent", 5.0), 5.0);
        assert_eq!(param_f64(&json!("not an object"), "height", 6.0), 6.0);
    }

    #[test]
    fn param_usize_rejects_negative_and_fractional() {
        let params = json!({"texture": 200, "neg": -1, "frac": 2.5});
        assert_eq!(param_usize(&params, "texture", 0), 200);
        assert_eq!(param_usize(&params, "neg", 7), 7);
        assert_eq!(param_usize(&params, "frac", 9), 9);
    }

    #[test]
    fn param_bool_reads_and_falls_back() {
        let params = json!({"fisherman": true, "count": 1});
        assert!(param_bool(&params, "fisherman", false));
        assert!(!param_bool(&params, "count", false));
        assert!(param_bool(&params, "missing", true));
    }

    #[test]
    fn param_string_reads_and_falls_back() {
        let params = json!({"style": "pine", "n": 3});
        assert_eq!(param_string(&params, "style", "willow"), "pine");
        assert_eq!(param_string(&params, "n", "willow"), "willow");
        assert_eq!(param_string(&json!({"style": ""}), "style", "x"), "");
    }

    #[test]
    fn param_color_accepts_hex_and_rgba() {
        let fallback = Rgba::gray(0, 1.0);
        let params = json!({"fill": "#102030", "stroke": "rgba(1,2,3,0.5)", "bad": 12});
        assert_eq!(param_color(&params, "fill", fallback), Rgba::new(16, 32, 48, 1.0));
        assert_eq!(param_color(&params, "stroke", fallback), Rgba::new(1, 2, 3, 0.5));
        assert_eq!(param_color(&params, "bad", fallback), fallback);
    }
}
