//! SI prefix handling for element values.

use crate::error::{Error, Result};

/// Multiplier for a single SI prefix character.
///
/// Prefixes are case-sensitive except for kilo: `M` is mega and `m` is milli.
fn si_multiplier(c: char) -> Option<f64> {
    match c {
        'G' => Some(1e9),
        'M' => Some(1e6),
        'k' | 'K' => Some(1e3),
        'm' => Some(1e-3),
        // micro sign (U+00B5) and greek small mu (U+03BC) are both common
        'u' | 'µ' | 'μ' => Some(1e-6),
        'n' => Some(1e-9),
        'p' => Some(1e-12),
        _ => None,
    }
}

fn is_suffix_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, 'µ' | 'μ' | '%')
}

fn is_sign(c: char) -> bool {
    c == '+' || c == '-'
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Match `[+-]?[0-9]*\.?[0-9]+([eE][+-]?[0-9]+)?`.
fn is_decimal(s: &str) -> bool {
    let s = s.strip_prefix(is_sign).unwrap_or(s);
    let (mantissa, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    };

    let mantissa_ok = match mantissa.split_once('.') {
        Some((int, frac)) => (int.is_empty() || all_digits(int)) && all_digits(frac),
        None => all_digits(mantissa),
    };
    let exponent_ok = exponent.is_none_or(|e| all_digits(e.strip_prefix(is_sign).unwrap_or(e)));

    mantissa_ok && exponent_ok
}

/// Parse an element value with an optional SI prefix or percent suffix.
///
/// Accepted forms:
/// - plain numbers, including scientific notation (`220`, `1e-3`)
/// - a number followed by a prefix (`10k`, `4.7u`, `2.2M`)
/// - a number followed by a prefix and a unit (`5mA`, `10kOhm`); the first
///   suffix character that is a known prefix wins
/// - a percentage (`10%` is `0.1`)
///
/// ```
/// use voltaic_core::parse_value;
///
/// assert_eq!(parse_value("10k").unwrap(), 10_000.0);
/// assert_eq!(parse_value("2.2M").unwrap(), 2_200_000.0);
/// assert!(parse_value("12V").is_err());
/// ```
pub fn parse_value(token: &str) -> Result<f64> {
    let token = token.trim();

    if let Ok(v) = token.parse::<f64>() {
        return Ok(v);
    }

    // Split off the trailing run of suffix characters
    let split = token
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_suffix_char(c))
        .last()
        .map(|(i, _)| i)
        .ok_or_else(|| Error::InvalidValue(token.to_string()))?;

    let (number, suffix) = token.split_at(split);
    if !is_decimal(number) {
        return Err(Error::InvalidValue(token.to_string()));
    }
    let base: f64 = number
        .parse()
        .map_err(|_| Error::InvalidValue(token.to_string()))?;

    if suffix.ends_with('%') {
        return Ok(base / 100.0);
    }

    suffix
        .chars()
        .find_map(si_multiplier)
        .map(|multiplier| base * multiplier)
        .ok_or_else(|| Error::UnknownSuffix {
            token: token.to_string(),
            suffix: suffix.to_string(),
        })
}

/// Format a value with an engineering prefix.
pub fn format_value(value: f64) -> String {
    let abs_value = value.abs();

    let (scaled, suffix) = if abs_value >= 1e9 {
        (value / 1e9, "G")
    } else if abs_value >= 1e6 {
        (value / 1e6, "M")
    } else if abs_value >= 1e3 {
        (value / 1e3, "k")
    } else if abs_value >= 1.0 {
        (value, "")
    } else if abs_value >= 1e-3 {
        (value * 1e3, "m")
    } else if abs_value >= 1e-6 {
        (value * 1e6, "u")
    } else if abs_value >= 1e-9 {
        (value * 1e9, "n")
    } else if abs_value >= 1e-12 {
        (value * 1e12, "p")
    } else if abs_value == 0.0 {
        (0.0, "")
    } else {
        (value, "")
    };

    format!("{:.4}{}", scaled, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= b.abs() * 1e-12 + 1e-20
    }

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(parse_value("220").unwrap(), 220.0);
        assert_eq!(parse_value("-2.5").unwrap(), -2.5);
        assert_eq!(parse_value("1e-3").unwrap(), 1e-3);
        assert_eq!(parse_value("  12 ").unwrap(), 12.0);
    }

    #[test]
    fn test_parse_with_prefix() {
        assert!(approx_eq(parse_value("10k").unwrap(), 10_000.0));
        assert!(approx_eq(parse_value("4.7K").unwrap(), 4_700.0));
        assert!(approx_eq(parse_value("5m").unwrap(), 0.005));
        assert!(approx_eq(parse_value("2.2M").unwrap(), 2_200_000.0));
        assert!(approx_eq(parse_value("1G").unwrap(), 1e9));
        assert!(approx_eq(parse_value("3u").unwrap(), 3e-6));
        assert!(approx_eq(parse_value("3µ").unwrap(), 3e-6));
        assert!(approx_eq(parse_value("100n").unwrap(), 100e-9));
        assert!(approx_eq(parse_value("10p").unwrap(), 10e-12));
        assert!(approx_eq(parse_value("1e3k").unwrap(), 1e6));
        assert!(approx_eq(parse_value(".5k").unwrap(), 500.0));
    }

    #[test]
    fn test_parse_prefix_with_unit() {
        assert!(approx_eq(parse_value("5mA").unwrap(), 0.005));
        assert!(approx_eq(parse_value("10kOhm").unwrap(), 10_000.0));
        // 'e' and 'g' are not prefixes, 'm' is
        assert!(approx_eq(parse_value("1meg").unwrap(), 1e-3));
    }

    #[test]
    fn test_parse_percent() {
        assert!(approx_eq(parse_value("10%").unwrap(), 0.10));
        assert!(approx_eq(parse_value("2.5%").unwrap(), 0.025));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_value("abc"), Err(Error::InvalidValue("abc".into())));
        assert_eq!(parse_value(""), Err(Error::InvalidValue("".into())));
        assert_eq!(parse_value("10k5"), Err(Error::InvalidValue("10k5".into())));
        assert_eq!(parse_value("1.k"), Err(Error::InvalidValue("1.k".into())));
    }

    #[test]
    fn test_parse_unknown_suffix() {
        assert_eq!(
            parse_value("12V"),
            Err(Error::UnknownSuffix {
                token: "12V".into(),
                suffix: "V".into(),
            })
        );
        assert!(matches!(
            parse_value("5Hz"),
            Err(Error::UnknownSuffix { .. })
        ));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1000.0), "1.0000k");
        assert_eq!(format_value(0.001), "1.0000m");
        assert_eq!(format_value(1e-9), "1.0000n");
        assert_eq!(format_value(0.0), "0.0000");
        assert_eq!(format_value(-8.0), "-8.0000");
    }
}
