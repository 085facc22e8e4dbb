use crate::HnError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, HnError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HnError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, HnError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(HnError::InvalidArg { what })
    }
}

/// Parse a numeric token the way the legacy input reader does: surrounding
/// whitespace is ignored and anything unparseable yields `None`.
pub fn parse_real(token: &str) -> Option<Real> {
    token.trim().parse::<Real>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero() {
        assert!(ensure_positive(0.0, "dt").is_err());
        assert!(ensure_positive(-1.0, "dt").is_err());
        assert_eq!(ensure_positive(0.5, "dt").unwrap(), 0.5);
    }

    #[test]
    fn parse_real_tokens() {
        assert_eq!(parse_real(" 4022.31 "), Some(4022.31));
        assert_eq!(parse_real("100"), Some(100.0));
        assert_eq!(parse_real("ELEV"), None);
    }
}
