//! Boundary checks shared by the pricers.
//!
//! All of them run before any formula is evaluated so that a bad argument is
//! reported as [`PricingError::InvalidInput`] instead of surfacing later as a
//! NaN price.

use crate::error::PricingError;
use crate::error::PricingResult;

pub fn ensure_finite(name: &str, value: f64) -> PricingResult<f64> {
  if value.is_finite() {
    Ok(value)
  } else {
    Err(PricingError::invalid_input(format!(
      "{name} must be finite, got {value}"
    )))
  }
}

pub fn ensure_positive(name: &str, value: f64) -> PricingResult<f64> {
  ensure_finite(name, value)?;
  if value > 0.0 {
    Ok(value)
  } else {
    Err(PricingError::invalid_input(format!(
      "{name} must be > 0, got {value}"
    )))
  }
}

pub fn ensure_non_negative(name: &str, value: f64) -> PricingResult<f64> {
  ensure_finite(name, value)?;
  if value >= 0.0 {
    Ok(value)
  } else {
    Err(PricingError::invalid_input(format!(
      "{name} must be >= 0, got {value}"
    )))
  }
}

pub fn ensure_count(name: &str, value: usize) -> PricingResult<usize> {
  if value >= 1 {
    Ok(value)
  } else {
    Err(PricingError::invalid_input(format!("{name} must be >= 1")))
  }
}

/// Spot, strike and volatility strictly positive, rate finite, maturity non-negative.
pub fn ensure_market(s: f64, v: f64, k: f64, r: f64, tau: f64) -> PricingResult<()> {
  ensure_positive("spot", s)?;
  ensure_positive("strike", k)?;
  ensure_positive("volatility", v)?;
  ensure_finite("rate", r)?;
  ensure_non_negative("maturity", tau)?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn positive_rejects_zero_negative_and_nan() {
    assert!(ensure_positive("spot", 1.0).is_ok());
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
      assert!(matches!(
        ensure_positive("spot", bad),
        Err(PricingError::InvalidInput(_))
      ));
    }
  }

  #[test]
  fn non_negative_accepts_zero() {
    assert_eq!(ensure_non_negative("maturity", 0.0), Ok(0.0));
    assert!(ensure_non_negative("maturity", -1e-9).is_err());
  }

  #[test]
  fn count_rejects_zero() {
    assert!(ensure_count("steps", 0).is_err());
    assert_eq!(ensure_count("steps", 3), Ok(3));
  }

  #[test]
  fn market_message_names_the_offending_field() {
    let err = ensure_market(100.0, 0.2, -5.0, 0.05, 1.0).unwrap_err();
    assert!(err.to_string().contains("strike"));
  }
}
