//! # Errors
//!
//! Every pricer validates its inputs before touching the formulas and reports
//! failures through [`PricingError`]. Failures are deterministic functions of
//! the inputs, so nothing here is retried.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
  /// Non-positive spot/strike/volatility, negative maturity, bad lattice parameters, ...
  #[error("invalid input: {0}")]
  InvalidInput(String),

  /// Option class text outside {Call, Put}
  #[error("invalid option class: {0:?} (expected \"Call\" or \"Put\")")]
  InvalidOptionClass(String),

  /// Division by zero, log of a non-positive number or a non-finite result
  #[error("numeric domain error: {0}")]
  NumericDomain(String),
}

pub type PricingResult<T> = Result<T, PricingError>;

impl PricingError {
  pub fn invalid_input(msg: impl Into<String>) -> Self {
    Self::InvalidInput(msg.into())
  }

  pub fn invalid_option_class(class: impl Into<String>) -> Self {
    Self::InvalidOptionClass(class.into())
  }

  pub fn numeric_domain(msg: impl Into<String>) -> Self {
    Self::NumericDomain(msg.into())
  }
}
