//! # Pricing
//!
//! $$
//! V_0=\mathbb E^{\mathbb Q}\!\left[e^{-rT}\,\Pi(S_T)\right]
//! $$
//!
use std::fmt::Debug;
use std::time::Instant;

use crate::error::PricingResult;

pub mod binomial;
pub mod bsm;
pub mod greeks;
pub mod monte_carlo;

/// Default spot price
pub const S0: f64 = 100.0;
/// Default strike price
pub const K: f64 = 100.0;
/// Default number of lattice steps
pub const N_STEPS: usize = 100;
/// Default number of Monte Carlo paths
pub const SIMULATIONS: usize = 10_000;

/// Run one pricing call and report its arguments, result and duration.
pub(crate) fn timed<T: Debug>(
  op: &'static str,
  args: &dyn Debug,
  f: impl FnOnce() -> PricingResult<T>,
) -> PricingResult<T> {
  let start = Instant::now();
  let result = f();
  let elapsed_us = start.elapsed().as_micros() as u64;

  match &result {
    Ok(value) => tracing::debug!(op, ?args, ?value, elapsed_us, "priced"),
    Err(err) => tracing::warn!(op, ?args, %err, elapsed_us, "pricing failed"),
  }

  result
}

#[cfg(test)]
mod tests {
  use tracing_test::traced_test;

  use super::*;
  use crate::error::PricingError;

  #[traced_test]
  #[test]
  fn timed_reports_success() {
    let out = timed("unit", &(1.0, 2.0), || Ok(3.0));
    assert_eq!(out, Ok(3.0));
    assert!(logs_contain("priced"));
    assert!(logs_contain("unit"));
  }

  #[traced_test]
  #[test]
  fn timed_reports_failure_and_passes_error_through() {
    let out: PricingResult<f64> = timed("unit", &(), || {
      Err(PricingError::numeric_domain("boom"))
    });
    assert_eq!(out, Err(PricingError::numeric_domain("boom")));
    assert!(logs_contain("pricing failed"));
  }
}
