//! # Traits
//!
//! $$
//! \text{Trait contracts: }\mathcal{A}:\text{inputs}\to\text{prices/sensitivities}
//! $$
//!
use crate::error::PricingError;
use crate::error::PricingResult;
use crate::quant::pricing::greeks::Greeks;

/// Pricer trait.
pub trait PricerExt: TimeExt {
  /// Calculate the call and put price.
  fn calculate_call_put(&self) -> PricingResult<(f64, f64)>;

  /// Calculate the price for the configured option type.
  fn calculate_price(&self) -> PricingResult<f64>;
}

/// Closed-form first-order sensitivities.
pub trait GreeksExt {
  fn delta(&self) -> PricingResult<f64>;

  fn gamma(&self) -> PricingResult<f64>;

  fn vega(&self) -> PricingResult<f64>;

  /// Time decay per calendar day.
  fn theta(&self) -> PricingResult<f64>;

  /// Sensitivity to a 1% move in the rate.
  fn rho(&self) -> PricingResult<f64>;

  /// All five at once.
  fn greeks(&self) -> PricingResult<Greeks> {
    Ok(Greeks::new(
      self.delta()?,
      self.gamma()?,
      self.vega()?,
      self.theta()?,
      self.rho()?,
    ))
  }
}

pub trait TimeExt {
  fn tau(&self) -> Option<f64>;

  fn eval(&self) -> Option<chrono::NaiveDate> {
    None
  }

  fn expiration(&self) -> Option<chrono::NaiveDate> {
    None
  }

  /// Return tau directly, or compute it from eval/expiration dates (ACT/365).
  fn tau_or_from_dates(&self) -> PricingResult<f64> {
    if let Some(tau) = self.tau() {
      return Ok(tau);
    }
    match (self.eval(), self.expiration()) {
      (Some(e), Some(x)) => {
        let days = x.signed_duration_since(e).num_days();
        if days < 0 {
          return Err(PricingError::invalid_input(format!(
            "expiration {x} is before evaluation date {e}"
          )));
        }
        Ok(days as f64 / 365.0)
      }
      _ => Err(PricingError::invalid_input(
        "either tau or both eval and expiration must be set",
      )),
    }
  }

  /// Calculate tau in days.
  fn calculate_tau_in_days(&self) -> PricingResult<f64> {
    Ok(self.tau_or_from_dates()? * 365.0)
  }
}
