//! # Greeks
//!
//! Closed-form Black-Scholes sensitivities built on the same $d_1, d_2$ as the
//! price:
//! $$
//! \Delta_C=\Phi(d_1),\quad \Delta_P=-\Phi(-d_1),\quad
//! \Gamma=\frac{\varphi(d_1)}{S\sigma\sqrt T},\quad
//! \mathcal V=S\varphi(d_1)\sqrt T
//! $$
//! $$
//! \Theta_{C/P}=-\frac{S\varphi(d_1)\sigma}{2\sqrt T}\mp rKe^{-rT}\Phi(\pm d_2),\qquad
//! \rho_{C/P}=\pm KTe^{-rT}\Phi(\pm d_2)
//! $$
//!
//! `theta` divides the carry term by 365 and leaves the decay term annual.
//! `theta_annual` and `theta_per_day` give the uniform figures. `rho` is per
//! 1% rate move. Every Greek needs $\sigma\sqrt T>0$, so $T=0$ is a numeric
//! domain error here.

use impl_new_derive::ImplNew;
use statrs::distribution::Continuous;
use statrs::distribution::ContinuousCDF;
use statrs::distribution::Normal;

use crate::error::PricingResult;
use crate::quant::pricing::bsm::BSMPricer;
use crate::quant::pricing::timed;
use crate::quant::OptionType;
use crate::traits::GreeksExt;

/// Calendar days in the theta carry term.
pub const DAYS_PER_YEAR: f64 = 365.0;

#[derive(ImplNew, Debug, Default, Clone, Copy, PartialEq)]
pub struct Greeks {
  pub delta: f64,
  pub gamma: f64,
  pub vega: f64,
  /// Annual decay plus carry per day
  pub theta: f64,
  /// Per 1% rate move
  pub rho: f64,
}

impl BSMPricer {
  fn theta_terms(&self) -> PricingResult<(f64, f64)> {
    let (tau, d1, d2) = self.tau_d1_d2()?;
    let n = Normal::default();

    let decay = -(self.s * n.pdf(d1) * self.v) / (2.0 * tau.sqrt());
    let carry = self.r * self.k * (-self.r * tau).exp();

    Ok(match self.option_type {
      OptionType::Call => (decay, -carry * n.cdf(d2)),
      OptionType::Put => (decay, carry * n.cdf(-d2)),
    })
  }

  /// Annualised theta, both terms per year.
  pub fn theta_annual(&self) -> PricingResult<f64> {
    let (decay, carry) = self.theta_terms()?;
    Ok(decay + carry)
  }

  /// Annualised theta with both terms divided by [`DAYS_PER_YEAR`].
  pub fn theta_per_day(&self) -> PricingResult<f64> {
    Ok(self.theta_annual()? / DAYS_PER_YEAR)
  }
}

impl GreeksExt for BSMPricer {
  fn delta(&self) -> PricingResult<f64> {
    timed("delta", self, || {
      let (_, d1, _) = self.tau_d1_d2()?;
      let n = Normal::default();

      Ok(match self.option_type {
        OptionType::Call => n.cdf(d1),
        OptionType::Put => -n.cdf(-d1),
      })
    })
  }

  fn gamma(&self) -> PricingResult<f64> {
    timed("gamma", self, || {
      let (tau, d1, _) = self.tau_d1_d2()?;
      let n = Normal::default();

      Ok(n.pdf(d1) / (self.s * self.v * tau.sqrt()))
    })
  }

  fn vega(&self) -> PricingResult<f64> {
    timed("vega", self, || {
      let (tau, d1, _) = self.tau_d1_d2()?;
      let n = Normal::default();

      Ok(self.s * n.pdf(d1) * tau.sqrt())
    })
  }

  /// Decay term per year, carry term divided by [`DAYS_PER_YEAR`].
  fn theta(&self) -> PricingResult<f64> {
    timed("theta", self, || {
      let (decay, carry) = self.theta_terms()?;
      Ok(decay + carry / DAYS_PER_YEAR)
    })
  }

  fn rho(&self) -> PricingResult<f64> {
    timed("rho", self, || {
      let (tau, _, d2) = self.tau_d1_d2()?;
      let n = Normal::default();
      let exp_rt = (-self.r * tau).exp();

      Ok(match self.option_type {
        OptionType::Call => self.k * tau * exp_rt * n.cdf(d2) / 100.0,
        OptionType::Put => -self.k * tau * exp_rt * n.cdf(-d2) / 100.0,
      })
    })
  }
}

fn pricer(r: f64, s: f64, k: f64, t: f64, sigma: f64, option_type: OptionType) -> BSMPricer {
  BSMPricer::new(s, sigma, k, r, Some(t), None, None, option_type)
}

/// Sensitivity of the price to the spot.
pub fn delta(
  r: f64,
  s: f64,
  k: f64,
  t: f64,
  sigma: f64,
  option_type: OptionType,
) -> PricingResult<f64> {
  pricer(r, s, k, t, sigma, option_type).delta()
}

/// Sensitivity of delta to the spot (same for calls and puts).
pub fn gamma(r: f64, s: f64, k: f64, t: f64, sigma: f64) -> PricingResult<f64> {
  pricer(r, s, k, t, sigma, OptionType::Call).gamma()
}

/// Sensitivity to volatility (same for calls and puts).
pub fn vega(r: f64, s: f64, k: f64, t: f64, sigma: f64) -> PricingResult<f64> {
  pricer(r, s, k, t, sigma, OptionType::Call).vega()
}

/// Time decay, with the carry term quoted per calendar day.
pub fn theta(
  r: f64,
  s: f64,
  k: f64,
  t: f64,
  sigma: f64,
  option_type: OptionType,
) -> PricingResult<f64> {
  pricer(r, s, k, t, sigma, option_type).theta()
}

/// Sensitivity to a 1% move in the rate.
pub fn rho(
  r: f64,
  s: f64,
  k: f64,
  t: f64,
  sigma: f64,
  option_type: OptionType,
) -> PricingResult<f64> {
  pricer(r, s, k, t, sigma, option_type).rho()
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use approx::assert_relative_eq;

  use super::*;
  use crate::error::PricingError;
  use crate::traits::PricerExt;

  const R: f64 = 0.01;
  const S: f64 = 30.0;
  const K: f64 = 40.0;
  const T: f64 = 240.0 / 365.0;
  const SIGMA: f64 = 0.30;

  #[test]
  fn reference_greeks() {
    let call = pricer(R, S, K, T, SIGMA, OptionType::Call).greeks().unwrap();
    let put = pricer(R, S, K, T, SIGMA, OptionType::Put).greeks().unwrap();

    assert_abs_diff_eq!(call.delta, 0.15058613984880015, epsilon = 1e-9);
    assert_abs_diff_eq!(put.delta, -0.8494138601511998, epsilon = 1e-9);
    assert_abs_diff_eq!(call.gamma, 0.03203161102008452, epsilon = 1e-9);
    assert_abs_diff_eq!(call.vega, 5.686707929045142, epsilon = 1e-9);
    assert_abs_diff_eq!(call.theta, -1.2973899531576865, epsilon = 1e-9);
    assert_abs_diff_eq!(put.theta, -1.2963012449628422, epsilon = 1e-9);
    assert_abs_diff_eq!(call.rho, 0.026329642623281496, epsilon = 1e-9);
    assert_abs_diff_eq!(put.rho, -0.23496032413932816, epsilon = 1e-9);

    assert_eq!(call.gamma, put.gamma);
    assert_eq!(call.vega, put.vega);
  }

  #[test]
  fn delta_put_call_parity() {
    let call = delta(R, S, K, T, SIGMA, OptionType::Call).unwrap();
    let put = delta(R, S, K, T, SIGMA, OptionType::Put).unwrap();
    assert_abs_diff_eq!(call - put, 1.0, epsilon = 1e-12);
  }

  #[test]
  fn gamma_and_vega_are_positive() {
    for s in [50.0, 80.0, 100.0, 120.0, 150.0] {
      for t in [0.05, 0.5, 2.0] {
        for v in [0.1, 0.3, 0.8] {
          assert!(gamma(0.03, s, 100.0, t, v).unwrap() > 0.0);
          assert!(vega(0.03, s, 100.0, t, v).unwrap() > 0.0);
        }
      }
    }
  }

  #[test]
  fn delta_matches_finite_difference_of_price() {
    let h = 1e-4;
    let up = pricer(R, S + h, K, T, SIGMA, OptionType::Call)
      .calculate_price()
      .unwrap();
    let down = pricer(R, S - h, K, T, SIGMA, OptionType::Call)
      .calculate_price()
      .unwrap();
    let fd = (up - down) / (2.0 * h);
    assert_relative_eq!(delta(R, S, K, T, SIGMA, OptionType::Call).unwrap(), fd, max_relative = 1e-5);
  }

  #[test]
  fn theta_divides_only_the_carry_term_by_days() {
    for option_type in [OptionType::Call, OptionType::Put] {
      let p = pricer(R, S, K, T, SIGMA, option_type);
      let (decay, carry) = p.theta_terms().unwrap();
      assert_abs_diff_eq!(p.theta().unwrap(), decay + carry / DAYS_PER_YEAR, epsilon = 1e-12);
      assert_abs_diff_eq!(p.theta_annual().unwrap(), decay + carry, epsilon = 1e-12);
      assert_abs_diff_eq!(
        p.theta_per_day().unwrap() * DAYS_PER_YEAR,
        p.theta_annual().unwrap(),
        epsilon = 1e-12
      );
    }
  }

  #[test]
  fn theta_annual_matches_finite_difference_in_time() {
    let h = 1e-5;
    let later = pricer(R, S, K, T + h, SIGMA, OptionType::Call)
      .calculate_price()
      .unwrap();
    let sooner = pricer(R, S, K, T - h, SIGMA, OptionType::Call)
      .calculate_price()
      .unwrap();
    let fd = -(later - sooner) / (2.0 * h);
    let annual = pricer(R, S, K, T, SIGMA, OptionType::Call)
      .theta_annual()
      .unwrap();
    assert_relative_eq!(annual, fd, max_relative = 1e-5);
  }

  #[test]
  fn rho_scaled_per_percent() {
    let h = 1e-5;
    let up = pricer(R + h, S, K, T, SIGMA, OptionType::Call)
      .calculate_price()
      .unwrap();
    let down = pricer(R - h, S, K, T, SIGMA, OptionType::Call)
      .calculate_price()
      .unwrap();
    let fd_per_percent = (up - down) / (2.0 * h) / 100.0;
    assert_relative_eq!(rho(R, S, K, T, SIGMA, OptionType::Call).unwrap(), fd_per_percent, max_relative = 1e-5);
  }

  #[test]
  fn zero_maturity_is_numeric_domain_error() {
    for res in [
      delta(R, S, K, 0.0, SIGMA, OptionType::Call),
      gamma(R, S, K, 0.0, SIGMA),
      vega(R, S, K, 0.0, SIGMA),
      theta(R, S, K, 0.0, SIGMA, OptionType::Put),
      rho(R, S, K, 0.0, SIGMA, OptionType::Put),
    ] {
      assert!(matches!(res, Err(PricingError::NumericDomain(_))));
    }
  }

  #[test]
  fn invalid_inputs_are_rejected_before_the_formulas() {
    assert!(matches!(
      gamma(R, -S, K, T, SIGMA),
      Err(PricingError::InvalidInput(_))
    ));
    assert!(matches!(
      vega(R, S, K, T, 0.0),
      Err(PricingError::InvalidInput(_))
    ));
    assert!(matches!(
      theta(R, S, K, -T, SIGMA, OptionType::Call),
      Err(PricingError::InvalidInput(_))
    ));
  }
}
