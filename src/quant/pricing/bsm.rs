//! # Black-Scholes
//!
//! $$
//! C=S\,\Phi(d_1)-Ke^{-rT}\Phi(d_2),\qquad P=Ke^{-rT}\Phi(-d_2)-S\,\Phi(-d_1)
//! $$
//!
//! with
//! $$
//! d_1=\frac{\ln(S/K)+(r+\tfrac12\sigma^2)T}{\sigma\sqrt T},\qquad d_2=d_1-\sigma\sqrt T.
//! $$
//!
//! At $T=0$ the price collapses to the intrinsic payoff.

use statrs::distribution::ContinuousCDF;
use statrs::distribution::Normal;

use crate::error::PricingError;
use crate::error::PricingResult;
use crate::quant::inputs::ensure_market;
use crate::quant::pricing::timed;
use crate::quant::OptionType;
use crate::traits::PricerExt;
use crate::traits::TimeExt;

#[derive(Debug, Clone, Copy)]
pub struct BSMPricer {
  /// Underlying price
  pub s: f64,
  /// Volatility
  pub v: f64,
  /// Strike price
  pub k: f64,
  /// Risk-free rate
  pub r: f64,
  /// Time to maturity in years
  pub tau: Option<f64>,
  /// Evaluation date
  pub eval: Option<chrono::NaiveDate>,
  /// Expiration date
  pub expiration: Option<chrono::NaiveDate>,
  /// Option type
  pub option_type: OptionType,
}

impl BSMPricer {
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    s: f64,
    v: f64,
    k: f64,
    r: f64,
    tau: Option<f64>,
    eval: Option<chrono::NaiveDate>,
    expiration: Option<chrono::NaiveDate>,
    option_type: OptionType,
  ) -> Self {
    Self {
      s,
      v,
      k,
      r,
      tau,
      eval,
      expiration,
      option_type,
    }
  }

  pub fn builder(s: f64, v: f64, k: f64, r: f64) -> BSMPricerBuilder {
    BSMPricerBuilder {
      s,
      v,
      k,
      r,
      tau: None,
      eval: None,
      expiration: None,
      option_type: OptionType::Call,
    }
  }

  /// Validated maturity in years.
  pub(crate) fn checked_tau(&self) -> PricingResult<f64> {
    let tau = self.tau_or_from_dates()?;
    ensure_market(self.s, self.v, self.k, self.r, tau)?;
    Ok(tau)
  }

  /// Validated `(tau, d1, d2)` for this contract, see [`d1_d2`].
  pub(crate) fn tau_d1_d2(&self) -> PricingResult<(f64, f64, f64)> {
    let tau = self.checked_tau()?;
    let (d1, d2) = d1_d2(self.s, self.v, self.k, self.r, tau)?;
    Ok((tau, d1, d2))
  }

  fn call_put(&self) -> PricingResult<(f64, f64)> {
    let tau = self.checked_tau()?;
    if tau == 0.0 {
      return Ok((
        OptionType::Call.payoff(self.s, self.k),
        OptionType::Put.payoff(self.s, self.k),
      ));
    }

    let (d1, d2) = d1_d2(self.s, self.v, self.k, self.r, tau)?;
    let n = Normal::default();
    let df = (-self.r * tau).exp();

    let call = self.s * n.cdf(d1) - self.k * df * n.cdf(d2);
    let put = self.k * df * n.cdf(-d2) - self.s * n.cdf(-d1);

    Ok((finite("call price", call)?, finite("put price", put)?))
  }
}

pub struct BSMPricerBuilder {
  s: f64,
  v: f64,
  k: f64,
  r: f64,
  tau: Option<f64>,
  eval: Option<chrono::NaiveDate>,
  expiration: Option<chrono::NaiveDate>,
  option_type: OptionType,
}

impl BSMPricerBuilder {
  pub fn tau(mut self, tau: f64) -> Self {
    self.tau = Some(tau);
    self
  }
  pub fn eval(mut self, eval: chrono::NaiveDate) -> Self {
    self.eval = Some(eval);
    self
  }
  pub fn expiration(mut self, expiration: chrono::NaiveDate) -> Self {
    self.expiration = Some(expiration);
    self
  }
  pub fn option_type(mut self, option_type: OptionType) -> Self {
    self.option_type = option_type;
    self
  }
  pub fn build(self) -> BSMPricer {
    BSMPricer {
      s: self.s,
      v: self.v,
      k: self.k,
      r: self.r,
      tau: self.tau,
      eval: self.eval,
      expiration: self.expiration,
      option_type: self.option_type,
    }
  }
}

impl PricerExt for BSMPricer {
  fn calculate_call_put(&self) -> PricingResult<(f64, f64)> {
    timed("black_scholes_call_put", self, || self.call_put())
  }

  fn calculate_price(&self) -> PricingResult<f64> {
    timed("black_scholes", self, || {
      let (call, put) = self.call_put()?;
      Ok(match self.option_type {
        OptionType::Call => call,
        OptionType::Put => put,
      })
    })
  }
}

impl TimeExt for BSMPricer {
  fn tau(&self) -> Option<f64> {
    self.tau
  }

  fn eval(&self) -> Option<chrono::NaiveDate> {
    self.eval
  }

  fn expiration(&self) -> Option<chrono::NaiveDate> {
    self.expiration
  }
}

/// The `d1`/`d2` terms shared by the closed-form price and every Greek.
///
/// Inputs are expected to be validated already; a zero `sigma * sqrt(tau)`
/// or a non-positive `s / k` is reported as [`PricingError::NumericDomain`].
pub(crate) fn d1_d2(s: f64, v: f64, k: f64, r: f64, tau: f64) -> PricingResult<(f64, f64)> {
  let vol_sqrt_t = v * tau.sqrt();
  if !(vol_sqrt_t > 0.0) {
    return Err(PricingError::numeric_domain(format!(
      "sigma * sqrt(T) must be > 0 (sigma={v}, T={tau})"
    )));
  }
  let moneyness = s / k;
  if !(moneyness > 0.0) {
    return Err(PricingError::numeric_domain(format!(
      "ln(S/K) undefined for S={s}, K={k}"
    )));
  }

  let d1 = (moneyness.ln() + (r + 0.5 * v.powi(2)) * tau) / vol_sqrt_t;
  let d2 = d1 - vol_sqrt_t;

  Ok((finite("d1", d1)?, finite("d2", d2)?))
}

pub(crate) fn finite(what: &str, x: f64) -> PricingResult<f64> {
  if x.is_finite() {
    Ok(x)
  } else {
    Err(PricingError::numeric_domain(format!("{what} is not finite ({x})")))
  }
}

/// Black-Scholes price of a European option.
pub fn black_scholes(
  r: f64,
  s: f64,
  k: f64,
  t: f64,
  sigma: f64,
  option_type: OptionType,
) -> PricingResult<f64> {
  BSMPricer::builder(s, sigma, k, r)
    .tau(t)
    .option_type(option_type)
    .build()
    .calculate_price()
}
