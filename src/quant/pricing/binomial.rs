//! # Binomial Tree (American Options)
//!
//! Backward induction on a recombining lattice (discrete Snell envelope):
//! $$
//! V_N = g(S_N),\qquad
//! V_i = \max\left(g(S_i),\ e^{-r\Delta t}\left[qV_{i+1}^{u} + (1-q)V_{i+1}^{d}\right]\right),
//! $$
//! with
//! $$
//! \Delta t = T/N,\qquad q=\frac{e^{r\Delta t}-d}{u-d}.
//! $$
//!
//! Node $j$ at level $i$ carries spot $S_0 u^j d^{i-j}$. The European style
//! drops the $\max$ with the exercise value $g$. At $T=0$ the lattice is
//! validated and the price is the payoff at $S_0$.
//!
//! Source:
//! - Cox-Ross-Rubinstein binomial tree discretization

use crate::error::PricingError;
use crate::error::PricingResult;
use crate::quant::inputs::ensure_count;
use crate::quant::inputs::ensure_finite;
use crate::quant::inputs::ensure_non_negative;
use crate::quant::inputs::ensure_positive;
use crate::quant::pricing::timed;
use crate::quant::OptionStyle;
use crate::quant::OptionType;
use crate::traits::PricerExt;
use crate::traits::TimeExt;

#[derive(Debug, Clone, Copy)]
pub struct BinomialPricer {
  /// Spot level $S_0$.
  pub s: f64,
  /// Strike $K$.
  pub k: f64,
  /// Risk-free rate $r$.
  pub r: f64,
  /// Up factor per step.
  pub u: f64,
  /// Down factor per step.
  pub d: f64,
  /// Number of binomial time steps.
  pub steps: usize,
  /// Time-to-maturity in years.
  pub tau: Option<f64>,
  /// Evaluation date (optional if `tau` is set).
  pub eval: Option<chrono::NaiveDate>,
  /// Expiration date (optional if `tau` is set).
  pub expiration: Option<chrono::NaiveDate>,
  /// Option direction.
  pub option_type: OptionType,
  /// American (early exercise) or European.
  pub style: OptionStyle,
}

/// Per-step quantities of a validated lattice.
#[derive(Debug, Clone, Copy)]
struct Lattice {
  tau: f64,
  u: f64,
  d: f64,
  q: f64,
  disc: f64,
}

impl BinomialPricer {
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    s: f64,
    k: f64,
    r: f64,
    u: f64,
    d: f64,
    steps: usize,
    tau: Option<f64>,
    eval: Option<chrono::NaiveDate>,
    expiration: Option<chrono::NaiveDate>,
    option_type: OptionType,
    style: OptionStyle,
  ) -> Self {
    Self {
      s,
      k,
      r,
      u,
      d,
      steps,
      tau,
      eval,
      expiration,
      option_type,
      style,
    }
  }

  /// Cox-Ross-Rubinstein factors $u=e^{\sigma\sqrt{\Delta t}}$, $d=1/u$.
  pub fn crr(
    s: f64,
    v: f64,
    k: f64,
    r: f64,
    steps: usize,
    tau: f64,
    option_type: OptionType,
  ) -> PricingResult<Self> {
    ensure_positive("volatility", v)?;
    ensure_positive("maturity", tau)?;
    ensure_count("steps", steps)?;

    let u = (v * (tau / steps as f64).sqrt()).exp();
    Ok(Self::new(
      s,
      k,
      r,
      u,
      1.0 / u,
      steps,
      Some(tau),
      None,
      None,
      option_type,
      OptionStyle::American,
    ))
  }

  pub fn with_style(mut self, style: OptionStyle) -> Self {
    self.style = style;
    self
  }

  fn lattice(&self) -> PricingResult<Lattice> {
    let tau = self.tau_or_from_dates()?;
    ensure_positive("spot", self.s)?;
    ensure_positive("strike", self.k)?;
    ensure_finite("rate", self.r)?;
    ensure_non_negative("maturity", tau)?;
    ensure_count("steps", self.steps)?;
    ensure_positive("down factor", self.d)?;
    ensure_finite("up factor", self.u)?;
    if self.u <= self.d {
      return Err(PricingError::invalid_input(format!(
        "up factor must exceed down factor (u={}, d={})",
        self.u, self.d
      )));
    }

    let dt = tau / self.steps as f64;
    let q = ((self.r * dt).exp() - self.d) / (self.u - self.d);
    if !(0.0..=1.0).contains(&q) {
      return Err(PricingError::invalid_input(format!(
        "risk-neutral probability out of range: q={q}, the lattice admits arbitrage"
      )));
    }

    Ok(Lattice {
      tau,
      u: self.u,
      d: self.d,
      q,
      disc: (-self.r * dt).exp(),
    })
  }

  fn price_tree(&self, option_type: OptionType) -> PricingResult<f64> {
    let Lattice { tau, u, d, q, disc } = self.lattice()?;
    if tau == 0.0 {
      return Ok(option_type.payoff(self.s, self.k));
    }

    let n = self.steps;
    let ud_ratio = u / d;
    let early_exercise = self.style == OptionStyle::American;

    // level n: n + 1 terminal payoffs, node j has S0 * u^j * d^(n - j)
    let mut current = Vec::with_capacity(n + 1);
    let mut s_node = self.s * d.powi(n as i32);
    for _ in 0..=n {
      current.push(option_type.payoff(s_node, self.k));
      s_node *= ud_ratio;
    }

    let mut next = Vec::with_capacity(n);
    for i in (0..n).rev() {
      next.clear();
      let mut s_node = self.s * d.powi(i as i32);
      for j in 0..=i {
        let continuation = disc * (q * current[j + 1] + (1.0 - q) * current[j]);
        let value = if early_exercise {
          continuation.max(option_type.payoff(s_node, self.k))
        } else {
          continuation
        };
        next.push(value);
        s_node *= ud_ratio;
      }
      std::mem::swap(&mut current, &mut next);
    }

    Ok(current[0])
  }
}

impl PricerExt for BinomialPricer {
  fn calculate_call_put(&self) -> PricingResult<(f64, f64)> {
    timed("binomial_call_put", self, || {
      Ok((
        self.price_tree(OptionType::Call)?,
        self.price_tree(OptionType::Put)?,
      ))
    })
  }

  fn calculate_price(&self) -> PricingResult<f64> {
    timed("binomial", self, || self.price_tree(self.option_type))
  }
}

impl TimeExt for BinomialPricer {
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

/// American option price on a binomial lattice with explicit up/down factors.
#[allow(clippy::too_many_arguments)]
pub fn american_tree(
  k: f64,
  t: f64,
  s0: f64,
  r: f64,
  n: usize,
  u: f64,
  d: f64,
  option_type: OptionType,
) -> PricingResult<f64> {
  BinomialPricer::new(
    s0,
    k,
    r,
    u,
    d,
    n,
    Some(t),
    None,
    None,
    option_type,
    OptionStyle::American,
  )
  .calculate_price()
}
