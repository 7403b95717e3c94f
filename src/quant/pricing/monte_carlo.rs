//! # Monte Carlo (European Options)
//!
//! Exact terminal solution of risk-neutral GBM, no time stepping:
//! $$
//! S_T=S_0\exp\!\left((r-\tfrac12\sigma^2)T+\sigma\sqrt T\,Z\right),\qquad Z\sim\mathcal N(0,1)
//! $$
//! $$
//! \hat V=e^{-rT}\frac1M\sum_{m=1}^M \Pi(S_T^{(m)}),\qquad
//! \mathrm{SE}=e^{-rT}\frac{\hat s_\Pi}{\sqrt M}
//! $$
//!
use impl_new_derive::ImplNew;
use ndarray::Array1;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rand_distr::StandardNormal;
use rayon::prelude::*;

use crate::error::PricingResult;
use crate::quant::inputs::ensure_count;
use crate::quant::inputs::ensure_market;
use crate::quant::pricing::timed;
use crate::quant::OptionType;
use crate::traits::PricerExt;
use crate::traits::TimeExt;

#[derive(Debug, Clone, Copy)]
pub struct MonteCarloPricer {
  /// Underlying price
  pub s: f64,
  /// Volatility
  pub v: f64,
  /// Strike price
  pub k: f64,
  /// Risk-free rate
  pub r: f64,
  /// Number of simulated terminal prices
  pub simulations: usize,
  /// Fixed seed for reproducible runs, entropy-seeded otherwise
  pub seed: Option<u64>,
  /// Time to maturity in years
  pub tau: Option<f64>,
  /// Evaluation date
  pub eval: Option<chrono::NaiveDate>,
  /// Expiration date
  pub expiration: Option<chrono::NaiveDate>,
  /// Option type
  pub option_type: OptionType,
}

/// Discounted sample mean and its standard error.
#[derive(ImplNew, Debug, Clone, Copy, PartialEq)]
pub struct McEstimate {
  pub price: f64,
  pub std_error: f64,
  pub paths: usize,
}

/// Running payoff sums, mergeable across parallel chunks.
#[derive(Debug, Default, Clone, Copy)]
struct PayoffMoments {
  sum: f64,
  sum_sq: f64,
  n: usize,
}

impl PayoffMoments {
  fn from_payoffs(payoffs: &Array1<f64>) -> Self {
    Self {
      sum: payoffs.sum(),
      sum_sq: payoffs.mapv(|p| p * p).sum(),
      n: payoffs.len(),
    }
  }

  fn merge(self, other: Self) -> Self {
    Self {
      sum: self.sum + other.sum,
      sum_sq: self.sum_sq + other.sum_sq,
      n: self.n + other.n,
    }
  }

  fn discounted(self, df: f64) -> McEstimate {
    let n = self.n as f64;
    let mean = self.sum / n;
    let var = if self.n > 1 {
      ((self.sum_sq - n * mean * mean) / (n - 1.0)).max(0.0)
    } else {
      0.0
    };

    McEstimate::new(df * mean, df * (var / n).sqrt(), self.n)
  }
}

impl MonteCarloPricer {
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    s: f64,
    v: f64,
    k: f64,
    r: f64,
    simulations: usize,
    seed: Option<u64>,
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
      simulations,
      seed,
      tau,
      eval,
      expiration,
      option_type,
    }
  }

  fn checked_tau(&self) -> PricingResult<f64> {
    let tau = self.tau_or_from_dates()?;
    ensure_market(self.s, self.v, self.k, self.r, tau)?;
    ensure_count("simulations", self.simulations)?;
    Ok(tau)
  }

  fn rng(&self) -> StdRng {
    match self.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    }
  }

  /// Terminal prices for a batch of standard normal draws.
  fn terminal_prices(&self, tau: f64, z: &Array1<f64>) -> Array1<f64> {
    let drift = (self.r - 0.5 * self.v.powi(2)) * tau;
    let vol = self.v * tau.sqrt();
    z.mapv(|z| self.s * (drift + vol * z).exp())
  }

  fn payoffs(&self, s_t: &Array1<f64>, option_type: OptionType) -> Array1<f64> {
    s_t.mapv(|s| option_type.payoff(s, self.k))
  }

  /// Estimate with a caller-supplied random source.
  pub fn estimate_with_rng<R: Rng>(&self, rng: &mut R) -> PricingResult<McEstimate> {
    let tau = self.checked_tau()?;
    let z = Array1::random_using(self.simulations, StandardNormal, rng);
    let s_t = self.terminal_prices(tau, &z);
    let moments = PayoffMoments::from_payoffs(&self.payoffs(&s_t, self.option_type));

    Ok(moments.discounted((-self.r * tau).exp()))
  }

  /// Estimate with the configured seed (or entropy).
  pub fn estimate(&self) -> PricingResult<McEstimate> {
    timed("monte_carlo", self, || self.estimate_with_rng(&mut self.rng()))
  }

  /// Split the paths over `chunks` rayon tasks.
  ///
  /// Chunk `i` draws from its own `StdRng` derived from the base seed, so a
  /// seeded run is reproducible for a fixed chunk count.
  pub fn estimate_par(&self, chunks: usize) -> PricingResult<McEstimate> {
    timed("monte_carlo_par", self, || {
      let tau = self.checked_tau()?;
      let chunks = ensure_count("chunks", chunks)?.min(self.simulations);
      let base = self.seed.unwrap_or_else(rand::random);
      let per_chunk = self.simulations / chunks;
      let remainder = self.simulations % chunks;

      let moments = (0..chunks)
        .into_par_iter()
        .map(|idx| {
          let mut rng = StdRng::seed_from_u64(
            base.wrapping_add(0xD134_2543_DE82_EF95_u64.wrapping_mul(idx as u64 + 1)),
          );
          let len = per_chunk + usize::from(idx < remainder);
          let z = Array1::random_using(len, StandardNormal, &mut rng);
          let s_t = self.terminal_prices(tau, &z);
          PayoffMoments::from_payoffs(&self.payoffs(&s_t, self.option_type))
        })
        .reduce(PayoffMoments::default, PayoffMoments::merge);

      Ok(moments.discounted((-self.r * tau).exp()))
    })
  }

  /// Call and put estimates from the same draws.
  pub fn estimate_call_put(&self) -> PricingResult<(McEstimate, McEstimate)> {
    let tau = self.checked_tau()?;
    let z = Array1::random_using(self.simulations, StandardNormal, &mut self.rng());
    let s_t = self.terminal_prices(tau, &z);
    let df = (-self.r * tau).exp();

    Ok((
      PayoffMoments::from_payoffs(&self.payoffs(&s_t, OptionType::Call)).discounted(df),
      PayoffMoments::from_payoffs(&self.payoffs(&s_t, OptionType::Put)).discounted(df),
    ))
  }
}

impl PricerExt for MonteCarloPricer {
  fn calculate_call_put(&self) -> PricingResult<(f64, f64)> {
    timed("monte_carlo_call_put", self, || {
      let (call, put) = self.estimate_call_put()?;
      Ok((call.price, put.price))
    })
  }

  fn calculate_price(&self) -> PricingResult<f64> {
    Ok(self.estimate()?.price)
  }
}

impl TimeExt for MonteCarloPricer {
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

/// Monte Carlo price of a European option; `seed` makes the run reproducible.
#[allow(clippy::too_many_arguments)]
pub fn monte_carlo_price(
  s0: f64,
  k: f64,
  t: f64,
  r: f64,
  sigma: f64,
  simulations: usize,
  option_type: OptionType,
  seed: Option<u64>,
) -> PricingResult<f64> {
  MonteCarloPricer::new(
    s0,
    sigma,
    k,
    r,
    simulations,
    seed,
    Some(t),
    None,
    None,
    option_type,
  )
  .calculate_price()
}
