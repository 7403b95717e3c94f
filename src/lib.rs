//! # Option Pricing
//!
//! Vanilla option pricers under the risk-neutral measure.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`quant::pricing::binomial`] | American (or European) options on a recombining binomial lattice. |
//! | [`quant::pricing::bsm`] | Black-Scholes closed form. |
//! | [`quant::pricing::monte_carlo`] | Monte Carlo estimate from exact terminal GBM draws. |
//! | [`quant::pricing::greeks`] | Delta, gamma, vega, theta and rho. |
//!
//! Every entry point validates its inputs first and returns a
//! [`PricingResult`]; nothing panics on bad parameters. Each call emits a
//! `tracing` debug event with its arguments and duration.
//!
//! ## Example Usage
//!
//! ```rust
//! use option_pricing::prelude::*;
//!
//! let call = black_scholes(0.01, 30.0, 40.0, 240.0 / 365.0, 0.30, OptionType::Call)?;
//! let put = american_tree(100.0, 1.0, 100.0, 0.06, 100, 1.1, 1.0 / 1.1, "P".parse()?)?;
//! ```

pub mod error;
pub mod quant;
pub mod traits;

pub use crate::error::PricingError;
pub use crate::error::PricingResult;

pub mod prelude {
  pub use crate::error::PricingError;
  pub use crate::error::PricingResult;
  pub use crate::quant::pricing::binomial::american_tree;
  pub use crate::quant::pricing::binomial::BinomialPricer;
  pub use crate::quant::pricing::bsm::black_scholes;
  pub use crate::quant::pricing::bsm::BSMPricer;
  pub use crate::quant::pricing::greeks;
  pub use crate::quant::pricing::greeks::Greeks;
  pub use crate::quant::pricing::monte_carlo::monte_carlo_price;
  pub use crate::quant::pricing::monte_carlo::McEstimate;
  pub use crate::quant::pricing::monte_carlo::MonteCarloPricer;
  pub use crate::quant::OptionStyle;
  pub use crate::quant::OptionType;
  pub use crate::traits::GreeksExt;
  pub use crate::traits::PricerExt;
  pub use crate::traits::TimeExt;
}
