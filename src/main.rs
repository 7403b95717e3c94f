//! Command-line front end for the pricers.
//!
//! # Price the reference examples
//! option-pricing demo
//!
//! # American put on a 100-step lattice
//! option-pricing binomial --option-type P
//!
//! # Greeks table
//! option-pricing greeks --spot 30 --strike 40 --days 240

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use option_pricing::prelude::*;
use prettytable::row;
use prettytable::Table;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "option-pricing")]
#[command(about = "Binomial, Black-Scholes and Monte Carlo option pricers with Greeks")]
#[command(version)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// American option on a binomial lattice
  Binomial {
    #[arg(long, default_value_t = 100.0)]
    spot: f64,
    #[arg(long, default_value_t = 100.0)]
    strike: f64,
    /// Maturity in years
    #[arg(long, default_value_t = 1.0)]
    maturity: f64,
    #[arg(long, default_value_t = 0.06)]
    rate: f64,
    #[arg(long, default_value_t = 100)]
    steps: usize,
    #[arg(long, default_value_t = 1.1)]
    up: f64,
    /// Down factor, defaults to 1/up
    #[arg(long)]
    down: Option<f64>,
    /// Call/Put (or C/P)
    #[arg(long, default_value = "P")]
    option_type: String,
    /// Skip the early-exercise check
    #[arg(long)]
    european: bool,
  },

  /// Black-Scholes closed form
  Bsm {
    #[command(flatten)]
    market: MarketArgs,
    #[arg(long, default_value = "Call")]
    option_type: String,
  },

  /// Monte Carlo estimate of a European option
  Mc {
    #[arg(long, default_value_t = 100.0)]
    spot: f64,
    #[arg(long, default_value_t = 100.0)]
    strike: f64,
    /// Maturity in years
    #[arg(long, default_value_t = 1.0)]
    maturity: f64,
    #[arg(long, default_value_t = 0.05)]
    rate: f64,
    #[arg(long, default_value_t = 0.2)]
    volatility: f64,
    #[arg(long, default_value_t = 10_000)]
    simulations: usize,
    #[arg(long)]
    seed: Option<u64>,
    /// Number of parallel chunks, sequential when absent
    #[arg(long)]
    chunks: Option<usize>,
    #[arg(long, default_value = "Call")]
    option_type: String,
  },

  /// Delta, gamma, vega, theta and rho for a call and a put
  Greeks {
    #[command(flatten)]
    market: MarketArgs,
  },

  /// Run every pricer with the reference parameters
  Demo,
}

#[derive(clap::Args)]
struct MarketArgs {
  #[arg(long, default_value_t = 30.0)]
  spot: f64,
  #[arg(long, default_value_t = 40.0)]
  strike: f64,
  /// Calendar days to expiry (ACT/365)
  #[arg(long, default_value_t = 240.0)]
  days: f64,
  #[arg(long, default_value_t = 0.01)]
  rate: f64,
  #[arg(long, default_value_t = 0.30)]
  volatility: f64,
}

impl MarketArgs {
  fn pricer(&self, option_type: OptionType) -> BSMPricer {
    BSMPricer::builder(self.spot, self.volatility, self.strike, self.rate)
      .tau(self.days / 365.0)
      .option_type(option_type)
      .build()
  }
}

fn parse_type(s: &str) -> Result<OptionType> {
  s.parse::<OptionType>()
    .with_context(|| format!("unsupported --option-type {s:?}"))
}

#[allow(clippy::too_many_arguments)]
fn binomial(
  spot: f64,
  strike: f64,
  maturity: f64,
  rate: f64,
  steps: usize,
  up: f64,
  down: Option<f64>,
  option_type: OptionType,
  style: OptionStyle,
) -> Result<f64> {
  let pricer = BinomialPricer::new(
    spot,
    strike,
    rate,
    up,
    down.unwrap_or(1.0 / up),
    steps,
    Some(maturity),
    None,
    None,
    option_type,
    style,
  );
  pricer
    .calculate_price()
    .context("binomial pricing failed")
}

fn print_greeks(market: &MarketArgs) -> Result<()> {
  let call = market
    .pricer(OptionType::Call)
    .greeks()
    .context("call greeks failed")?;
  let put = market
    .pricer(OptionType::Put)
    .greeks()
    .context("put greeks failed")?;

  let mut table = Table::new();
  table.add_row(row!["Greek", "Call", "Put"]);
  table.add_row(row!["Delta", format!("{:.3}", call.delta), format!("{:.3}", put.delta)]);
  table.add_row(row!["Gamma", format!("{:.3}", call.gamma), format!("{:.3}", put.gamma)]);
  table.add_row(row!["Vega", format!("{:.3}", call.vega), format!("{:.3}", put.vega)]);
  table.add_row(row!["Theta", format!("{:.4}", call.theta), format!("{:.4}", put.theta)]);
  table.add_row(row!["Rho/1%", format!("{:.3}", call.rho), format!("{:.3}", put.rho)]);
  table.printstd();

  Ok(())
}

fn demo() -> Result<()> {
  let u = 1.1;
  for option_type in [OptionType::Put, OptionType::Call] {
    let price = binomial(
      100.0,
      100.0,
      1.0,
      0.06,
      100,
      u,
      None,
      option_type,
      OptionStyle::American,
    )?;
    println!("American {option_type} Option Price: {price:.4}");
  }

  let market = MarketArgs {
    spot: 30.0,
    strike: 40.0,
    days: 240.0,
    rate: 0.01,
    volatility: 0.30,
  };
  let (call, put) = market
    .pricer(OptionType::Call)
    .calculate_call_put()
    .context("black-scholes pricing failed")?;
  println!("Black-Scholes Call Option Price: {call:.2}");
  println!("Black-Scholes Put Option Price: {put:.2}");

  for option_type in [OptionType::Call, OptionType::Put] {
    let price = monte_carlo_price(100.0, 100.0, 1.0, 0.05, 0.2, 10_000, option_type, None)
      .context("monte carlo pricing failed")?;
    println!("Monte Carlo {option_type} Option Price: {price:.2}");
  }

  print_greeks(&market)
}

/// `RUST_LOG` when set, otherwise info-level for this crate.
fn env_filter() -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("option_pricing=info"))
}

fn main() -> Result<()> {
  tracing_subscriber::fmt().with_env_filter(env_filter()).init();

  let cli = Cli::parse();

  match cli.command {
    Commands::Binomial {
      spot,
      strike,
      maturity,
      rate,
      steps,
      up,
      down,
      option_type,
      european,
    } => {
      let option_type = parse_type(&option_type)?;
      let style = if european {
        OptionStyle::European
      } else {
        OptionStyle::American
      };
      let price = binomial(
        spot,
        strike,
        maturity,
        rate,
        steps,
        up,
        down,
        option_type,
        style,
      )?;
      println!("{style} {option_type} Option Price: {price:.4}");
    }
    Commands::Bsm {
      market,
      option_type,
    } => {
      let price = market
        .pricer(parse_type(&option_type)?)
        .calculate_price()
        .context("black-scholes pricing failed")?;
      println!("Black-Scholes {option_type} Option Price: {price:.2}");
    }
    Commands::Mc {
      spot,
      strike,
      maturity,
      rate,
      volatility,
      simulations,
      seed,
      chunks,
      option_type,
    } => {
      let option_type = parse_type(&option_type)?;
      let pricer = MonteCarloPricer::new(
        spot,
        volatility,
        strike,
        rate,
        simulations,
        seed,
        Some(maturity),
        None,
        None,
        option_type,
      );
      let est = match chunks {
        Some(chunks) => pricer.estimate_par(chunks),
        None => pricer.estimate(),
      }
      .context("monte carlo pricing failed")?;
      println!(
        "Monte Carlo {option_type} Option Price: {:.2} (std error {:.4}, {} paths)",
        est.price, est.std_error, est.paths
      );
    }
    Commands::Greeks { market } => print_greeks(&market)?,
    Commands::Demo => demo()?,
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rust_log_overrides_default_filter() {
    std::env::set_var("RUST_LOG", "option_pricing=debug");
    let from_env = env_filter().to_string();
    assert!(from_env.contains("option_pricing=debug"), "{from_env}");
    assert!(!from_env.contains("option_pricing=info"), "{from_env}");

    std::env::remove_var("RUST_LOG");
    assert_eq!(env_filter().to_string(), "option_pricing=info");
  }
}
