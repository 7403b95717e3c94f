use std::fmt::Display;
use std::str::FromStr;

use crate::error::PricingError;

pub mod inputs;
pub mod pricing;

/// Option type.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum OptionType {
  #[default]
  Call,
  Put,
}

impl OptionType {
  /// Intrinsic value at spot `s` for strike `k`.
  pub fn payoff(&self, s: f64, k: f64) -> f64 {
    match self {
      OptionType::Call => (s - k).max(0.0),
      OptionType::Put => (k - s).max(0.0),
    }
  }
}

impl Display for OptionType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      OptionType::Call => write!(f, "Call"),
      OptionType::Put => write!(f, "Put"),
    }
  }
}

/// Accepts `Call`/`Put` and the one-letter `C`/`P`, ignoring case.
impl FromStr for OptionType {
  type Err = PricingError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "call" | "c" => Ok(OptionType::Call),
      "put" | "p" => Ok(OptionType::Put),
      _ => Err(PricingError::invalid_option_class(s)),
    }
  }
}

/// Option style.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum OptionStyle {
  #[default]
  American,
  European,
}

impl Display for OptionStyle {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      OptionStyle::American => write!(f, "American"),
      OptionStyle::European => write!(f, "European"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_long_and_short_class_names() {
    assert_eq!("Call".parse::<OptionType>(), Ok(OptionType::Call));
    assert_eq!("put".parse::<OptionType>(), Ok(OptionType::Put));
    assert_eq!(" C ".parse::<OptionType>(), Ok(OptionType::Call));
    assert_eq!("P".parse::<OptionType>(), Ok(OptionType::Put));
  }

  #[test]
  fn rejects_unknown_class() {
    let err = "Straddle".parse::<OptionType>().unwrap_err();
    assert_eq!(err, PricingError::InvalidOptionClass("Straddle".into()));
  }

  #[test]
  fn payoff_is_hockey_stick() {
    assert_eq!(OptionType::Call.payoff(110.0, 100.0), 10.0);
    assert_eq!(OptionType::Call.payoff(90.0, 100.0), 0.0);
    assert_eq!(OptionType::Put.payoff(90.0, 100.0), 10.0);
    assert_eq!(OptionType::Put.payoff(110.0, 100.0), 0.0);
  }

  #[test]
  fn display_round_trips_through_parse() {
    for ty in [OptionType::Call, OptionType::Put] {
      assert_eq!(ty.to_string().parse::<OptionType>(), Ok(ty));
    }
  }
}
