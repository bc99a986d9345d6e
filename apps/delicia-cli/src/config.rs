//! # Configuration
//!
//! Settings loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--store-name`, `--tax-rate`, ...)
//! 2. Environment variables (`DELICIA_*`)
//! 3. Defaults (this file)
//!
//! Nothing is persisted; every session starts from these values.

use std::fmt;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use delicia_core::reporting::DEFAULT_TOP_N;
use delicia_core::validation::parse_percentage;
use delicia_core::{PricingPolicy, Rate, DEFAULT_STORE_NAME, IGV_RATE_BPS};
use serde::Serialize;

pub const ENV_STORE_NAME: &str = "DELICIA_STORE_NAME";
pub const ENV_TAX_RATE: &str = "DELICIA_TAX_RATE";
pub const ENV_RECEIPT_FORMAT: &str = "DELICIA_RECEIPT_FORMAT";
pub const ENV_TOP_N: &str = "DELICIA_TOP_N";

/// Log filter used when `RUST_LOG` is unset. Anything louder would
/// interleave with the menu.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Command-line flags.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "delicia")]
#[command(author = "Delicia POS Team")]
#[command(version)]
#[command(about = "Delicia bakery point of sale", long_about = None)]
pub struct CliArgs {
    /// Name printed on receipts
    #[arg(long)]
    pub store_name: Option<String>,

    /// Tax rate in percent (e.g. 18 or 8.25)
    #[arg(long)]
    pub tax_rate: Option<String>,

    /// Receipt output format
    #[arg(long, value_enum)]
    pub receipt_format: Option<ReceiptFormat>,

    /// How many products the "most expensive" report lists
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Customer name; skips the prompt at startup
    #[arg(long)]
    pub customer: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(short = 'l', long, value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: Option<String>,
}

/// How receipts are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptFormat {
    /// Padded columns, one line per product
    #[default]
    Text,

    /// Pretty-printed JSON
    Json,
}

impl FromStr for ReceiptFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(ReceiptFormat::Text),
            "json" => Ok(ReceiptFormat::Json),
            _ => Err(ConfigError::InvalidValue(ENV_RECEIPT_FORMAT.to_string())),
        }
    }
}

impl fmt::Display for ReceiptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiptFormat::Text => write!(f, "text"),
            ReceiptFormat::Json => write!(f, "json"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    /// Store name (printed on receipts)
    pub store_name: String,

    /// Tax applied after discount
    pub tax_rate: Rate,

    pub receipt_format: ReceiptFormat,

    /// Size of the "most expensive products" report
    pub top_n: usize,

    /// Preset customer name; `None` means ask at startup
    pub customer: Option<String>,

    /// Fallback `tracing` filter
    pub log_filter: String,
}

impl Default for AppConfig {
    /// ## Default Values
    /// - Store: "Delicia"
    /// - Tax: 18% (IGV)
    /// - Receipt: text
    /// - Report size: 3
    fn default() -> Self {
        AppConfig {
            store_name: DEFAULT_STORE_NAME.to_string(),
            tax_rate: Rate::from_bps(IGV_RATE_BPS),
            receipt_format: ReceiptFormat::Text,
            top_n: DEFAULT_TOP_N,
            customer: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, then environment, then flags.
    pub fn load(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = AppConfig::from_env()?;
        config.apply_args(args)?;
        Ok(config)
    }

    /// Creates a config from `DELICIA_*` environment variables and defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        AppConfig::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(store_name) = lookup(ENV_STORE_NAME) {
            config.store_name = parse_store_name(ENV_STORE_NAME, &store_name)?;
        }

        if let Some(tax_rate) = lookup(ENV_TAX_RATE) {
            config.tax_rate = parse_tax_rate(ENV_TAX_RATE, &tax_rate)?;
        }

        if let Some(format) = lookup(ENV_RECEIPT_FORMAT) {
            config.receipt_format = format.parse()?;
        }

        if let Some(top_n) = lookup(ENV_TOP_N) {
            config.top_n = top_n
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(ENV_TOP_N.to_string()))
                .and_then(|n| check_top_n(ENV_TOP_N, n))?;
        }

        Ok(config)
    }

    /// Overrides values with whatever flags were given.
    pub fn apply_args(&mut self, args: &CliArgs) -> Result<(), ConfigError> {
        if let Some(store_name) = &args.store_name {
            self.store_name = parse_store_name("--store-name", store_name)?;
        }

        if let Some(tax_rate) = &args.tax_rate {
            self.tax_rate = parse_tax_rate("--tax-rate", tax_rate)?;
        }

        if let Some(format) = args.receipt_format {
            self.receipt_format = format;
        }

        if let Some(top_n) = args.top_n {
            self.top_n = check_top_n("--top-n", top_n)?;
        }

        if let Some(customer) = &args.customer {
            self.customer = Some(customer.clone());
        }

        if let Some(level) = &args.log_level {
            self.log_filter = level.clone();
        }

        Ok(())
    }

    /// Standard discount tiers with the configured tax rate.
    pub fn pricing_policy(&self) -> PricingPolicy {
        PricingPolicy::standard().with_tax_rate(self.tax_rate)
    }
}

fn parse_store_name(name: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidValue(name.to_string()));
    }
    Ok(trimmed.to_string())
}

fn parse_tax_rate(name: &str, raw: &str) -> Result<Rate, ConfigError> {
    parse_percentage(name, raw).map_err(|_| ConfigError::InvalidValue(name.to_string()))
}

fn check_top_n(name: &str, n: usize) -> Result<usize, ConfigError> {
    if n == 0 {
        return Err(ConfigError::InvalidValue(name.to_string()));
    }
    Ok(n)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.store_name, "Delicia");
        assert_eq!(config.tax_rate.bps(), 1800);
        assert_eq!(config.receipt_format, ReceiptFormat::Text);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.customer, None);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_STORE_NAME, " Delicia Miraflores "),
            (ENV_TAX_RATE, "8.25"),
            (ENV_RECEIPT_FORMAT, "JSON"),
            (ENV_TOP_N, "5"),
        ]))
        .unwrap();

        assert_eq!(config.store_name, "Delicia Miraflores");
        assert_eq!(config.tax_rate.bps(), 825);
        assert_eq!(config.receipt_format, ReceiptFormat::Json);
        assert_eq!(config.top_n, 5);
    }

    #[test]
    fn test_invalid_env_values_name_the_variable() {
        let cases = [
            (ENV_TAX_RATE, "abc"),
            (ENV_TAX_RATE, "150"),
            (ENV_TAX_RATE, "-1"),
            (ENV_RECEIPT_FORMAT, "pdf"),
            (ENV_TOP_N, "0"),
            (ENV_TOP_N, "three"),
            (ENV_STORE_NAME, "   "),
        ];

        for (name, value) in cases {
            let err = AppConfig::from_lookup(lookup_from(&[(name, value)])).unwrap_err();
            let ConfigError::InvalidValue(reported) = err;
            assert_eq!(reported, name, "value {:?}", value);
        }
    }

    #[test]
    fn test_flags_win_over_env() {
        let mut config =
            AppConfig::from_lookup(lookup_from(&[(ENV_STORE_NAME, "From Env")])).unwrap();
        let args = CliArgs {
            store_name: Some("From Flag".to_string()),
            tax_rate: Some("0".to_string()),
            receipt_format: Some(ReceiptFormat::Json),
            top_n: Some(9),
            customer: Some("Ana".to_string()),
            log_level: Some("debug".to_string()),
        };

        config.apply_args(&args).unwrap();

        assert_eq!(config.store_name, "From Flag");
        assert!(config.tax_rate.is_zero());
        assert_eq!(config.receipt_format, ReceiptFormat::Json);
        assert_eq!(config.top_n, 9);
        assert_eq!(config.customer.as_deref(), Some("Ana"));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_bad_flag_is_reported_by_flag_name() {
        let mut config = AppConfig::default();
        let args = CliArgs {
            tax_rate: Some("18.555".to_string()),
            ..CliArgs::default()
        };

        let err = config.apply_args(&args).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for --tax-rate");
    }

    #[test]
    fn test_parse_args_from_command_line() {
        let args = CliArgs::parse_from([
            "delicia",
            "--store-name",
            "Delicia Centro",
            "--receipt-format",
            "json",
            "--top-n",
            "2",
        ]);

        assert_eq!(args.store_name.as_deref(), Some("Delicia Centro"));
        assert_eq!(args.receipt_format, Some(ReceiptFormat::Json));
        assert_eq!(args.top_n, Some(2));
        assert_eq!(args.customer, None);
    }

    #[test]
    fn test_pricing_policy_uses_tax_rate() {
        let config = AppConfig {
            tax_rate: Rate::from_bps(1000),
            ..AppConfig::default()
        };
        assert_eq!(config.pricing_policy().tax_rate.bps(), 1000);
    }
}
