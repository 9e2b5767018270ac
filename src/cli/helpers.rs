//! Shared helper functions for CLI commands

use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::config::{ConfigLayer, WorkshopConfig};

/// Format an amount in euros with two decimals
pub fn format_price(amount: f64) -> String {
    format!("{:.2} €", amount)
}

/// Format a discount fraction as a percentage, e.g. `-50%`
pub fn format_discount(discount: f64) -> String {
    if discount == 0.0 {
        "-".to_string()
    } else {
        format!("-{:.0}%", discount * 100.0)
    }
}

/// Load the layered configuration, apply command-line overrides and validate
pub fn load_config(global: &GlobalOpts, overrides: ConfigLayer) -> Result<WorkshopConfig> {
    let mut config = WorkshopConfig::load(global.config.as_deref())?;
    config.merge(overrides);
    config.validate()?;
    tracing::debug!(?config, "effective configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(25.0), "25.00 €");
        assert_eq!(format_price(33.333), "33.33 €");
        assert_eq!(format_price(0.0), "0.00 €");
    }

    #[test]
    fn test_format_discount() {
        assert_eq!(format_discount(0.5), "-50%");
        assert_eq!(format_discount(0.3), "-30%");
        assert_eq!(format_discount(0.0), "-");
    }
}
