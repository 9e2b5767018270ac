//! `workshop config` command - inspect configuration

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{format_price, load_config};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::{ConfigLayer, WorkshopConfig};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Show the path of the global config file
    Path,

    /// List all configuration keys
    Keys,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("name", "Workshop name shown in banner and closing message"),
    ("capacity", "Maximum number of attendees"),
    ("base_price", "Price before discounts"),
    ("discounts", "Ordered list of {min_age, max_age, discount}, first match wins"),
    ("modalities", "Slots offered (mañana, tarde)"),
    ("max_attempts", "Invalid answers allowed per field (unset = unlimited)"),
];

pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show => run_show(global),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(global: &GlobalOpts) -> Result<()> {
    let config = load_config(global, ConfigLayer::default())?;

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&config).into_diagnostic()?);
        }
        _ => {
            println!("{}", style("Effective Configuration").bold().underlined());
            println!();
            println!("  {:<13} {}", style("name").cyan(), config.name);
            println!("  {:<13} {}", style("capacity").cyan(), config.capacity);
            println!("  {:<13} {}", style("base_price").cyan(), format_price(config.base_price));
            println!("  {:<13} {}", style("modalities").cyan(), config.modality_choices());
            println!(
                "  {:<13} {}",
                style("max_attempts").cyan(),
                config
                    .max_attempts
                    .map_or_else(|| "unlimited".to_string(), |n| n.to_string())
            );
            println!("  {}", style("discounts").cyan());
            for rule in &config.discounts {
                println!("    {}", rule);
            }

            if !global.quiet {
                println!();
                println!("{}", style("Config Sources (in priority order):").dim());
                println!("  1. Command-line options");
                println!("  2. Environment variables (WORKSHOP_NAME, WORKSHOP_CAPACITY, WORKSHOP_BASE_PRICE, WORKSHOP_MAX_ATTEMPTS)");
                println!("  3. --config file (or WORKSHOP_CONFIG)");
                println!("  4. Global config (workshop/config.yaml in the user config dir)");
            }
        }
    }

    Ok(())
}

fn run_path() -> Result<()> {
    let path = WorkshopConfig::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine the user config directory"))?;

    println!("{}", path.display());
    if !path.exists() {
        eprintln!("{}", style("(not created)").dim());
    }
    Ok(())
}

fn run_keys() -> Result<()> {
    for (key, description) in VALID_KEYS {
        println!("{:<13} {}", style(key).cyan(), description);
    }
    Ok(())
}
