//! `workshop price` command - price lookup by age

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_discount, format_price, load_config};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::ConfigLayer;
use crate::core::pricing::PriceQuote;

#[derive(clap::Args, Debug)]
pub struct PriceArgs {
    /// Ages to price
    #[arg(required = true)]
    pub ages: Vec<u32>,

    /// Price before discounts (overrides config)
    #[arg(long)]
    pub base_price: Option<f64>,
}

pub fn run(args: PriceArgs, global: &GlobalOpts) -> Result<()> {
    let overrides = ConfigLayer {
        base_price: args.base_price,
        ..ConfigLayer::default()
    };
    let config = load_config(global, overrides)?;
    let pricing = config.pricing();
    let quotes: Vec<PriceQuote> = args.ages.iter().map(|age| pricing.quote(*age)).collect();

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&quotes).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&quotes).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["age", "discount", "price"]).into_diagnostic()?;
            for quote in &quotes {
                writer
                    .write_record([
                        quote.age.to_string(),
                        quote.discount.to_string(),
                        format!("{:.2}", quote.price),
                    ])
                    .into_diagnostic()?;
            }
            writer.flush().into_diagnostic()?;
        }
        OutputFormat::Md => {
            let mut builder = Builder::default();
            builder.push_record(["Edad", "Descuento", "Precio"]);
            for quote in &quotes {
                builder.push_record([
                    quote.age.to_string(),
                    format_discount(quote.discount),
                    format_price(quote.price),
                ]);
            }
            println!("{}", builder.build().with(Style::markdown()));
        }
        OutputFormat::Auto | OutputFormat::Text => {
            if !global.quiet {
                println!(
                    "{} {}",
                    style("Precio base:").dim(),
                    format_price(pricing.base_price())
                );
            }
            for quote in &quotes {
                println!(
                    "{:>4} años  {:>10}  {}",
                    quote.age,
                    format_price(quote.price),
                    style(format_discount(quote.discount)).dim()
                );
            }
        }
    }

    Ok(())
}
