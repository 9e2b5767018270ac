//! `workshop register` command - interactive registration session

use miette::Result;
use std::io::{self, Write};

use crate::cli::helpers::load_config;
use crate::cli::output::{render_report, ConsoleReporter};
use crate::cli::GlobalOpts;
use crate::core::config::{ConfigLayer, WorkshopConfig};
use crate::core::input::{LinePrompter, Prompter, TermPrompter};
use crate::core::notice::Reporter;
use crate::core::session::{RegistrationSession, SessionReport};

#[derive(clap::Args, Debug, Default)]
pub struct RegisterArgs {
    /// Workshop name (overrides config)
    #[arg(long)]
    pub name: Option<String>,

    /// Maximum number of attendees (overrides config)
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Price before discounts (overrides config)
    #[arg(long)]
    pub base_price: Option<f64>,

    /// Invalid answers allowed per field before closing (default: unlimited)
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Read plain lines even when attached to a terminal
    #[arg(long)]
    pub plain: bool,
}

impl RegisterArgs {
    fn overrides(&self) -> ConfigLayer {
        ConfigLayer {
            name: self.name.clone(),
            capacity: self.capacity,
            base_price: self.base_price,
            max_attempts: self.max_attempts,
            ..ConfigLayer::default()
        }
    }
}

pub fn run(args: RegisterArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global, args.overrides())?;
    let machine = global.format.is_machine();
    let mut reporter = ConsoleReporter::new(global.quiet, machine);

    let report = if !args.plain && !global.quiet && TermPrompter::is_available() {
        run_session(config, TermPrompter::new(), &mut reporter)?
    } else {
        let prompts: Box<dyn Write> = if global.quiet {
            Box::new(io::sink())
        } else if machine {
            Box::new(io::stderr())
        } else {
            Box::new(io::stdout())
        };
        let prompter = LinePrompter::new(io::stdin().lock(), prompts);
        run_session(config, prompter, &mut reporter)?
    };

    println!("{}", render_report(&report, global.format)?);
    Ok(())
}

fn run_session<P: Prompter>(
    config: WorkshopConfig,
    prompter: P,
    reporter: &mut dyn Reporter,
) -> Result<SessionReport> {
    let mut session = RegistrationSession::new(config, prompter)?;
    Ok(session.run(reporter)?)
}
