use clap::Parser;
use miette::Result;
use workshop::cli::commands::register::RegisterArgs;
use workshop::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    workshop::cli::init_logging(global.verbose);

    match cli.command.unwrap_or_else(|| Commands::Register(RegisterArgs::default())) {
        Commands::Register(args) => workshop::cli::commands::register::run(args, &global),
        Commands::Price(args) => workshop::cli::commands::price::run(args, &global),
        Commands::Config(cmd) => workshop::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => workshop::cli::commands::completions::run(args),
    }
}
