use clap::{Parser, Subcommand};

mod audio;
mod commands;
mod logging;
mod render;

#[derive(Parser)]
#[command(name = "breakbell", version, about = "Micro-break work timer")]
struct Cli {
    /// More log output on stderr (-v info, -vv debug). BREAKBELL_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the timer interactively
    Run(commands::run::RunArgs),
    /// Light/dark theme preference
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Format a number of seconds as HH:MM:SS
    Clock {
        seconds: u64,
    },
    /// Draw break intervals
    Interval(commands::interval::IntervalArgs),
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Theme { action } => commands::theme::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Clock { seconds } => {
            println!("{}", breakbell_core::format_clock(seconds));
            Ok(())
        }
        Commands::Interval(args) => commands::interval::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
