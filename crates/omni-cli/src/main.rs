use clap::{Parser, Subcommand};
use omni::{
    commands::{
        config::{self, ConfigAction},
        dedup, validate,
    },
    logging, GlobalOpts,
};
use omni_logger as logger;

#[derive(Parser)]
#[command(name = "omni")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "OmniTAK developer tooling",
    long_about = "Omni validates OmniTAK plugin packages and repairs duplicate build entries in Xcode project files."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate plugin.json and the plugin package layout
    Validate(validate::ValidateCommand),
    /// Remove duplicate source entries from an Xcode project.pbxproj
    Dedup(dedup::DedupCommand),
    /// Configure omni
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Validate(_) => "validate",
            Commands::Dedup(_) => "dedup",
            Commands::Config { .. } => "config",
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    logging::init_tracing(cli.global.verbosity_level());
    logger::set_command(cli.command.name());

    match cli.command {
        Commands::Validate(cmd) => {
            if !validate::handle_validate(cmd, &cli.global) {
                std::process::exit(1);
            }
        }
        Commands::Dedup(cmd) => {
            if let Err(e) = dedup::handle_dedup(cmd, &cli.global) {
                logger::error(&format!("{:#}", e));
                if cli.global.verbosity_level() > 0 {
                    logger::show_log_path();
                }
                std::process::exit(1);
            }
        }
        Commands::Config { action } => {
            if let Err(e) = config::handle_config(action, &cli.global) {
                logger::error(&format!("{:#}", e));
                std::process::exit(1);
            }
        }
    }
}
