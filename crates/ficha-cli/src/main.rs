//! CLI frontend for the Ficha derived-stat engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ficha",
    about = "Ficha: inspect the derived values of a character sheet",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every derived value of a character
    Sheet {
        /// Character snapshot (JSON)
        file: PathBuf,

        /// Print the derived sheet as JSON
        #[arg(long)]
        json: bool,

        /// Rules config (JSON) overriding the defaults
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },

    /// Show the formula and breakdown for one skill use
    Check {
        /// Character snapshot (JSON)
        file: PathBuf,

        /// Skill name (case-insensitive)
        skill: String,

        /// Use name: a default or custom use (default: general use)
        #[arg(short, long = "use")]
        use_name: Option<String>,

        /// Craft being worked, for the craft skill
        #[arg(long)]
        craft: Option<String>,

        /// Rules config (JSON) overriding the defaults
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },

    /// Report invariant violations and likely mistakes in a character
    Validate {
        /// Character snapshot (JSON)
        file: PathBuf,
    },

    /// Format a raw dice pool for an attribute score
    Formula {
        /// Attribute score
        #[arg(allow_hyphen_values = true)]
        attribute: i32,

        /// Dice added to or removed from the pool
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        dice: i32,

        /// Flat bonus added after rolling
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        bonus: i32,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sheet { file, json, rules } => {
            commands::sheet::run(&file, json, rules.as_deref())
        }
        Commands::Check {
            file,
            skill,
            use_name,
            craft,
            rules,
        } => commands::check::run(
            &file,
            &skill,
            use_name.as_deref(),
            craft.as_deref(),
            rules.as_deref(),
        ),
        Commands::Validate { file } => commands::validate::run(&file),
        Commands::Formula {
            attribute,
            dice,
            bonus,
        } => commands::formula::run(attribute, dice, bonus),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("error: {e}");
        process::exit(1);
    }
}
