mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ekko",
    version,
    about = "Soil analysis and agronomic report generator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the latest soil reading of a user record
    Classify {
        /// Path to the user record JSON
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Assemble the soil report and export its page layout
    Report {
        /// Path to the user record JSON
        input_file: PathBuf,

        /// Custom knowledge base JSON (default: bundled)
        #[arg(short, long, value_name = "FILE")]
        knowledge: Option<PathBuf>,

        /// Directory the export is written to
        #[arg(long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,

        /// Report date, YYYY-MM-DD (default: today)
        #[arg(long, value_name = "DATE")]
        date: Option<String>,

        /// Output format for --dry-run: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Print the assembled document instead of exporting it
        #[arg(long)]
        dry_run: bool,
    },
    /// Inspect diagnostic knowledge bases
    Knowledge {
        #[command(subcommand)]
        action: KnowledgeAction,
    },
}

#[derive(Subcommand)]
enum KnowledgeAction {
    /// List the parameters covered by the bundled knowledge base
    List,
    /// Show the range tables for one parameter
    Explain {
        /// Parameter key or name (e.g., "ph", "n", "umidade")
        parameter: String,
    },
    /// Validate a custom knowledge base file
    Validate {
        /// Path to JSON knowledge base
        file: PathBuf,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("EKKO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Classify { input_file, output } => commands::classify::run(input_file, &output),
        Commands::Report {
            input_file,
            knowledge,
            out_dir,
            date,
            output,
            dry_run,
        } => commands::report::run(commands::report::ReportArgs {
            input_file,
            knowledge,
            out_dir,
            date,
            output,
            dry_run,
        }),
        Commands::Knowledge { action } => match action {
            KnowledgeAction::List => commands::knowledge::list(),
            KnowledgeAction::Explain { parameter } => commands::knowledge::explain(&parameter),
            KnowledgeAction::Validate { file } => commands::knowledge::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
