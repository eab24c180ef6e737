mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hemogram",
    version,
    about = "Extract blood-test metrics from laboratory report PDFs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract metric records from a lab report PDF
    Extract {
        /// Path to the PDF file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write extracted records to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Custom metric catalog JSON (default: builtin Brazilian catalog)
        #[arg(short, long = "catalog", value_name = "FILE")]
        catalog: Option<PathBuf>,
    },
    /// Manage and inspect metric catalogs
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Show the builtin catalog's metrics, aliases and units
    Show,
    /// Validate a custom catalog file
    Validate {
        /// Path to JSON catalog file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input_file,
            output,
            out,
            catalog,
        } => commands::extract::run(input_file, &output, out, catalog),
        Commands::Catalog { action } => match action {
            CatalogAction::Show => commands::catalog::show(),
            CatalogAction::Validate { file } => commands::catalog::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
