//! examforge CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "examforge",
    version,
    about = "Randomized exam versions with automatic answer keys"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate exam versions from a question bank
    Generate {
        /// Path to a .toml question bank
        #[arg(long)]
        bank: PathBuf,

        /// Number of versions (clamped to 1..=26)
        #[arg(long)]
        versions: Option<usize>,

        /// Shuffle mode: both, questions, options
        #[arg(long)]
        mode: Option<String>,

        /// Write the generated versions as JSON to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Save the JSON under the configured output_dir instead
        #[arg(long, conflicts_with = "output")]
        save: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print answer keys from generated versions
    Key {
        /// Generated exam JSON written by `generate --output`
        #[arg(long)]
        input: PathBuf,

        /// Only this version code (e.g. "B")
        #[arg(long)]
        version: Option<char>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Remove a version from generated output and reletter the rest
    Remove {
        /// Generated exam JSON written by `generate --output`
        #[arg(long)]
        input: PathBuf,

        /// Version code to remove (e.g. "B")
        #[arg(long, required_unless_present = "all")]
        version: Option<char>,

        /// Remove every version
        #[arg(long, conflicts_with = "version")]
        all: bool,

        /// Write the result here instead of overwriting the input
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to a bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Create starter config and example question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("examforge=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            bank,
            versions,
            mode,
            output,
            save,
            format,
            config,
        } => commands::generate::execute(bank, versions, mode, output, save, format, config),
        Commands::Key {
            input,
            version,
            format,
        } => commands::key::execute(input, version, format),
        Commands::Remove {
            input,
            version,
            all,
            output,
        } => commands::remove::execute(input, version, all, output),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
