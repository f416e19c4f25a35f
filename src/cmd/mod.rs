mod fields;
mod generate;
mod search;

use crate::generator::{DEFAULT_COUNT, DEFAULT_OUTPUT_DIR};
use crate::search::{Criterion, DEFAULT_COPY_DIR};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stock-xml-gen")]
#[command(version)]
#[command(about = "Generate synthetic stock item XML files, one record per file", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub generate: GenerateArgs,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Output directory for generated files (created if missing, never cleared)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Number of files to generate (indexes 1..=COUNT, at most 999999)
    #[arg(short = 'n', long, default_value_t = DEFAULT_COUNT,
          value_parser = clap::value_parser!(u32).range(0..=999_999))]
    pub count: u32,

    /// Random seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show progress during generation
    #[arg(short, long)]
    pub progress: bool,

    /// Build every record without writing files (dry run)
    #[arg(long)]
    pub dry_run: bool,

    /// Print statistics after the confirmation message
    #[arg(short, long)]
    pub verbose: bool,

    /// Output results as JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate stock item XML files (the default when no subcommand is given)
    Generate(GenerateArgs),

    /// Find generated files whose records match every FIELD=VALUE condition
    Search {
        /// Directory, single file or glob pattern (e.g. 'xml_files/item00*.xml')
        #[arg(default_value = DEFAULT_OUTPUT_DIR)]
        input: PathBuf,

        /// Match condition, repeatable; all conditions must hold for one item
        #[arg(short = 'w', long = "where", value_name = "FIELD=VALUE", required = true)]
        criteria: Vec<Criterion>,

        /// Directory matching files are copied into
        #[arg(short, long, default_value = DEFAULT_COPY_DIR)]
        output: PathBuf,

        /// Worker threads used to scan files
        #[arg(short = 'j', long, default_value_t = 1)]
        threads: usize,

        /// Show progress during scanning
        #[arg(short, long)]
        progress: bool,

        /// List matches without copying them (dry run)
        #[arg(long)]
        dry_run: bool,

        /// Output results as JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },

    /// List the searchable field names in an XML file
    Fields {
        /// XML file to inspect
        file: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        None => generate::run(cli.generate),
        Some(Commands::Generate(args)) => generate::run(args),
        Some(Commands::Search {
            input,
            criteria,
            output,
            threads,
            progress,
            dry_run,
            json,
        }) => search::run(input, criteria, output, threads, progress, dry_run, json),
        Some(Commands::Fields { file }) => fields::run(file),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "stock-xml-gen",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}
