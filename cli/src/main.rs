//! metadesc CLI - derive meta descriptions from rendered HTML

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use metadesc::{batch, Config, JsonFormat, Metadesc, RenderOutcome, SanitizeOptions, SanitizePreset};

#[derive(Parser)]
#[command(name = "metadesc")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Derive meta descriptions from rendered HTML pages", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE", env = "METADESC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the description derived for a page
    Derive {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Explicit description, takes precedence over derivation
        #[arg(long = "override", value_name = "TEXT")]
        override_text: Option<String>,

        #[command(flatten)]
        derive: DeriveArgs,
    },

    /// Print the meta tags published for a page
    Meta {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Explicit description, takes precedence over derivation
        #[arg(long = "override", value_name = "TEXT")]
        override_text: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        derive: DeriveArgs,
    },

    /// Describe many pages as a JSON array
    Json {
        /// Input HTML files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Process files one at a time
        #[arg(long)]
        sequential: bool,

        #[command(flatten)]
        derive: DeriveArgs,
    },

    /// Show version information
    Version,
}

/// Derivation switches shared by every command.
#[derive(Args)]
struct DeriveArgs {
    /// Text cleanup preset
    #[arg(long, value_enum)]
    cleanup: Option<CleanupLevel>,

    /// Scan paragraphs inside tables too
    #[arg(long)]
    keep_tables: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Strip markup and trim (default)
    Minimal,
    /// Also collapse whitespace and normalize Unicode
    Standard,
}

impl From<CleanupLevel> for SanitizePreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => SanitizePreset::Minimal,
            CleanupLevel::Standard => SanitizePreset::Standard,
        }
    }
}

/// One entry of the `json` command output.
#[derive(Serialize)]
struct FileDescription {
    file: String,
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Derive {
            input,
            override_text,
            derive,
        }) => cmd_derive(cli.config.as_deref(), &input, override_text, &derive),
        Some(Commands::Meta {
            input,
            override_text,
            output,
            derive,
        }) => cmd_meta(
            cli.config.as_deref(),
            &input,
            override_text,
            output.as_deref(),
            &derive,
        ),
        Some(Commands::Json {
            inputs,
            output,
            compact,
            sequential,
            derive,
        }) => cmd_json(
            cli.config.as_deref(),
            &inputs,
            output.as_deref(),
            compact,
            !sequential,
            &derive,
        ),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: metadesc <COMMAND> <FILE>".yellow());
            println!("       metadesc --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Load the configuration file, if any, and apply command-line switches.
fn load_config(
    path: Option<&Path>,
    args: &DeriveArgs,
) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(level) = args.cleanup {
        config.derive.sanitize = SanitizeOptions::from_preset(level.into());
    }
    if args.keep_tables {
        config.derive.strip_tables = false;
    }

    log::debug!("Effective config: {:?}", config);
    Ok(config)
}

/// Build the page pipeline; an explicit override turns the directive on.
fn builder(config: Config, override_text: Option<String>) -> Metadesc {
    match override_text {
        Some(text) => Metadesc::new()
            .with_config(config)
            .with_functions(true)
            .with_override(text),
        None => Metadesc::new().with_config(config),
    }
}

fn cmd_derive(
    config_path: Option<&Path>,
    input: &Path,
    override_text: Option<String>,
    args: &DeriveArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path, args)?;
    let result = builder(config, override_text).describe_file(input)?;

    match result.description() {
        Some(desc) => println!("{}", desc),
        None => println!("{}", "No description derived".yellow()),
    }

    if result.outcome() == RenderOutcome::AlreadyPresent {
        log::info!("Description taken from override");
    }

    Ok(())
}

fn cmd_meta(
    config_path: Option<&Path>,
    input: &Path,
    override_text: Option<String>,
    output: Option<&Path>,
    args: &DeriveArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path, args)?;
    let result = builder(config, override_text).describe_file(input)?;

    if result.meta_tags().is_empty() {
        println!("{}", "No description derived".yellow());
        return Ok(());
    }

    let html = result.meta_tags().to_html();

    if let Some(path) = output {
        fs::write(path, &html)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", html);
    }

    Ok(())
}

fn cmd_json(
    config_path: Option<&Path>,
    inputs: &[PathBuf],
    output: Option<&Path>,
    compact: bool,
    parallel: bool,
    args: &DeriveArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path, args)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Describing pages...");

    let results = batch::describe_files_with(inputs, &config.derive, parallel, |_, _| {
        pb.inc(1)
    });

    pb.finish_with_message("Done!");

    let mut failed = 0;
    let entries: Vec<FileDescription> = results
        .into_iter()
        .map(|(path, result)| {
            let file = path.display().to_string();
            match result {
                Ok(description) => FileDescription {
                    file,
                    description,
                    error: None,
                },
                Err(e) => {
                    failed += 1;
                    FileDescription {
                        file,
                        description: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect();

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&entries)?,
        JsonFormat::Compact => serde_json::to_string(&entries)?,
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    if failed > 0 {
        eprintln!(
            "{} {} of {} files could not be read",
            "Warning:".yellow().bold(),
            failed,
            inputs.len()
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "metadesc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Meta description derivation tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/metadesc".dimmed());
    println!("License: MIT");
}
