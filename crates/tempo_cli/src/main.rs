//! Tempo CLI, the command-line front end for the propagation-delay engine.
//!
//! Provides `tempo profiles` to inspect the delay profiles of a project,
//! `tempo delay` to time every routed item per net class, and `tempo length`
//! to convert a delay budget back into a track length.

#![warn(missing_docs)]

mod delay;
mod length;
mod profiles;
mod project;

use std::io::IsTerminal;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Tempo, propagation-delay analysis for multilayer boards.
#[derive(Parser, Debug)]
#[command(name = "tempo", version, about = "Tempo propagation-delay engine")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `tempo.toml` file or the directory containing it.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the delay profiles of the project.
    Profiles(ProfilesArgs),
    /// Compute the propagation delay of every routed item.
    Delay(DelayArgs),
    /// Convert a delay into the track length that produces it.
    Length(LengthArgs),
}

/// Arguments for the `tempo profiles` subcommand.
#[derive(Parser, Debug)]
pub struct ProfilesArgs {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `tempo delay` subcommand.
#[derive(Parser, Debug)]
pub struct DelayArgs {
    /// Only report items of this net class.
    #[arg(short, long)]
    pub net_class: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `tempo length` subcommand.
#[derive(Parser, Debug)]
pub struct LengthArgs {
    /// The delay to convert (e.g., "25ps", "1.2ns", "300fs").
    pub delay: String,

    /// Net class whose delay profile applies.
    #[arg(short, long)]
    pub net_class: String,

    /// Copper layer the track runs on.
    #[arg(short, long)]
    pub layer: String,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a config file or project directory.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Profiles(ref args) => profiles::run(args, &global),
        Command::Delay(ref args) => delay::run(args, &global),
        Command::Length(ref args) => length::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
