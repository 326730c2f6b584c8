use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use crate::output::OutputFormat;

/// frost - build the launcher executables for frozen Python applications
#[derive(Parser)]
#[command(name = "frost")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile and link every declared target
    Build {
        /// Interpreter to query for runtime build configuration
        #[arg(long, default_value = "python3")]
        python: PathBuf,

        /// Directory for intermediate and final build output
        #[arg(long, default_value = "build")]
        build_dir: PathBuf,

        /// Compile with debug information
        #[arg(long)]
        debug: bool,
    },

    /// List the declared build targets
    Targets {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// RPM packaging post-processing
    Rpm {
        #[command(subcommand)]
        command: RpmCommands,
    },

    /// Write the installer's file-removal rules (Windows packaging only)
    Msi {
        /// Path of the emitted RemoveFile table fragment
        #[arg(long, default_value = "RemoveFile.idt")]
        output: PathBuf,
    },
}

#[derive(Subcommand)]
enum RpmCommands {
    /// Keep unpackaged auxiliary files from aborting the packaging run
    Patch {
        /// Generated spec file to patch in place
        spec_file: PathBuf,
    },

    /// Rename the produced package to a version-qualified name
    Rename {
        /// Generated spec file the package was built from
        spec_file: PathBuf,

        /// Directory holding the produced package
        #[arg(long, default_value = "dist")]
        dist_dir: PathBuf,

        /// Interpreter whose version tags the package name
        #[arg(long, default_value = "python3")]
        python: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .init();

    let result = match cli.command {
        Commands::Build {
            python,
            build_dir,
            debug,
        } => cmd::cmd_build(&python, &build_dir, debug),
        Commands::Targets { format } => cmd::cmd_targets(format),
        Commands::Rpm { command } => match command {
            RpmCommands::Patch { spec_file } => cmd::cmd_rpm_patch(&spec_file),
            RpmCommands::Rename {
                spec_file,
                dist_dir,
                python,
            } => cmd::cmd_rpm_rename(&dist_dir, &spec_file, &python),
        },
        Commands::Msi { output } => cmd::cmd_msi(&output),
    };

    if let Err(ref error) = result {
        output::print_error(&format!("{error:#}"));
        std::process::exit(1);
    }
    result
}
