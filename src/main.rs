use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use weft::commands::release::ReleaseOptions;
use weft::commands::{check_in, release};
use weft::git::GitFailure;
use weft::validation::clap_version_validator;

#[derive(Parser)]
#[command(name = "weft")]
#[command(about = "Interactive git check-in and release tagging CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Branch, stage, commit, and push interactively
    #[command(name = "check-in")]
    CheckIn {
        /// Integration branch feature work is cut from and synced with
        #[arg(long, default_value = "develop")]
        branch: String,

        /// Remote to pull from and push to
        #[arg(long, default_value = "origin")]
        remote: String,
    },

    /// Create and push an annotated release tag
    Release {
        /// Version to tag, as bare MAJOR.MINOR.PATCH (e.g. 1.2.3)
        #[arg(long, value_parser = clap_version_validator)]
        version: String,

        /// Remote to push the tag to
        #[arg(long, default_value = "origin")]
        remote: String,

        /// Branch releases are cut from
        #[arg(long, default_value = "develop")]
        branch: String,

        /// Prefix prepended to the version to form the tag name
        #[arg(long, default_value = "v")]
        tag_prefix: String,

        /// Tag message (defaults to "Release <tag>")
        #[arg(long)]
        message: Option<String>,

        /// Replace the tag locally and on the remote if it already exists
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::CheckIn { branch, remote } => check_in::execute(branch, remote),
        Commands::Release {
            version,
            remote,
            branch,
            tag_prefix,
            message,
            force,
        } => release::execute(ReleaseOptions {
            version,
            remote,
            branch,
            tag_prefix,
            message,
            force,
        }),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("{} {err:#}", "✗".red().bold());
        // Mirror git's exit code when a git command is what failed.
        let code = err
            .downcast_ref::<GitFailure>()
            .and_then(|failure| failure.code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
