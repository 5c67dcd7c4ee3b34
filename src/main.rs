use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use diffsplit::{Diff, Format, OutputError};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "diffsplit")]
#[command(about = "Split a unified git diff into per-file change records")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every file touched by the diff
    Files {
        /// Diff to read (defaults to stdin; "-" also reads stdin)
        input: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the verbatim diff segment for one file
    Show {
        /// File name as it appears on either side of the diff
        path: String,
        /// Diff to read (defaults to stdin; "-" also reads stdin)
        input: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Generate a man page
    Man,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Files { input, format } => {
            let diff = Diff::parse(&diffsplit::read_input(input.as_deref())?);
            info!(files = diff.files.len(), "parsed diff");
            write_stdout(diffsplit::render(&diff, format)?.as_bytes())?;
        }
        Commands::Show { path, input } => {
            let diff = Diff::parse(&diffsplit::read_input(input.as_deref())?);
            let mut segment = diffsplit::extract(&diff, &path)?;
            if !segment.ends_with('\n') {
                segment.push('\n');
            }
            write_stdout(segment.as_bytes())?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let mut out = Vec::new();
            clap_complete::generate(shell, &mut cmd, "diffsplit", &mut out);
            write_stdout(&out)?;
        }
        Commands::Man => {
            let mut out = Vec::new();
            clap_mangen::Man::new(Cli::command())
                .render(&mut out)
                .map_err(|e| OutputError::RenderFailed {
                    message: e.to_string(),
                })?;
            write_stdout(&out)?;
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays machine-readable
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn write_stdout(bytes: &[u8]) -> Result<(), OutputError> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(bytes)
        .and_then(|()| stdout.flush())
        .map_err(|e| OutputError::WriteFailed {
            message: e.to_string(),
        })
}
