//! pyclens command-line inspector
//!
//! Opens compiled Python bytecode containers, decodes them with
//! `pyclens-format`, and prints header summaries or the full object graph.
//! All file I/O and path handling live here; the format crate only ever
//! sees in-memory buffers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pyclens_format::{decode_body, decode_header, profile_for, Header, PycFile, SourceInfo};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod output;

use output::{resolve_color_choice, StyledOutput};

#[derive(Parser)]
#[command(name = "pyclens")]
#[command(about = "Inspect compiled Python bytecode containers", long_about = None)]
#[command(version)]
struct Cli {
    /// Color output: auto, always, never
    #[arg(long, global = true, value_name = "WHEN")]
    color: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show header information for a container file
    Info {
        /// Container file to inspect
        file: PathBuf,
    },

    /// Decode and print the full object graph
    Dump {
        /// Container file to decode
        file: PathBuf,
        /// Print the graph as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut out = StyledOutput::new(resolve_color_choice(cli.color.as_deref()));

    let result = match cli.command {
        Commands::Info { file } => cmd_info(&mut out, &file),
        Commands::Dump { file, json } => cmd_dump(&mut out, &file, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            out.stderr_error(&format!("error: {err:#}\n"));
            ExitCode::FAILURE
        }
    }
}

fn read_container(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn cmd_info(out: &mut StyledOutput, path: &Path) -> Result<()> {
    let bytes = read_container(path)?;
    let header = decode_header(&bytes)
        .with_context(|| format!("failed to decode header of {}", path.display()))?;

    print_header(out, &header);

    let body_supported = profile_for(&header.version)
        .map(|profile| profile.body.is_some())
        .unwrap_or(false);
    out.bold("object stream: ");
    if body_supported {
        out.plain("supported");
    } else {
        out.warning("no schema registered for this release");
    }
    out.newline();

    Ok(())
}

fn print_header(out: &mut StyledOutput, header: &Header) {
    out.bold("python version: ");
    out.info(&header.version.to_string());
    out.newline();

    out.bold("magic: ");
    out.plain(&header.magic.to_string());
    out.newline();

    if let Some(flags) = header.flags {
        out.bold("flags: ");
        out.plain(&format!("{flags:#04b}"));
        out.newline();
    }

    match header.source {
        SourceInfo::Hash { check_source, hash } => {
            out.bold("source hash: ");
            let rendered: String = hash.iter().map(|b| format!("{b:02x}")).collect();
            out.plain(&rendered);
            out.newline();
            out.bold("check source: ");
            out.plain(if check_source { "yes" } else { "no" });
            out.newline();
        }
        SourceInfo::MtimeSize { mtime, size } => {
            out.bold("source mtime: ");
            out.plain(&mtime.to_string());
            out.newline();
            out.bold("source size: ");
            out.plain(&size.to_string());
            out.newline();
        }
        SourceInfo::Mtime { mtime } => {
            out.bold("source mtime: ");
            out.plain(&mtime.to_string());
            out.newline();
        }
    }

    out.bold("header length: ");
    out.plain(&header.header_length.to_string());
    out.newline();
}

fn cmd_dump(out: &mut StyledOutput, path: &Path, json: bool) -> Result<()> {
    let bytes = read_container(path)?;
    let header = decode_header(&bytes)
        .with_context(|| format!("failed to decode header of {}", path.display()))?;
    let body = decode_body(&bytes, &header)
        .with_context(|| format!("failed to decode object stream of {}", path.display()))?;
    let file = PycFile { header, body };

    if json {
        let rendered =
            serde_json::to_string_pretty(&file).context("failed to render graph as JSON")?;
        out.plain(&rendered);
        out.newline();
    } else {
        print_header(out, &file.header);
        out.newline();
        out.plain(&format!("{:#?}", file.body));
        out.newline();
    }

    Ok(())
}
