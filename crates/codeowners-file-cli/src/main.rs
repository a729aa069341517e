//! CODEOWNERS File CLI
//!
//! A command-line tool for querying and editing CODEOWNERS files.

use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, debug, error};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::output::Output;
use cli::{Args, Command};
use codeowners_file_core::{Error, ParserConfig, find_codeowners_file, parse};

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose, args.json);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

/// Initialize tracing based on verbosity level.
fn init_tracing(verbosity: u8, json_output: bool) {
    // Don't pollute JSON output with log lines
    if json_output {
        return;
    }

    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}

/// Run the requested command against the resolved CODEOWNERS file.
fn run(args: &Args) -> Result<ExitCode, Error> {
    let path = resolve_file(args)?;
    debug!("using CODEOWNERS file {}", path.display());

    let aliases = args.aliases
        || matches!(args.command, Command::Aliases)
        || matches!(args.command, Command::Match { expand: true, .. });
    let config = ParserConfig::new().with_aliases(aliases);
    let mut doc = parse::parse_path_with_config(&path, &config)?;

    let stdout = io::stdout().lock();
    let use_colors = !args.json && io::stdout().is_terminal();
    let mut out = Output::new(stdout, args.json, use_colors);

    let mut exit = ExitCode::SUCCESS;
    match &args.command {
        Command::Match {
            path: target,
            expand,
        } => {
            let result = doc.match_path(target, *expand);
            out.match_result(result.as_ref())?;
            if result.is_none() {
                exit = ExitCode::from(1);
            }
        }
        Command::Owners { pattern } => {
            let owners = match pattern {
                Some(p) => doc.owners_of(p),
                None => doc.owners().to_vec(),
            };
            out.list(&owners)?;
        }
        Command::Patterns { owner } => {
            let patterns = match owner {
                Some(o) => doc.patterns_of(o),
                None => doc.patterns().to_vec(),
            };
            out.list(&patterns)?;
        }
        Command::Projects => {
            out.list(doc.projects())?;
        }
        Command::Aliases => {
            out.aliases(doc.aliases())?;
        }
        Command::UpdateOwners { pattern, owners } => {
            let count = doc.update_owners(pattern, owners.iter().cloned())?;
            out.count("updated", count)?;
        }
        Command::UpdateProjectOwners { project, owners } => {
            let count = doc.update_owners_by_project(project, owners.iter().cloned())?;
            out.count("updated", count)?;
        }
        Command::RenameOwner { old, new } => {
            let count = doc.rename_owner(old, new)?;
            out.count("renamed", count)?;
        }
        Command::RenameProject { old, new } => {
            let count = doc.rename_project(old, new)?;
            out.count("renamed", count)?;
        }
        Command::Unowned => {
            let unowned: Vec<String> = doc.unowned().map(str::to_string).collect();
            out.list(&unowned)?;
        }
        Command::AddUnowned { paths } => {
            doc.add_unowned(paths.iter().cloned());
            out.count("unowned", doc.unowned().count())?;
        }
        Command::RemoveUnowned { paths } => {
            doc.remove_unowned(paths.iter());
            out.count("unowned", doc.unowned().count())?;
        }
    }

    if args.command.mutates() {
        doc.save_to_path(&path)?;
        debug!("wrote changes back to {}", path.display());
    }

    Ok(exit)
}

/// Resolves the CODEOWNERS file to operate on: `--file` if given,
/// otherwise the standard locations under the repository root.
fn resolve_file(args: &Args) -> Result<PathBuf, Error> {
    if let Some(file) = &args.file {
        return Ok(file.clone());
    }
    find_codeowners_file(&args.repository_path).ok_or_else(|| {
        Error::usage(format!(
            "no CODEOWNERS file found under {}",
            args.repository_path.display()
        ))
    })
}
