use crate::cli::commands::open_repo;
use crate::cli::context::CliContext;
use crate::cli::output;
use crate::cli::SourceArgs;
use crate::ignore::{LargeFileScanner, ScanOptions, ScanPhase};
use crate::repo::Backends;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ListLargeFilesArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Paths to skip, comma separated; relative paths start at the source
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<PathBuf>,

    /// Maximum number of entries to list
    #[arg(long, default_value_t = 25)]
    pub limit: usize,

    /// Skip entries matched by the .gitignore
    #[arg(short, long)]
    pub gitignore: bool,

    /// Also list directories with the total size of their files
    #[arg(short, long)]
    pub directories: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the list-large-files command
pub fn execute(args: ListLargeFilesArgs) -> Result<()> {
    let options = ScanOptions {
        exclude: args.exclude.clone(),
        limit: args.limit,
        use_gitignore: args.gitignore,
        include_directories: args.directories,
    };
    let mut listings = Vec::new();

    for source in args.sources.resolve() {
        let repo = open_repo(&source, Backends::none())?;

        let pb = if args.json {
            indicatif::ProgressBar::hidden()
        } else {
            output::spinner(format!("Scanning {}", repo.name()))
        };
        let progress_pb = pb.clone();
        let entries = LargeFileScanner::new(repo.source(), options.clone())
            .with_progress(move |progress| {
                progress_pb.set_position(progress.entries_discovered as u64);
                if progress.phase == ScanPhase::Filtering {
                    progress_pb.set_message("Filtering");
                }
            })
            .scan()?;
        pb.finish_and_clear();

        if args.json {
            listings.push(json!({
                "name": repo.name(),
                "source": repo.source(),
                "files": entries,
            }));
            continue;
        }

        println!("{}:", repo.name().bold());
        for entry in &entries {
            output::item(format!("{}: {}.", entry.relative, output::format_bytes(entry.size)));
        }
        if entries.is_empty() && CliContext::is_verbose() {
            output::item("no files");
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
    }

    Ok(())
}
