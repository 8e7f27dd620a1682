use crate::cli::output;
use crate::ignore::RepoIgnore;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CheckIgnoreArgs {
    /// Source directory, defaults to the current working directory
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Paths to check, absolute or relative to the source
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the check-ignore command
pub fn execute(args: CheckIgnoreArgs) -> Result<()> {
    let source = args.source.unwrap_or_else(|| PathBuf::from("./"));
    let ignore = RepoIgnore::load(&source)
        .with_context(|| format!("Failed to load the .gitignore of \"{}\"", source.display()))?;

    let mut results = Vec::new();
    for path in &args.paths {
        let ignored = ignore.is_ignored(path)?;

        if args.json {
            results.push(json!({ "path": path, "ignored": ignored }));
        } else if ignored {
            output::item(format!("{}: {}.", path.display(), "ignored".yellow()));
        } else {
            output::item(format!("{}: {}.", path.display(), "not ignored".green()));
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(())
}
