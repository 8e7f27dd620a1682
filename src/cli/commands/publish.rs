use crate::cli::commands::open_repo;
use crate::cli::output;
use crate::cli::SourceArgs;
use crate::repo::Backends;
use anyhow::Result;
use colored::Colorize;

/// Execute the publish command
pub fn execute(sources: SourceArgs) -> Result<()> {
    for source in sources.resolve() {
        let mut repo = open_repo(&source, Backends::npm_only())?;

        let npm = repo.npm_mut()?;
        let package = npm.package();
        let label = format!(
            "{}@{}",
            package.name().unwrap_or_default(),
            package.version().unwrap_or_default()
        );
        output::marker(format!("Publishing npm package {}.", label.bold()));

        let version = npm.publish()?;
        output::success(format!(
            "Published version {}, next version is {}.",
            version,
            npm.package().version().unwrap_or_default()
        ));
    }

    Ok(())
}
