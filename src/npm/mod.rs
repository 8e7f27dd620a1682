//! npm publishing: version export, README badge, publish and version bump

pub mod package;
pub mod version;

pub use package::{PackageJson, PACKAGE_FILE_NAME};
pub use version::{increment_version, INITIAL_VERSION};

use crate::core::error::{Result, VrepoError};
use crate::process::{CommandOutput, CommandSpec, SharedRunner};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Shields badge fragment carrying the package version
const BADGE_PATTERN: &str = r"version-[^-\s]*-blue";

/// npm backend for one source directory
pub struct Npm {
    source: PathBuf,
    version_path: PathBuf,
    package: PackageJson,
    runner: SharedRunner,
}

impl Npm {
    /// Load the package.json of `source`
    pub fn new(source: &Path, version_path: PathBuf, runner: SharedRunner) -> Result<Self> {
        Ok(Self {
            source: source.to_path_buf(),
            version_path,
            package: PackageJson::load(source)?,
            runner,
        })
    }

    pub fn package(&self) -> &PackageJson {
        &self.package
    }

    fn npm(&self, args: &[&str]) -> Result<CommandOutput> {
        self.runner
            .run(&CommandSpec::new("npm", &self.source).args(args.iter().copied()))
    }

    /// Whether `npm whoami` finds a logged in user
    pub fn logged_in(&self) -> Result<bool> {
        Ok(self.npm(&["whoami"])?.success())
    }

    /// Publish the package and bump its version. Returns the published version.
    pub fn publish(&mut self) -> Result<String> {
        if !self.logged_in()? {
            return Err(VrepoError::NpmNotLoggedIn);
        }

        let version = self.package.version().unwrap_or(INITIAL_VERSION).to_string();
        let name = self.package.name().unwrap_or_default().to_string();

        if let Some(parent) = self.version_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.version_path, format!("module.exports=\"{}\";", version))?;
        debug!(path = %self.version_path.display(), version = %version, "exported version");

        if self.package.has_bin() {
            let link = self.npm(&["link"])?;
            if !link.success() {
                return Err(VrepoError::npm_step(
                    "Failed to link the npm package",
                    link.error_text(),
                ));
            }
        }

        let readme_path = self.source.join("README.md");
        let original_readme = if readme_path.is_file() {
            let readme = fs::read_to_string(&readme_path)?;
            fs::write(&readme_path, replace_badge(&readme, &version)?)?;
            Some(readme)
        } else {
            None
        };
        let restore_readme = |readme: &Option<String>| -> Result<()> {
            if let Some(readme) = readme {
                fs::write(&readme_path, readme)?;
            }
            Ok(())
        };

        let publish = self.npm(&["publish"])?;
        if !publish.success() {
            warn!(package = %name, "npm publish failed: {}", publish.error_text());
            restore_readme(&original_readme)?;
            return Err(VrepoError::NpmPublishFailed { name });
        }

        let bumped = increment_version(self.package.version()).and_then(|next| {
            self.package.advance_version(next);
            self.package.save()
        });
        if let Err(e) = bumped {
            restore_readme(&original_readme)?;
            return Err(e);
        }

        info!(package = %name, version = %version, "published npm package");
        Ok(version)
    }
}

/// Point the README version badge at `version`
fn replace_badge(readme: &str, version: &str) -> Result<String> {
    let badge = Regex::new(BADGE_PATTERN).map_err(|e| VrepoError::internal(e.to_string()))?;
    Ok(badge
        .replace(readme, format!("version-{}-blue", version).as_str())
        .into_owned())
}
