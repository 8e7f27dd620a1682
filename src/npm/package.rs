//! `package.json` access that keeps every unknown key and the key order

use crate::config::to_pretty_json;
use crate::core::error::{Result, VrepoError};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const PACKAGE_FILE_NAME: &str = "package.json";

#[derive(Debug, Clone, PartialEq)]
pub struct PackageJson {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl PackageJson {
    /// Load `<source>/package.json`
    pub fn load(source: &Path) -> Result<Self> {
        let path = source.join(PACKAGE_FILE_NAME);
        if !path.is_file() {
            return Err(VrepoError::PackageJsonMissing { path });
        }

        let content = fs::read_to_string(&path)?;
        let fields = match serde_json::from_str(&content) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => {
                return Err(VrepoError::config_parse(path, "expected a JSON object"));
            },
            Err(e) => return Err(VrepoError::config_parse(path, e.to_string())),
        };

        Ok(Self { path, fields })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn string_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.string_field("name")
    }

    pub fn version(&self) -> Option<&str> {
        self.string_field("version")
    }

    /// Version that was last published
    pub fn live_version(&self) -> Option<&str> {
        self.string_field("live_version")
    }

    pub fn has_bin(&self) -> bool {
        self.fields.get("bin").is_some_and(|bin| !bin.is_null())
    }

    /// Record `version` as published and move on to `next`
    pub fn advance_version(&mut self, next: String) {
        match self.fields.get("version").cloned() {
            Some(current) => {
                self.fields.insert("live_version".to_string(), current);
            },
            None => {
                self.fields.remove("live_version");
            },
        }
        self.fields.insert("version".to_string(), Value::String(next));
    }

    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, to_pretty_json(&self.fields)?)?;
        Ok(())
    }
}
