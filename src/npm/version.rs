use crate::core::error::{Result, VrepoError};

/// Version given to packages without one
pub const INITIAL_VERSION: &str = "1.0.0";

/// Bump a dotted version. Every component after the first rolls over to 0
/// once it passes 9, carrying into the component before it.
pub fn increment_version(version: Option<&str>) -> Result<String> {
    let Some(version) = version else {
        return Ok(INITIAL_VERSION.to_string());
    };

    let mut parts = version
        .trim()
        .split('.')
        .map(|part| part.parse::<u64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| VrepoError::invalid_version(version))?;

    for index in (0..parts.len()).rev() {
        if index == 0 || parts[index] < 9 {
            parts[index] += 1;
            break;
        }
        parts[index] = 0;
    }

    Ok(parts
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join("."))
}
