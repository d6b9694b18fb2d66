//! Credential env-file parsing
//!
//! Parses KEY=VALUE files with support for comments, blank lines, quoted
//! values and whitespace trimming. Parsing is separated from file I/O so it
//! can be tested without a filesystem.

use crate::error::HarnessError;
use std::collections::HashMap;
use std::path::Path;

/// Key of the single credential the stack reads at start
pub const ADMIN_PASSWORD_KEY: &str = "GF_SECURITY_ADMIN_PASSWORD";

/// Fixed default applied when the credential is unset
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Load an env file from disk
///
/// A missing file is not an error: the stack falls back to defaults, so an
/// absent file simply yields an empty map.
pub async fn load(path: &Path) -> Result<HashMap<String, String>, HarnessError> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => parse_content(&contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
        Err(e) => Err(HarnessError::Io(e)),
    }
}

/// Parse env file content from a string
pub fn parse_content(content: &str) -> Result<HashMap<String, String>, HarnessError> {
    let mut vars = HashMap::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(HarnessError::EnvFile {
                line: line_num + 1,
                reason: format!("expected KEY=VALUE, got '{}'", line),
            });
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(HarnessError::EnvFile {
                line: line_num + 1,
                reason: "key cannot be empty".to_string(),
            });
        }

        vars.insert(key.to_string(), unquote(value.trim()));
    }

    Ok(vars)
}

/// Resolve the admin credential, falling back to the fixed default
pub fn admin_password(vars: &HashMap<String, String>) -> String {
    vars.get(ADMIN_PASSWORD_KEY)
        .cloned()
        .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string())
}

/// Remove surrounding single or double quotes from a value if present
fn unquote(value: &str) -> String {
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        value[1..value.len() - 1].to_string()
    } else {
        value.to_string()
    }
}
