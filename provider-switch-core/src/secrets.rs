//! Secrets file (`KEY=value` lines) holding the alternate provider token

use crate::error::{CoreError, Result};
use std::io::Read;
use std::path::Path;

/// Key looked up in the secrets file
pub const SECRET_KEY: &str = "ANTHROPIC_AUTH_TOKEN";

/// Extract `key` from dotenv-formatted content.
///
/// The first entry named `key` wins. Surrounding whitespace and quote
/// characters are stripped from the value; an empty value counts as missing.
pub fn parse_secret(contents: &str, key: &str) -> Option<String> {
    find_secret(dotenvy::from_read_iter(contents.as_bytes()), key)
        .ok()
        .flatten()
}

/// Read `key` from the secrets file at `path`
pub fn read_secret(path: &Path, key: &str) -> Result<String> {
    if !path.exists() {
        return Err(CoreError::ConfigurationMissing(path.to_path_buf()));
    }

    let entries = dotenvy::from_path_iter(path)?;
    find_secret(entries, key)?.ok_or_else(|| CoreError::SecretMissing {
        key: key.to_string(),
        path: path.to_path_buf(),
    })
}

/// Malformed lines are skipped so one bad entry does not hide the token
fn find_secret<R: Read>(entries: dotenvy::Iter<R>, key: &str) -> Result<Option<String>> {
    for entry in entries {
        match entry {
            Ok((name, value)) if name == key => return Ok(clean_value(&value)),
            Ok(_) => {}
            Err(dotenvy::Error::Io(e)) => return Err(CoreError::Io(e)),
            Err(e) => log::warn!("Skipping unreadable secrets entry: {e}"),
        }
    }
    Ok(None)
}

fn clean_value(raw: &str) -> Option<String> {
    let value = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim();

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_value() {
        assert_eq!(
            parse_secret("ANTHROPIC_AUTH_TOKEN=abc123\n", SECRET_KEY),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_parse_strips_quotes() {
        assert_eq!(
            parse_secret("ANTHROPIC_AUTH_TOKEN=\"abc123\"\n", SECRET_KEY),
            Some("abc123".to_string())
        );
        assert_eq!(
            parse_secret("ANTHROPIC_AUTH_TOKEN='abc123'", SECRET_KEY),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_parse_first_match_wins() {
        let contents = "OTHER=1\nANTHROPIC_AUTH_TOKEN=first\nANTHROPIC_AUTH_TOKEN=second\n";
        assert_eq!(parse_secret(contents, SECRET_KEY), Some("first".to_string()));
    }

    #[test]
    fn test_parse_quoted_value_may_contain_equals() {
        assert_eq!(
            parse_secret("ANTHROPIC_AUTH_TOKEN='a=b=='", SECRET_KEY),
            Some("a=b==".to_string())
        );
    }

    #[test]
    fn test_parse_missing_or_empty() {
        assert_eq!(parse_secret("", SECRET_KEY), None);
        assert_eq!(parse_secret("ANTHROPIC_AUTH_TOKEN=\n", SECRET_KEY), None);
        assert_eq!(parse_secret("ANTHROPIC_AUTH_TOKEN=\"\"", SECRET_KEY), None);
        // Keys are case-sensitive and must match exactly
        assert_eq!(parse_secret("anthropic_auth_token=abc", SECRET_KEY), None);
        assert_eq!(parse_secret("# ANTHROPIC_AUTH_TOKEN=abc", SECRET_KEY), None);
        assert_eq!(parse_secret("ANTHROPIC_AUTH_TOKEN_OLD=abc", SECRET_KEY), None);
    }

    #[test]
    fn test_read_secret_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");

        let err = read_secret(&path, SECRET_KEY).unwrap_err();
        assert!(matches!(err, CoreError::ConfigurationMissing(_)));

        std::fs::write(&path, "OTHER=1\n").unwrap();
        let err = read_secret(&path, SECRET_KEY).unwrap_err();
        assert!(matches!(err, CoreError::SecretMissing { .. }));

        std::fs::write(&path, "OTHER=1\nANTHROPIC_AUTH_TOKEN=abc123\n").unwrap();
        assert_eq!(read_secret(&path, SECRET_KEY).unwrap(), "abc123");
    }
}
