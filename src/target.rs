//! Target URL acquisition: explicit argument first, piped stdin second.

use std::io::{self, BufRead, IsTerminal};

use thiserror::Error;

/// Shown in place of the URL when no target could be resolved.
pub const TARGET_PLACEHOLDER: &str = "Could not read current page URL.";

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("no target URL was provided and stdin did not supply one")]
    Unavailable,
}

/// Resolves the URL to classify.
///
/// An explicit non-empty argument wins; otherwise the first non-empty line of
/// piped stdin is used. An interactive stdin is never read.
pub fn resolve_target(explicit: Option<String>) -> Result<String, TargetError> {
    if let Some(url) = explicit {
        let url = url.trim();
        if !url.is_empty() {
            return Ok(url.to_string());
        }
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(TargetError::Unavailable);
    }

    first_url_line(stdin.lock()).ok_or(TargetError::Unavailable)
}

fn first_url_line<R: BufRead>(reader: R) -> Option<String> {
    for line in reader.lines() {
        let line = line.ok()?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_argument_is_trimmed() {
        let target = resolve_target(Some("  http://example.com \n".to_string()));
        assert_eq!(target.expect("target"), "http://example.com");
    }

    #[test]
    fn first_url_line_skips_blank_lines() {
        let input = b"\n   \nhttp://example.com\nhttp://second.example\n";
        assert_eq!(
            first_url_line(&input[..]),
            Some("http://example.com".to_string())
        );
    }

    #[test]
    fn first_url_line_empty_input_yields_none() {
        assert_eq!(first_url_line(&b""[..]), None);
        assert_eq!(first_url_line(&b"\n\n"[..]), None);
    }
}
