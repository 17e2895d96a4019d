//! URL validation, normalization and deduplication.

use std::collections::HashSet;

use log::debug;
use url::Url;

/// Maximum URL length (2048 characters) to prevent DoS attacks via extremely long URLs.
/// This matches common browser and server limits (e.g., IE, Apache, Nginx default limits).
const MAX_URL_LENGTH: usize = 2048;

/// Validates and normalizes a raw input line into an absolute URL.
///
/// Trims whitespace and prepends `https://` when the input has no `http://` or
/// `https://` prefix (compared case-insensitively). The result must parse as a
/// URL with an http/https scheme and a non-empty host.
///
/// # Returns
///
/// `Some(url)` if the input can be probed, `None` if it is not a valid URL.
pub fn normalize_url(raw: &str) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    if candidate.len() > MAX_URL_LENGTH {
        debug!(
            "Rejecting URL exceeding maximum length ({} > {}): {}...",
            candidate.len(),
            MAX_URL_LENGTH,
            candidate.chars().take(50).collect::<String>()
        );
        return None;
    }

    match Url::parse(&candidate) {
        Ok(parsed) => {
            let has_host = parsed.host_str().is_some_and(|host| !host.is_empty());
            match parsed.scheme() {
                "http" | "https" if has_host => Some(parsed),
                _ => {
                    debug!("Rejecting URL without http(s) scheme and host: {trimmed}");
                    None
                }
            }
        }
        Err(e) => {
            debug!("Rejecting unparseable URL {trimmed}: {e}");
            None
        }
    }
}

/// Outcome of deduplicating a raw URL list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupOutcome {
    /// Unique entries, trimmed, in first-seen order
    pub unique: Vec<String>,
    /// Number of case-insensitive duplicates dropped
    pub duplicates: usize,
}

/// Deduplicates raw URL strings.
///
/// The key is the trimmed input lowercased; the first occurrence wins and is
/// kept as trimmed. Blank entries are skipped without counting as duplicates.
pub fn dedupe_urls<I, S>(raw_urls: I) -> DedupOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    let mut duplicates = 0;

    for raw in raw_urls {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            unique.push(trimmed.to_string());
        } else {
            duplicates += 1;
        }
    }

    DedupOutcome { unique, duplicates }
}
