//! URL list input.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Reads URL lines from `path`, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub async fn read_urls(path: &Path) -> Result<Vec<String>> {
    let urls = if path.as_os_str() == "-" {
        info!("Reading URLs from stdin");
        read_url_lines(BufReader::new(tokio::io::stdin())).await?
    } else {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        read_url_lines(BufReader::new(file)).await?
    };
    info!("Total URLs in input: {}", urls.len());
    Ok(urls)
}

/// Collects trimmed lines, skipping blank lines and `#` comments.
pub async fn read_url_lines<R>(reader: R) -> Result<Vec<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut urls = Vec::new();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read line from input")?
    {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        urls.push(trimmed.to_string());
    }
    Ok(urls)
}
