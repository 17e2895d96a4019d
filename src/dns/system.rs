//! Host DNS platform adapters.
//!
//! Both functions touch the operating system and are best effort. Neither is
//! part of the probing path; callers invoke them explicitly.

use std::net::IpAddr;

use anyhow::{bail, Result};
use hickory_resolver::system_conf::read_system_conf;
use log::{debug, info, warn};
use tokio::process::Command;

/// DNS servers read from the host's resolver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedDns {
    /// First configured IPv4 name server
    pub primary: Option<String>,
    /// Second configured IPv4 name server
    pub secondary: Option<String>,
}

/// Reads the system resolver configuration and returns its first two IPv4
/// name servers.
///
/// Uses `/etc/resolv.conf` on Unix and the adapter settings on Windows, via
/// `hickory-resolver`. Any failure yields an empty `DetectedDns`: the engine
/// works fine without DNS values.
pub fn detect_system_dns() -> DetectedDns {
    match read_system_conf() {
        Ok((config, _opts)) => {
            let addrs = config
                .name_servers()
                .iter()
                .map(|ns| ns.socket_addr.ip());
            let detected = first_two_ipv4(addrs);
            debug!("Detected system DNS: {:?}", detected);
            detected
        }
        Err(e) => {
            warn!("Failed to read system DNS configuration: {e}");
            DetectedDns::default()
        }
    }
}

/// Picks the first two distinct IPv4 addresses.
///
/// Resolver configs list each server once per protocol, so duplicates are
/// expected and skipped.
fn first_two_ipv4(addrs: impl IntoIterator<Item = IpAddr>) -> DetectedDns {
    let mut found: Vec<String> = Vec::with_capacity(2);
    for ip in addrs {
        if let IpAddr::V4(v4) = ip {
            let s = v4.to_string();
            if !found.contains(&s) {
                found.push(s);
            }
        }
        if found.len() == 2 {
            break;
        }
    }
    let mut iter = found.into_iter();
    DetectedDns {
        primary: iter.next(),
        secondary: iter.next(),
    }
}

/// Flushes the operating system's DNS cache.
///
/// Runs the platform's flush command and returns the command line that
/// succeeded. This mutates host state and may need elevated privileges.
///
/// # Errors
///
/// Returns an error if no flush command is known for this platform or every
/// candidate command failed.
pub async fn flush_system_dns_cache() -> Result<String> {
    let candidates: &[&[&str]] = if cfg!(target_os = "windows") {
        &[&["ipconfig", "/flushdns"]]
    } else if cfg!(target_os = "macos") {
        &[&["dscacheutil", "-flushcache"], &["killall", "-HUP", "mDNSResponder"]]
    } else if cfg!(target_os = "linux") {
        &[
            &["resolvectl", "flush-caches"],
            &["systemd-resolve", "--flush-caches"],
        ]
    } else {
        bail!("DNS cache flush is not supported on this platform");
    };

    let mut last_error = None;
    for argv in candidates {
        let command_line = argv.join(" ");
        match Command::new(argv[0]).args(&argv[1..]).output().await {
            Ok(output) if output.status.success() => {
                info!("Flushed DNS cache with `{command_line}`");
                return Ok(command_line);
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                debug!("`{command_line}` exited with {}: {stderr}", output.status);
                last_error = Some(anyhow::anyhow!(
                    "`{command_line}` exited with {}: {stderr}",
                    output.status
                ));
            }
            Err(e) => {
                debug!("`{command_line}` could not be started: {e}");
                last_error = Some(
                    anyhow::Error::new(e).context(format!("`{command_line}` could not be started")),
                );
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| anyhow::anyhow!("no DNS flush command available"))
        .context("Failed to flush DNS cache"))
}
