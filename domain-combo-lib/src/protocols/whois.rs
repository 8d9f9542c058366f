//! WHOIS lookups through the system `whois` command.
//!
//! The client returns the command's raw output; deciding what that output
//! means is left to `crate::classify`.

use super::DirectoryLookup;
use crate::error::DomainCheckError;
use async_trait::async_trait;
use tokio::process::Command;

/// Default executable name.
const DEFAULT_COMMAND: &str = "whois";

/// WHOIS client backed by the system's `whois` command-line tool.
///
/// Server selection, referrals and encoding are whatever the installed tool
/// does; this client only runs it and captures stdout.
#[derive(Debug, Clone)]
pub struct WhoisClient {
    /// Executable to run
    command: String,
}

impl WhoisClient {
    /// Create a client that runs `whois` from `PATH`.
    pub fn new() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
        }
    }

    /// Create a client that runs a specific executable.
    pub fn with_command<C: Into<String>>(command: C) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Run the command for one domain and return its stdout.
    ///
    /// Output on stdout is returned even when the exit status is non-zero,
    /// since several whois builds exit with an error for unregistered names.
    /// An empty stdout together with a failed status is an error carrying
    /// stderr. Bytes that are not valid UTF-8 are replaced with U+FFFD and
    /// the rest of the response is still classified.
    async fn execute_whois_command(&self, domain: &str) -> Result<String, DomainCheckError> {
        let output = Command::new(&self.command)
            .arg(domain)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainCheckError::whois(
                    domain,
                    format!(
                        "Failed to execute {} command: {}. Make sure it is installed.",
                        self.command, e
                    ),
                )
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if stdout.trim().is_empty() && !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr.trim();
            return Err(DomainCheckError::whois(
                domain,
                if reason.is_empty() {
                    format!("{} exited with {}", self.command, output.status)
                } else {
                    reason.to_string()
                },
            ));
        }

        Ok(stdout)
    }
}

impl Default for WhoisClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectoryLookup for WhoisClient {
    async fn lookup(&self, domain: &str) -> Result<String, DomainCheckError> {
        self.execute_whois_command(domain).await
    }
}

/// Check if the system has a runnable whois command.
pub async fn is_whois_available() -> bool {
    Command::new(DEFAULT_COMMAND)
        .arg("--version")
        .output()
        .await
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whois_client_creation() {
        assert_eq!(WhoisClient::new().command(), "whois");
        assert_eq!(WhoisClient::default().command(), "whois");
        assert_eq!(WhoisClient::with_command("/usr/bin/jwhois").command(), "/usr/bin/jwhois");
    }

    #[tokio::test]
    async fn test_missing_command_is_lookup_error() {
        let client = WhoisClient::with_command("domain-combo-no-such-whois-binary");
        let err = client.lookup("onetwo.com").await.unwrap_err();

        assert!(matches!(err, DomainCheckError::WhoisError { .. }));
        assert!(err.to_string().contains("onetwo.com"));
        assert!(err.is_lookup_failure());
    }

    /// Write an executable shell script standing in for `whois`.
    #[cfg(unix)]
    fn fake_whois(dir: &tempfile::TempDir, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join("fake-whois");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_invalid_utf8_output_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let script = fake_whois(&dir, r#"printf 'No match for \377%s\n' "$1""#);

        let raw = WhoisClient::with_command(script)
            .lookup("onetwo.com")
            .await
            .unwrap();
        assert!(raw.contains('\u{FFFD}'));
        assert!(raw.contains("onetwo.com"));
        assert_eq!(
            crate::classify::classify(&raw),
            crate::types::Availability::Available
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_exit_keeps_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let script = fake_whois(&dir, r#"echo "No match for $1"; exit 1"#);

        let raw = WhoisClient::with_command(script)
            .lookup("free.io")
            .await
            .unwrap();
        assert_eq!(raw, "No match for free.io\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_exit_without_output_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let script = fake_whois(&dir, "echo 'connect: Connection refused' >&2; exit 2");

        let err = WhoisClient::with_command(script)
            .lookup("down.com")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "WHOIS error for 'down.com': connect: Connection refused"
        );
    }
}
