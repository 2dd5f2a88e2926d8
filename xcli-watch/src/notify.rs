//! Per-tweet notifications.

use std::io::Write;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Preview length in characters.
const PREVIEW_CHARS: usize = 100;

/// How long `osascript` may run.
const NOTIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// Alerts the user that a tweet arrived. Failures are swallowed.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Notifies about a tweet from `username`.
    async fn notify(&self, username: &str, text: &str);
}

/// Desktop notification on macOS, terminal bell elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    /// Builds the AppleScript for a notification.
    pub fn script(username: &str, text: &str) -> String {
        let preview: String = text
            .chars()
            .take(PREVIEW_CHARS)
            .collect::<String>()
            .replace('"', "\\\"")
            .replace('\n', " ");
        format!("display notification \"{preview}\" with title \"x-cli: @{username}\"")
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, username: &str, text: &str) {
        if cfg!(target_os = "macos") {
            let child = Command::new("osascript")
                .arg("-e")
                .arg(Self::script(username, text))
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .output();
            if let Err(e) = tokio::time::timeout(NOTIFY_TIMEOUT, child).await {
                debug!(error = %e, "Notification timed out");
            }
        } else {
            let mut stdout = std::io::stdout();
            let _ = stdout.write_all(b"\x07");
            let _ = stdout.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_escapes_and_truncates() {
        let script = DesktopNotifier::script("jack", "say \"hi\"\nnow");
        assert_eq!(
            script,
            "display notification \"say \\\"hi\\\" now\" with title \"x-cli: @jack\""
        );

        let long = "x".repeat(300);
        let script = DesktopNotifier::script("a", &long);
        assert!(script.contains(&"x".repeat(100)));
        assert!(!script.contains(&"x".repeat(101)));
    }
}
