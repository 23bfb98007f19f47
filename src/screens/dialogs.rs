use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::warn;

/// Modal dialogs shown by screens.
#[async_trait]
pub trait Dialogs: Send + Sync {
    async fn alert(&self, message: &str);

    /// Asks a yes/no question. `false` unless the user accepts.
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Dialogs on the terminal. With `assume_yes` every confirmation is
/// accepted without reading stdin.
#[derive(Debug, Clone, Default)]
pub struct ConsoleDialogs {
    pub assume_yes: bool,
    alerts: Arc<AtomicUsize>,
}

impl ConsoleDialogs {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            alerts: Arc::default(),
        }
    }

    /// Alerts shown so far, across every clone.
    pub fn alert_count(&self) -> usize {
        self.alerts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Dialogs for ConsoleDialogs {
    async fn alert(&self, message: &str) {
        self.alerts.fetch_add(1, Ordering::SeqCst);
        println!("{message}");
    }

    async fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let mut stdout = tokio::io::stdout();
        if let Err(e) = stdout.write_all(format!("{prompt} [y/N] ").as_bytes()).await {
            warn!(error = %e, "Cannot write prompt");
            return false;
        }
        let _ = stdout.flush().await;

        let mut answer = String::new();
        let mut stdin = BufReader::new(tokio::io::stdin());
        match stdin.read_line(&mut answer).await {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                warn!(error = %e, "Cannot read answer");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_alerts_are_counted_across_clones() {
        let dialogs = ConsoleDialogs::new(true);
        let shared = dialogs.clone();

        shared.alert("first").await;
        dialogs.alert("second").await;

        assert_eq!(dialogs.alert_count(), 2);
        assert!(shared.confirm("Proceed?").await);
    }
}
