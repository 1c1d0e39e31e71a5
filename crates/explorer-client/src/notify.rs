//! Transient error notice.

use std::time::Duration;

use tokio::time::Instant;

/// Holds at most one message, which expires after a fixed lifetime.
///
/// Time is read from the tokio clock so paused-time tests can advance it.
#[derive(Debug, Clone)]
pub struct Notifier {
    ttl: Duration,
    current: Option<(String, Instant)>,
}

impl Notifier {
    /// A notifier whose messages live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    /// Show `message`, replacing whatever was shown before.
    pub fn raise(&mut self, message: impl Into<String>) {
        self.current = Some((message.into(), Instant::now()));
    }

    /// The visible message, if it has not expired.
    pub fn current(&self) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|(_, raised_at)| raised_at.elapsed() < self.ttl)
            .map(|(message, _)| message.as_str())
    }

    /// Hide the message now.
    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_notice_expires_after_ttl() {
        let mut notifier = Notifier::new(Duration::from_secs(4));
        notifier.raise("Node not found");
        assert_eq!(notifier.current(), Some("Node not found"));

        tokio::time::advance(Duration::from_millis(3_999)).await;
        assert_eq!(notifier.current(), Some("Node not found"));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(notifier.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_notice_replaces_and_restarts() {
        let mut notifier = Notifier::new(Duration::from_secs(4));
        notifier.raise("first");
        tokio::time::advance(Duration::from_secs(3)).await;
        notifier.raise("second");
        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(notifier.current(), Some("second"));

        notifier.dismiss();
        assert_eq!(notifier.current(), None);
    }
}
