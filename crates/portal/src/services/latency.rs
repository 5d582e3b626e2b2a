//! Simulated backend latency.

use std::time::Duration;

/// Delay applied before every directory round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Latency {
    /// Complete immediately.
    #[default]
    None,
    /// Sleep for a fixed duration.
    Fixed(Duration),
}

impl Latency {
    /// The portal's usual one-second delay.
    pub const DEFAULT_MILLIS: u64 = 1000;

    /// `None` for zero, otherwise a fixed delay.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        if millis == 0 {
            Self::None
        } else {
            Self::Fixed(Duration::from_millis(millis))
        }
    }

    pub async fn wait(self) {
        if let Self::Fixed(delay) = self {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_millis() {
        assert_eq!(Latency::from_millis(0), Latency::None);
        assert_eq!(
            Latency::from_millis(Latency::DEFAULT_MILLIS),
            Latency::Fixed(Duration::from_secs(1))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_latency_sleeps() {
        let start = tokio::time::Instant::now();
        Latency::from_millis(250).wait().await;
        assert!(start.elapsed() >= Duration::from_millis(250));
    }
}
