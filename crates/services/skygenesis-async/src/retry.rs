use backon::ExponentialBuilder;
use std::time::Duration;

/// Creates the default exponential backoff builder for network retries
///
/// Configured with:
/// - Initial interval: 500ms
/// - Max interval: 4s
/// - Factor: 2.0
/// - Jitter enabled
///
/// The attempt count is not set here; the client caps it per call with the
/// configured `max_network_retries`.
#[must_use]
pub fn default_backoff_builder() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(500))
        .with_max_delay(Duration::from_secs(4))
        .with_factor(2.0)
        .with_jitter()
}

/// Applies the configured retry budget to a backoff shape
#[must_use]
pub fn with_budget(backoff: ExponentialBuilder, max_network_retries: usize) -> ExponentialBuilder {
    backoff.with_max_times(max_network_retries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use backon::BackoffBuilder;

    #[test]
    fn budget_caps_attempts() {
        let delays: Vec<_> = with_budget(default_backoff_builder(), 2).build().collect();
        assert_eq!(delays.len(), 2);
    }

    #[test]
    fn zero_budget_never_retries() {
        assert_eq!(with_budget(default_backoff_builder(), 0).build().count(), 0);
    }

    #[test]
    fn delays_stay_within_bounds() {
        for d in with_budget(default_backoff_builder(), 6).build() {
            // jitter can at most double a delay
            assert!(d <= Duration::from_secs(8), "delay too large: {d:?}");
        }
    }
}
