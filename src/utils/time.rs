use rand::Rng;
use std::time::Duration;

pub const BASE_DELAY_MS: u64 = 1000;
pub const JITTER_MS: u64 = 1000;

/// Delay to wait after the failure at `attempt` (0-indexed).
///
/// `2^attempt * BASE_DELAY_MS` plus a jitter drawn uniformly from `[0, JITTER_MS)`.
/// The jitter is added on top of the exponential term, never in place of it.
pub fn backoff_delay(attempt: u32) -> Duration {
    let base = 2u64.saturating_pow(attempt).saturating_mul(BASE_DELAY_MS);
    Duration::from_millis(base.saturating_add(jitter_ms(JITTER_MS)))
}

fn jitter_ms(max_ms: u64) -> u64 {
    if max_ms == 0 {
        return 0;
    }
    rand::rng().random_range(0..max_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_within(attempt: u32, low_ms: u64, high_ms: u64) {
        for _ in 0..1000 {
            let delay = backoff_delay(attempt).as_millis() as u64;
            assert!(
                (low_ms..high_ms).contains(&delay),
                "attempt {} produced {}ms, expected [{}, {})",
                attempt,
                delay,
                low_ms,
                high_ms
            );
        }
    }

    #[test]
    fn first_retry_waits_between_one_and_two_seconds() {
        assert_within(0, 1000, 2000);
    }

    #[test]
    fn delays_double_per_attempt() {
        assert_within(1, 2000, 3000);
        assert_within(2, 4000, 5000);
        assert_within(4, 16000, 17000);
    }

    #[test]
    fn attempt_three_samples_stay_in_window() {
        assert_within(3, 8000, 9000);
    }

    #[test]
    fn jitter_actually_varies() {
        let samples: std::collections::HashSet<u128> =
            (0..200).map(|_| backoff_delay(0).as_millis()).collect();
        assert!(samples.len() > 1);
    }

    #[test]
    fn huge_attempt_saturates_instead_of_overflowing() {
        let delay = backoff_delay(200);
        assert_eq!(delay, Duration::from_millis(u64::MAX));
    }
}
