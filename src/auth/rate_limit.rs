use std::sync::atomic::{AtomicU32, Ordering};

/// Throttles repeated failed login attempts.
///
/// The interface takes a caller key so the limiter can later be partitioned
/// per account or per origin without touching callers. The current
/// implementation keeps a single process-wide counter shared by all callers:
/// one noisy client blocks logins for everyone until any login succeeds.
pub struct LoginRateLimiter {
    failures: AtomicU32,
    max_failures: u32,
}

impl LoginRateLimiter {
    pub fn new(max_failures: u32) -> Self {
        Self {
            failures: AtomicU32::new(0),
            max_failures,
        }
    }

    /// Record a failed login attempt
    pub fn record_failure(&self, _key: &str) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }

    /// Reset the counter after a successful login
    pub fn record_success(&self, _key: &str) {
        self.failures.store(0, Ordering::SeqCst);
    }

    /// Whether login attempts are currently blocked
    pub fn is_blocked(&self, _key: &str) -> bool {
        self.failures.load(Ordering::SeqCst) >= self.max_failures
    }

    /// Current consecutive-failure count
    pub fn failure_count(&self) -> u32 {
        self.failures.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_at_the_ceiling_and_resets_on_success() {
        let limiter = LoginRateLimiter::new(3);
        assert!(!limiter.is_blocked("a@example.com"));

        limiter.record_failure("a@example.com");
        limiter.record_failure("b@example.com");
        assert!(!limiter.is_blocked("a@example.com"));

        limiter.record_failure("c@example.com");
        // counter is global: any key observes the block
        assert!(limiter.is_blocked("a@example.com"));
        assert!(limiter.is_blocked("d@example.com"));

        limiter.record_success("a@example.com");
        assert_eq!(limiter.failure_count(), 0);
        assert!(!limiter.is_blocked("a@example.com"));
    }
}
