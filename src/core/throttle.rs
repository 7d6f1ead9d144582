//! Failed-login attempt throttling
//!
//! Counts consecutive failed logins and imposes a cooldown once the limit is
//! reached. All state lives in the struct, never in module-level statics, so
//! each login session (and each test) owns an independent counter. Nothing is
//! persisted: a restarted process starts with a clean slate, a documented
//! weakness of the original scheme that is kept as-is.

use tokio::time::Instant;

/// Throttle configuration
#[derive(Debug, Clone)]
pub struct ThrottleConfig {
    /// Consecutive failures before the cooldown kicks in
    pub max_failures: u32,
    /// Cooldown imposed after the limit is reached
    pub cooldown: std::time::Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            max_failures: 5,
            cooldown: std::time::Duration::from_secs(15 * 60),
        }
    }
}

/// Per-session failed-attempt counter with cooldown
#[derive(Debug)]
pub struct LoginThrottle {
    config: ThrottleConfig,
    failures: u32,
    last_failure: Option<Instant>,
}

impl LoginThrottle {
    /// Create a throttle with the given limits
    pub fn new(config: ThrottleConfig) -> Self {
        Self {
            config,
            failures: 0,
            last_failure: None,
        }
    }

    /// Record one failed attempt and stamp the current time
    pub fn record_failure(&mut self) {
        self.failures += 1;
        self.last_failure = Some(Instant::now());
    }

    /// Whether a new attempt may proceed.
    ///
    /// Returns false only while the failure count has reached the limit and
    /// the cooldown has not yet elapsed. Once the cooldown elapses the counter
    /// is reset on the spot and the attempt is allowed.
    pub fn can_attempt(&mut self) -> bool {
        self.can_attempt_at(Instant::now())
    }

    fn can_attempt_at(&mut self, now: Instant) -> bool {
        if self.failures < self.config.max_failures {
            return true;
        }
        match self.last_failure {
            Some(at) if now.duration_since(at) < self.config.cooldown => false,
            _ => {
                self.reset();
                true
            }
        }
    }

    /// Zero the counter after a successful login
    pub fn reset(&mut self) {
        self.failures = 0;
        self.last_failure = None;
    }

    /// Current consecutive-failure count
    pub fn failures(&self) -> u32 {
        self.failures
    }
}

impl Default for LoginThrottle {
    fn default() -> Self {
        Self::new(ThrottleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fresh_throttle_allows() {
        let mut throttle = LoginThrottle::default();
        assert!(throttle.can_attempt());
        assert_eq!(throttle.failures(), 0);
    }

    #[test]
    fn test_blocks_after_limit() {
        let mut throttle = LoginThrottle::default();
        for _ in 0..4 {
            throttle.record_failure();
            assert!(throttle.can_attempt());
        }
        throttle.record_failure();
        assert!(!throttle.can_attempt());
        assert_eq!(throttle.failures(), 5);
    }

    #[test]
    fn test_cooldown_elapse_resets_counter() {
        let mut throttle = LoginThrottle::default();
        for _ in 0..5 {
            throttle.record_failure();
        }
        let now = Instant::now();
        assert!(!throttle.can_attempt_at(now + Duration::from_secs(14 * 60)));
        assert!(throttle.can_attempt_at(now + Duration::from_secs(15 * 60)));
        // Implicit reset happened on the allowing check
        assert_eq!(throttle.failures(), 0);
    }

    #[test]
    fn test_reset_on_success() {
        let mut throttle = LoginThrottle::default();
        for _ in 0..5 {
            throttle.record_failure();
        }
        throttle.reset();
        assert!(throttle.can_attempt());
        assert_eq!(throttle.failures(), 0);
    }

    #[test]
    fn test_custom_limits() {
        let mut throttle = LoginThrottle::new(ThrottleConfig {
            max_failures: 2,
            cooldown: Duration::from_secs(60),
        });
        throttle.record_failure();
        assert!(throttle.can_attempt());
        throttle.record_failure();
        assert!(!throttle.can_attempt());
    }
}
