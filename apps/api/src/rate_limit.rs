//! Per-key token-bucket rate limiting, held in process memory and injected
//! as a collaborator so handlers never touch the bucket map directly.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const LIMIT: u32 = 10;
const REFILL_INTERVAL: Duration = Duration::from_secs(60);

/// The rate-limiter collaborator. Returns whether `key` may proceed.
pub trait RateLimiter: Send + Sync {
    fn allow(&self, key: &str) -> bool;
}

struct Bucket {
    tokens: u32,
    last_refill: Instant,
}

/// Token bucket of 10 requests per key, fully refilled once more than 60
/// seconds have passed since the last refill.
#[derive(Default)]
pub struct TokenBucketLimiter {
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl TokenBucketLimiter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateLimiter for TokenBucketLimiter {
    fn allow(&self, key: &str) -> bool {
        let mut buckets = self.buckets.lock().expect("rate limit lock poisoned");
        let now = Instant::now();
        let bucket = buckets.entry(key.to_string()).or_insert(Bucket {
            tokens: LIMIT,
            last_refill: now,
        });

        if now.duration_since(bucket.last_refill) > REFILL_INTERVAL {
            bucket.tokens = LIMIT;
            bucket.last_refill = now;
        }

        if bucket.tokens == 0 {
            return false;
        }
        bucket.tokens -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_limit_then_denies() {
        let limiter = TokenBucketLimiter::new();
        for _ in 0..LIMIT {
            assert!(limiter.allow("customize:1.2.3.4"));
        }
        assert!(!limiter.allow("customize:1.2.3.4"));
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = TokenBucketLimiter::new();
        for _ in 0..LIMIT {
            assert!(limiter.allow("cover:a"));
        }
        assert!(!limiter.allow("cover:a"));
        assert!(limiter.allow("cover:b"));
    }
}
