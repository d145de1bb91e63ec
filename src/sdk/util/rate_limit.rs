use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Blocking wrapper around a direct governor limiter. One instance is
/// shared per remote service.
#[derive(Clone)]
pub struct Limiter {
    inner: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl Limiter {
    pub fn per_minute(requests: u32) -> Self {
        let quota = Quota::per_minute(NonZeroU32::new(requests).unwrap());
        Self {
            inner: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Blocks the calling thread until a permit is available.
    pub fn wait(&self) {
        while self.inner.check().is_err() {
            thread::sleep(Duration::from_millis(50));
        }
    }
}

pub fn maps_limiter() -> Limiter {
    Limiter::per_minute(40)
}

pub fn safety_limiter() -> Limiter {
    Limiter::per_minute(20)
}
