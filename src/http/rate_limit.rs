//! Rate-limit bookkeeping
//!
//! GitHub reports quota on every response through three headers. The
//! connector keeps the values from the most recently completed response;
//! concurrent calls race and the last one to finish wins.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;

pub const LIMIT_HEADER: &str = "x-ratelimit-limit";
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Quota snapshot taken from one response
///
/// Each field is `None` until a response carrying a valid value is seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
    pub reset: Option<DateTime<Utc>>,
}

impl RateLimit {
    /// Read the three quota headers; missing or malformed values stay unset
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let reset = header_value::<i64>(headers, RESET_HEADER)
            .and_then(|epoch| DateTime::<Utc>::from_timestamp(epoch, 0));

        Self {
            limit: header_value(headers, LIMIT_HEADER),
            remaining: header_value(headers, REMAINING_HEADER),
            reset,
        }
    }

    /// Whether the quota is known to be used up
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

impl std::fmt::Display for RateLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let show = |v: Option<u32>| v.map_or_else(|| "?".to_string(), |v| v.to_string());
        write!(f, "{}/{} remaining", show(self.remaining), show(self.limit))?;
        if let Some(reset) = self.reset {
            write!(f, ", resets at {}", reset.format("%Y-%m-%d %H:%M:%S UTC"))?;
        }
        Ok(())
    }
}

fn header_value<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    let raw = headers.get(name)?;
    let parsed = raw.to_str().ok().and_then(|s| s.trim().parse().ok());
    if parsed.is_none() {
        tracing::trace!(header = name, value = ?raw, "ignoring malformed rate-limit header");
    }
    parsed
}

/// Connector-scoped rate-limit state, last writer wins
#[derive(Debug, Default)]
pub struct RateLimitState {
    current: RwLock<RateLimit>,
}

impl RateLimitState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot
    pub fn snapshot(&self) -> RateLimit {
        match self.current.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Replace the snapshot with the values from `headers`
    pub fn update(&self, headers: &HeaderMap) -> RateLimit {
        let next = RateLimit::from_headers(headers);
        match self.current.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
        next
    }
}
