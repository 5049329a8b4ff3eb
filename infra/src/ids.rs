use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Identifier for a placed order, derived from its creation time in
/// milliseconds since the epoch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    pub fn from_millis(millis: i64) -> Self {
        OrderId(millis)
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = ParseIntError;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Ok(OrderId(src.parse()?))
    }
}

/// Generates timestamp ids that are strictly increasing within one process,
/// even when the clock has not moved on since the previous id.
#[derive(Debug, Default)]
pub struct IdGen {
    last: AtomicI64,
}

impl IdGen {
    pub fn new() -> Self {
        IdGen {
            last: AtomicI64::new(0),
        }
    }

    pub fn next(&self) -> OrderId {
        let now = wall_clock_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return OrderId(candidate),
                Err(seen) => prev = seen,
            }
        }
    }
}

fn wall_clock_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}
