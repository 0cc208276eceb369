use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// A point in time represented as a number of seconds since the start of the stream.
///
/// This instant is guaranteed to be:
///  - non-negative
///  - finite and non-NaN
#[derive(Serialize, Deserialize, Clone, Debug, Copy, Default, PartialEq, PartialOrd)]
#[serde(try_from = "f64", into = "f64")]
pub struct StreamInstant(f64);

impl StreamInstant {
    /// Create an instant from seconds since stream start. Returns `None` for negative
    /// or non-finite values.
    pub fn from_secs_f64(value: f64) -> Option<Self> {
        (value >= 0.0 && value.is_finite()).then_some(Self(value))
    }

    /// Get the underlying floating point value.
    pub fn as_secs_f64(&self) -> f64 {
        self.0
    }

    /// Get the duration between this instant and another instant, in seconds.
    ///
    /// If the other instant is after this instant, the result is 0, therefore this
    /// value is guaranteed to be non-negative.
    pub fn duration_since(&self, other: &Self) -> f64 {
        if self.0 < other.0 {
            return 0.0;
        }
        self.0 - other.0
    }
}

impl TryFrom<f64> for StreamInstant {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_secs_f64(value).ok_or_else(|| format!("invalid stream timestamp: {value}"))
    }
}

impl From<StreamInstant> for f64 {
    fn from(value: StreamInstant) -> Self {
        value.0
    }
}

impl std::ops::Add<Duration> for StreamInstant {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs.as_secs_f64())
    }
}

impl std::ops::AddAssign<Duration> for StreamInstant {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs.as_secs_f64();
    }
}

/// Monotonic clock that stamps frames relative to the moment it was started.
#[derive(Debug, Clone, Copy)]
pub struct StreamClock {
    start: Instant,
}

impl StreamClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn now(&self) -> StreamInstant {
        StreamInstant(self.start.elapsed().as_secs_f64())
    }
}
