use hoop_core::{Point, StreamInstant};

/// Slack for float error in timestamp differences, e.g. 0.3 - 0.2 < 0.1.
const TIME_EPSILON: f64 = 1e-9;

/// A recorded ball position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallSample {
    pub position: Point,
    pub timestamp: StreamInstant,
}

/// Records the ball's path while it is above the rim, at most one sample per
/// `interval` seconds.
#[derive(Debug)]
pub struct TrailRecorder {
    interval: f64,
    samples: Vec<BallSample>,
}

impl TrailRecorder {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            samples: Vec::new(),
        }
    }

    /// Feed this frame's ball and rim positions and return the trail, oldest first.
    ///
    /// The trail is dropped as soon as the ball is at or below the rim, or either
    /// position is missing.
    pub fn update(
        &mut self,
        ball: Option<Point>,
        rim: Option<Point>,
        now: StreamInstant,
    ) -> Vec<Point> {
        match (ball, rim) {
            (Some(ball), Some(rim)) if ball.y < rim.y => {
                let due = self
                    .samples
                    .last()
                    .map_or(true, |last| {
                        now.duration_since(&last.timestamp) + TIME_EPSILON >= self.interval
                    });
                if due {
                    self.samples.push(BallSample {
                        position: ball,
                        timestamp: now,
                    });
                }
            }
            _ => self.samples.clear(),
        }
        self.points()
    }

    pub fn points(&self) -> Vec<Point> {
        self.samples.iter().map(|s| s.position).collect()
    }

    pub fn samples(&self) -> &[BallSample] {
        &self.samples
    }
}
