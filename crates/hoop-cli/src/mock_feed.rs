use std::time::Duration;

use hoop_core::{BBox, Detection, DetectionClass, DetectionFrame, StreamClock};
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Frames in one shot: an arc towards the rim followed by a drop through it.
const SHOT_FRAMES: u64 = 45;
const ARC_FRAMES: u64 = 30;
const RIM: (i32, i32) = (300, 200);

/// A synthetic detector feed for trying the pipeline without a camera.
///
/// A shooter and a defender stand in front of the hoop and the ball is shot
/// through the rim over and over.
pub struct MockFeed {
    ticker: Interval,
    clock: StreamClock,
    frame: u64,
    /// Stop after this many frames, `None` runs forever
    limit: Option<u64>,
}

impl MockFeed {
    pub fn new(period: Duration, limit: Option<u64>) -> Self {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            ticker,
            clock: StreamClock::start(),
            frame: 0,
            limit,
        }
    }

    pub async fn next_frame(&mut self) -> Option<DetectionFrame> {
        if self.limit.is_some_and(|limit| self.frame >= limit) {
            return None;
        }
        self.ticker.tick().await;
        let detections = detections_at(self.frame);
        self.frame += 1;
        Some(DetectionFrame {
            timestamp: self.clock.now(),
            detections,
        })
    }
}

fn centered(class: DetectionClass, (x, y): (i32, i32), (w, h): (i32, i32)) -> Detection {
    Detection::new(class, BBox::new(x - w / 2, y - h / 2, x + w / 2, y + h / 2), 0.9)
}

/// Ball position for frame `frame`. The arc ends just above the top zone, then
/// the ball falls straight through the rim.
pub(crate) fn ball_at(frame: u64) -> (i32, i32) {
    let phase = frame % SHOT_FRAMES;
    if phase < ARC_FRAMES {
        let s = phase as f64 / ARC_FRAMES as f64;
        let x = 120.0 + 180.0 * s;
        let y = (1.0 - s) * 380.0 + s * 150.0 - 400.0 * s * (1.0 - s);
        (x as i32, y as i32)
    } else {
        let fallen = (phase - ARC_FRAMES + 1) as i32;
        (RIM.0, 150 + fallen * 8)
    }
}

pub(crate) fn detections_at(frame: u64) -> Vec<Detection> {
    let sway = ((frame as f64) / 20.0).sin() * 15.0;
    vec![
        centered(DetectionClass::Rim, RIM, (40, 12)),
        centered(DetectionClass::Person, (100, 400), (60, 160)),
        centered(DetectionClass::Person, (450 + sway as i32, 380), (60, 160)),
        centered(DetectionClass::Ball, ball_at(frame), (16, 16)),
    ]
}
