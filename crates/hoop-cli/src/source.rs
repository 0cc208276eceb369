use std::{path::Path, time::Duration};

use anyhow::{Context, Result};
use hoop_core::{Detection, DetectionFrame, Point, StreamClock, StreamInstant};
use serde::Deserialize;
use tokio::{
    fs::File,
    io::{AsyncBufReadExt, BufReader, Lines},
    sync::mpsc,
};

use crate::mock_feed::MockFeed;

/// One line of a replay file.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ReplayLine {
    Frame {
        t: StreamInstant,
        detections: Vec<Detection>,
    },
    Click {
        x: i32,
        y: i32,
    },
}

/// Replays recorded detector output from a JSON-lines file.
///
/// Click lines are forwarded to the click queue as they are read, so they take
/// effect before the frame that follows them.
pub struct ReplaySource {
    lines: Lines<BufReader<File>>,
    line_no: usize,
    clicks: mpsc::UnboundedSender<Point>,
    /// Pace frames by their timestamps instead of reading as fast as possible
    realtime: Option<(StreamClock, Option<StreamInstant>)>,
}

impl ReplaySource {
    pub async fn open(
        path: impl AsRef<Path>,
        clicks: mpsc::UnboundedSender<Point>,
        realtime: bool,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .await
            .with_context(|| format!("Failed to open replay file {}", path.display()))?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            line_no: 0,
            clicks,
            realtime: realtime.then(|| (StreamClock::start(), None)),
        })
    }

    pub async fn next_frame(&mut self) -> Result<Option<DetectionFrame>> {
        while let Some(line) = self.lines.next_line().await? {
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            let parsed: ReplayLine = serde_json::from_str(&line)
                .with_context(|| format!("Invalid replay line {}", self.line_no))?;
            match parsed {
                ReplayLine::Click { x, y } => {
                    // The receiver only goes away when the pipeline stops.
                    let _ = self.clicks.send(Point::new(x, y));
                }
                ReplayLine::Frame { t, detections } => {
                    self.pace(t).await;
                    return Ok(Some(DetectionFrame {
                        timestamp: t,
                        detections,
                    }));
                }
            }
        }
        Ok(None)
    }

    async fn pace(&mut self, t: StreamInstant) {
        let Some((clock, first)) = &mut self.realtime else {
            return;
        };
        let first = *first.get_or_insert(t);
        let due = t.duration_since(&first);
        let elapsed = clock.now().as_secs_f64();
        if due > elapsed {
            tokio::time::sleep(Duration::from_secs_f64(due - elapsed)).await;
        }
    }
}

/// Where frames come from.
pub enum FrameSource {
    Replay(ReplaySource),
    Mock(MockFeed),
}

impl FrameSource {
    /// Wait for the next frame. `Ok(None)` is end-of-stream.
    pub async fn next_frame(&mut self) -> Result<Option<DetectionFrame>> {
        match self {
            FrameSource::Replay(replay) => replay.next_frame().await,
            FrameSource::Mock(mock) => Ok(mock.next_frame().await),
        }
    }
}
