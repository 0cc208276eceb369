use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use hoop_world::AnalyticsFrame;

/// Receives every analytics frame for display. Nothing flows back.
pub enum OverlaySink {
    /// Trace each frame to the log
    Log,
    /// Write each frame as a JSON line
    Jsonl(BufWriter<File>),
}

impl OverlaySink {
    pub fn jsonl(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create overlay file {}", path.display()))?;
        Ok(OverlaySink::Jsonl(BufWriter::new(file)))
    }

    pub fn draw(&mut self, frame: &AnalyticsFrame) -> Result<()> {
        match self {
            OverlaySink::Log => {
                tracing::debug!(
                    t = frame.timestamp.as_secs_f64(),
                    ball = ?frame.ball.map(|p| (p.x, p.y)),
                    rim = ?frame.rim.map(|p| (p.x, p.y)),
                    people = frame.people.len(),
                    trail = frame.trail.len(),
                    top_zone = ?frame.zones.map(|z| z.top),
                    bottom_zone = ?frame.zones.map(|z| z.bottom),
                    possession = ?frame.possession,
                    possession_rgb = ?frame.possession.map(|c| c.rgb()),
                    "{}",
                    frame.score_text()
                );
                for person in &frame.people {
                    tracing::trace!(
                        x = person.centroid.x,
                        y = person.centroid.y,
                        color = ?person.color,
                        rgb = ?person.color.rgb(),
                        "{}",
                        person.id.label()
                    );
                }
                if frame.scored {
                    tracing::info!(goal_count = frame.goal_count, "Bucket!");
                }
            }
            OverlaySink::Jsonl(writer) => {
                serde_json::to_writer(&mut *writer, frame)?;
                writer.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if let OverlaySink::Jsonl(writer) = self {
            writer.flush().context("Failed to flush overlay file")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use hoop_core::{AnalyticsSettings, BBox, Detection, DetectionClass, DetectionFrame};
    use hoop_world::AnalyticsTracker;

    use super::*;

    #[test]
    fn test_log_sink_draws_people_and_zones() {
        let mut tracker = AnalyticsTracker::new(&AnalyticsSettings::default());
        let frame = tracker.update(&DetectionFrame {
            timestamp: Default::default(),
            detections: vec![
                Detection::new(DetectionClass::Rim, BBox::new(280, 190, 320, 210), 0.9),
                Detection::new(DetectionClass::Person, BBox::new(70, 320, 130, 480), 0.8),
                Detection::new(DetectionClass::Ball, BBox::new(292, 132, 308, 148), 0.7),
            ],
        });
        assert!(frame.zones.is_some());
        assert_eq!(frame.people[0].id.label(), "ID: 0");

        let mut sink = OverlaySink::Log;
        sink.draw(&frame).unwrap();
        sink.flush().unwrap();
    }
}
