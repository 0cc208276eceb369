use std::time::{Duration, Instant};

use anyhow::Result;
use hoop_core::{AnalyticsSettings, Point};
use hoop_world::{AnalyticsTracker, IdentitySnapshot};
use tokio::sync::{broadcast, mpsc};

use crate::{overlay::OverlaySink, source::FrameSource};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndOfStream,
    Stopped,
}

#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub frames: u64,
    pub goal_count: u32,
    pub reason: StopReason,
}

/// Runs the analytics one frame at a time: the next frame is requested, clicks
/// queued until it arrived are applied against the frame shown before it, then
/// the new frame is analyzed and drawn.
pub struct Driver {
    tracker: AnalyticsTracker,
    source: FrameSource,
    clicks: mpsc::UnboundedReceiver<Point>,
    overlay: OverlaySink,
    /// Identities of the frame most recently handed to the overlay
    shown: IdentitySnapshot,
    prof_frames: u64,
    prof_analytics: Duration,
}

impl Driver {
    pub fn new(
        settings: &AnalyticsSettings,
        source: FrameSource,
        clicks: mpsc::UnboundedReceiver<Point>,
        overlay: OverlaySink,
    ) -> Self {
        Self {
            tracker: AnalyticsTracker::new(settings),
            source,
            clicks,
            overlay,
            shown: IdentitySnapshot::default(),
            prof_frames: 0,
            prof_analytics: Duration::ZERO,
        }
    }

    pub async fn run(mut self, mut stop_rx: broadcast::Receiver<()>) -> Result<RunSummary> {
        let reason = loop {
            let frame = tokio::select! {
                _ = stop_rx.recv() => break StopReason::Stopped,
                frame = self.source.next_frame() => frame?,
            };
            // Replayed clicks are queued while the source reads toward the frame.
            self.apply_clicks();
            let Some(frame) = frame else {
                break StopReason::EndOfStream;
            };

            let start = Instant::now();
            let analytics = self.tracker.update(&frame);
            self.prof_analytics += start.elapsed();
            self.prof_frames += 1;

            self.overlay.draw(&analytics)?;
            self.shown = analytics.identities;
            self.log_timings();
        };
        self.overlay.flush()?;

        match reason {
            StopReason::EndOfStream => tracing::info!("End of stream"),
            StopReason::Stopped => tracing::info!("Stop requested"),
        }
        Ok(RunSummary {
            frames: self.prof_frames,
            goal_count: self.tracker.goal_count(),
            reason,
        })
    }

    fn apply_clicks(&mut self) {
        while let Ok(click) = self.clicks.try_recv() {
            if self.tracker.toggle_team(&self.shown, click).is_none() {
                tracing::debug!("Click at ({}, {}) hit nobody", click.x, click.y);
            }
        }
    }

    fn log_timings(&self) {
        if self.prof_frames % 300 == 0 {
            tracing::info!(
                frames = self.prof_frames,
                analytics_ms_per_frame = format!(
                    "{:.3}",
                    self.prof_analytics.as_secs_f64() * 1000.0 / self.prof_frames as f64
                ),
                "pipeline timings"
            );
        }
    }
}
