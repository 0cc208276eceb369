use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How people are given ids from one frame to the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityMode {
    /// A person's id is their position in this frame's detection list.
    FrameIndex,
    /// Ids follow people across frames by nearest-centroid matching.
    Persistent,
}

/// Settings for person identity assignment.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentitySettings {
    pub mode: IdentityMode,
    /// Largest centroid jump, in px, that still counts as the same person.
    pub max_match_distance: f64,
    /// Number of consecutive frames a person may go undetected before the id is
    /// retired.
    pub max_missed_frames: u32,
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            mode: IdentityMode::Persistent,
            max_match_distance: 75.0,
            max_missed_frames: 15,
        }
    }
}

/// Settings for the `AnalyticsTracker`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Detections at or below this confidence are ignored.
    pub confidence_threshold: f32,
    /// Width of the goal zones, in px.
    pub zone_width: i32,
    /// Height of each goal zone, in px.
    pub zone_height: i32,
    /// Minimum time between two trail samples, in seconds.
    pub trail_interval: f64,
    /// Number of ball positions kept by the smoother.
    pub smoother_window: usize,
    /// Standard deviation of the smoothing kernel, in samples.
    pub smoother_sigma: f64,
    /// Half size of the box around a centroid that a click must land in, in px.
    pub click_radius: i32,
    pub identity: IdentitySettings,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.4,
            zone_width: 50,
            zone_height: 50,
            trail_interval: 0.1,
            smoother_window: 10,
            smoother_sigma: 1.0,
            click_radius: 10,
            identity: IdentitySettings::default(),
        }
    }
}

impl AnalyticsSettings {
    /// Load the settings from a file, or store the default settings if the file does
    /// not exist. A file that exists but does not parse is reported and replaced by
    /// the defaults in memory only.
    pub fn load_or_insert(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => Ok(settings),
                Err(err) => {
                    log::error!("Failed to parse settings {}: {}", path.display(), err);
                    Ok(Self::default())
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let settings = Self::default();
                settings.store(path)?;
                log::info!("Wrote default settings to {}", path.display());
                Ok(settings)
            }
            Err(err) => {
                Err(err).with_context(|| format!("Failed to read settings {}", path.display()))
            }
        }
    }

    /// Store the settings in the given file.
    pub fn store(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings {}", path.display()))
    }
}
