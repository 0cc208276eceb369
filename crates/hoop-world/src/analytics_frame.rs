use hoop_core::{PersonId, Point, StreamInstant, TeamColor};
use serde::Serialize;

use crate::{GoalZones, IdentitySnapshot, ZoneState};

/// A person as drawn on the overlay.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct PersonMarker {
    pub id: PersonId,
    pub centroid: Point,
    pub color: TeamColor,
}

/// Everything the overlay needs to draw one frame.
#[derive(Serialize, Clone, Debug)]
pub struct AnalyticsFrame {
    pub timestamp: StreamInstant,
    pub goal_count: u32,
    /// Whether this frame completed a goal
    pub scored: bool,
    pub zone_state: ZoneState,
    /// Present when the rim was seen this frame
    pub zones: Option<GoalZones>,
    /// Raw ball centroid
    pub ball: Option<Point>,
    pub smoothed_ball: Option<Point>,
    pub rim: Option<Point>,
    /// Trail points, oldest first
    pub trail: Vec<Point>,
    pub possession: Option<TeamColor>,
    pub holder: Option<PersonId>,
    pub people: Vec<PersonMarker>,
    /// The identities clicks on this frame resolve against
    #[serde(skip)]
    pub identities: IdentitySnapshot,
}

impl AnalyticsFrame {
    pub fn score_text(&self) -> String {
        format!("Buckets: {}", self.goal_count)
    }
}
