mod analytics_frame;
mod goal_zone;
mod identity;
mod observations;
pub mod possession;
mod smoother;
mod team_registry;
mod trail;

pub use analytics_frame::*;
pub use goal_zone::*;
pub use identity::*;
pub use observations::*;
pub use smoother::*;
pub use team_registry::*;
pub use trail::*;

use hoop_core::{AnalyticsSettings, DetectionFrame, PersonId, Point, TeamColor};

/// Owns all analytics state for one stream and advances it a frame at a time.
pub struct AnalyticsTracker {
    filter: DetectionFilter,
    smoother: PositionSmoother,
    goal_zones: GoalZoneTracker,
    trail: TrailRecorder,
    identities: Box<dyn IdentityAssigner>,
    teams: TeamRegistry,
    /// Identities from the last processed frame
    last_identities: IdentitySnapshot,
}

impl AnalyticsTracker {
    pub fn new(settings: &AnalyticsSettings) -> Self {
        Self {
            filter: DetectionFilter::new(settings.confidence_threshold),
            smoother: PositionSmoother::new(settings.smoother_window, settings.smoother_sigma),
            goal_zones: GoalZoneTracker::new(settings.zone_width, settings.zone_height),
            trail: TrailRecorder::new(settings.trail_interval),
            identities: assigner_from_settings(&settings.identity),
            teams: TeamRegistry::new(settings.click_radius),
            last_identities: IdentitySnapshot::default(),
        }
    }

    /// Process one frame of detections.
    pub fn update(&mut self, frame: &DetectionFrame) -> AnalyticsFrame {
        let obs = self.filter.observe(&frame.detections);

        let smoothed_ball = obs.ball.map(|ball| self.smoother.add(ball));

        let previous_count = self.goal_zones.goal_count();
        let (goal_count, zones) = self.goal_zones.update(obs.ball, obs.rim);
        let trail = self.trail.update(obs.ball, obs.rim, frame.timestamp);

        let identities = IdentitySnapshot::new(self.identities.assign(&obs.people));
        let holder = possession::resolve_holder(&identities, obs.ball, &self.teams);
        let people = identities
            .iter()
            .map(|&(id, centroid)| PersonMarker {
                id,
                centroid,
                color: self.teams.color_of(id),
            })
            .collect();
        self.last_identities = identities.clone();

        AnalyticsFrame {
            timestamp: frame.timestamp,
            goal_count,
            scored: goal_count > previous_count,
            zone_state: self.goal_zones.state(),
            zones,
            ball: obs.ball,
            smoothed_ball,
            rim: obs.rim,
            trail,
            possession: holder.map(|(_, color)| color),
            holder: holder.map(|(id, _)| id),
            people,
            identities,
        }
    }

    /// Toggle the team of the person under `click` in a published snapshot.
    pub fn toggle_team(
        &mut self,
        snapshot: &IdentitySnapshot,
        click: Point,
    ) -> Option<(PersonId, TeamColor)> {
        self.teams.toggle(snapshot, click)
    }

    /// Identities of the last processed frame.
    pub fn last_identities(&self) -> IdentitySnapshot {
        self.last_identities.clone()
    }

    pub fn goal_count(&self) -> u32 {
        self.goal_zones.goal_count()
    }
}
