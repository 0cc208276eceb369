use hoop_core::{Point, Rect};
use serde::Serialize;

/// The two rectangles stacked on the rim that a shot has to pass through.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoalZones {
    /// Directly above the rim
    pub top: Rect,
    /// Directly below the rim
    pub bottom: Rect,
}

impl GoalZones {
    /// Zones of `width` x `height` centered horizontally on the rim, touching at the
    /// rim's y coordinate.
    pub fn around_rim(rim: Point, width: i32, height: i32) -> Self {
        let half = width.div_euclid(2);
        GoalZones {
            top: Rect::new(rim.x - half, rim.y - height, rim.x + half, rim.y),
            bottom: Rect::new(rim.x - half, rim.y, rim.x + half, rim.y + height),
        }
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ZoneState {
    /// Waiting for the ball to enter the top zone
    #[default]
    WaitingTop,
    /// The ball has been in the top zone; the next bottom zone entry is a goal
    Armed,
}

/// Counts goals by watching the ball cross the top zone and then the bottom zone.
#[derive(Debug)]
pub struct GoalZoneTracker {
    width: i32,
    height: i32,
    state: ZoneState,
    goal_count: u32,
}

impl GoalZoneTracker {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            state: ZoneState::WaitingTop,
            goal_count: 0,
        }
    }

    pub fn goal_count(&self) -> u32 {
        self.goal_count
    }

    pub fn state(&self) -> ZoneState {
        self.state
    }

    /// Feed this frame's ball and rim positions. Returns the goal count and, when
    /// the rim is visible, the zones used for the check.
    pub fn update(&mut self, ball: Option<Point>, rim: Option<Point>) -> (u32, Option<GoalZones>) {
        let Some(rim) = rim else {
            return (self.goal_count, None);
        };
        let zones = GoalZones::around_rim(rim, self.width, self.height);

        if let Some(ball) = ball {
            match self.state {
                ZoneState::WaitingTop if zones.top.contains_strict(&ball) => {
                    log::debug!("Ball entered top zone at {:?}", ball);
                    self.state = ZoneState::Armed;
                }
                ZoneState::Armed if zones.bottom.contains_strict(&ball) => {
                    self.goal_count += 1;
                    self.state = ZoneState::WaitingTop;
                    log::info!("Bucket! count={}", self.goal_count);
                }
                _ => {}
            }
        }

        (self.goal_count, Some(zones))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rim() -> Point {
        Point::new(300, 200)
    }

    fn tracker() -> GoalZoneTracker {
        GoalZoneTracker::new(50, 50)
    }

    #[test]
    fn test_zone_geometry() {
        let zones = GoalZones::around_rim(rim(), 50, 50);
        assert_eq!(zones.top, Rect::new(275, 150, 325, 200));
        assert_eq!(zones.bottom, Rect::new(275, 200, 325, 250));
    }

    #[test]
    fn test_shot_scenario() {
        let mut tracker = tracker();
        let counts: Vec<u32> = [140, 160, 210, 240]
            .into_iter()
            .map(|y| tracker.update(Some(Point::new(300, y)), Some(rim())).0)
            .collect();
        assert_eq!(counts, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_shot_scenario_states() {
        let mut tracker = tracker();
        tracker.update(Some(Point::new(300, 140)), Some(rim()));
        assert_eq!(tracker.state(), ZoneState::WaitingTop);
        tracker.update(Some(Point::new(300, 160)), Some(rim()));
        assert_eq!(tracker.state(), ZoneState::Armed);
        assert_eq!(tracker.goal_count(), 0);
        tracker.update(Some(Point::new(300, 210)), Some(rim()));
        assert_eq!(tracker.state(), ZoneState::WaitingTop);
        assert_eq!(tracker.goal_count(), 1);
    }

    #[test]
    fn test_boundary_does_not_arm() {
        let mut tracker = tracker();
        for ball in [
            Point::new(275, 175),
            Point::new(325, 175),
            Point::new(300, 150),
            Point::new(300, 200),
        ] {
            tracker.update(Some(ball), Some(rim()));
            assert_eq!(tracker.state(), ZoneState::WaitingTop, "{:?}", ball);
        }
        tracker.update(Some(Point::new(276, 151)), Some(rim()));
        assert_eq!(tracker.state(), ZoneState::Armed);
    }

    #[test]
    fn test_boundary_does_not_score() {
        let mut tracker = tracker();
        tracker.update(Some(Point::new(300, 175)), Some(rim()));
        tracker.update(Some(Point::new(300, 250)), Some(rim()));
        tracker.update(Some(Point::new(325, 225)), Some(rim()));
        assert_eq!(tracker.goal_count(), 0);
        tracker.update(Some(Point::new(300, 249)), Some(rim()));
        assert_eq!(tracker.goal_count(), 1);
    }

    #[test]
    fn test_bottom_without_top_never_counts() {
        let mut tracker = tracker();
        for _ in 0..5 {
            tracker.update(Some(Point::new(300, 225)), Some(rim()));
        }
        assert_eq!(tracker.goal_count(), 0);
    }

    #[test]
    fn test_reentering_top_while_armed() {
        let mut tracker = tracker();
        tracker.update(Some(Point::new(300, 160)), Some(rim()));
        tracker.update(Some(Point::new(300, 100)), Some(rim()));
        tracker.update(Some(Point::new(300, 170)), Some(rim()));
        tracker.update(Some(Point::new(300, 190)), Some(rim()));
        assert_eq!(tracker.state(), ZoneState::Armed);
        assert_eq!(tracker.goal_count(), 0);
        tracker.update(Some(Point::new(300, 230)), Some(rim()));
        tracker.update(Some(Point::new(300, 235)), Some(rim()));
        assert_eq!(tracker.goal_count(), 1);
    }

    #[test]
    fn test_missing_inputs_keep_state() {
        let mut tracker = tracker();
        tracker.update(Some(Point::new(300, 160)), Some(rim()));
        assert_eq!(tracker.update(Some(Point::new(300, 210)), None), (0, None));
        assert_eq!(tracker.state(), ZoneState::Armed);
        let (count, zones) = tracker.update(None, Some(rim()));
        assert_eq!(count, 0);
        assert!(zones.is_some());
        assert_eq!(tracker.update(Some(Point::new(300, 210)), Some(rim())).0, 1);
    }

    #[test]
    fn test_counts_every_completed_crossing() {
        let mut tracker = tracker();
        for _ in 0..3 {
            tracker.update(Some(Point::new(300, 160)), Some(rim()));
            tracker.update(Some(Point::new(300, 260)), Some(rim()));
            tracker.update(Some(Point::new(300, 220)), Some(rim()));
        }
        assert_eq!(tracker.goal_count(), 3);
    }
}
