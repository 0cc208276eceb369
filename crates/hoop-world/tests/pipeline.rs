use hoop_core::{
    AnalyticsSettings, BBox, Detection, DetectionClass, DetectionFrame, IdentityMode,
    IdentitySettings, PersonId, Point, StreamInstant, TeamColor,
};
use hoop_world::{AnalyticsTracker, ZoneState};

fn boxed(class: DetectionClass, center: (i32, i32), half: i32) -> Detection {
    Detection::new(
        class,
        BBox::new(center.0 - half, center.1 - half, center.0 + half, center.1 + half),
        0.9,
    )
}

fn frame(t: f64, ball: Option<(i32, i32)>, people: &[(i32, i32)]) -> DetectionFrame {
    let mut detections = vec![boxed(DetectionClass::Rim, (300, 200), 20)];
    detections.extend(people.iter().map(|&p| boxed(DetectionClass::Person, p, 30)));
    if let Some(ball) = ball {
        detections.push(boxed(DetectionClass::Ball, ball, 8));
    }
    DetectionFrame {
        timestamp: StreamInstant::from_secs_f64(t).unwrap(),
        detections,
    }
}

fn frame_index_settings() -> AnalyticsSettings {
    AnalyticsSettings {
        identity: IdentitySettings {
            mode: IdentityMode::FrameIndex,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test_log::test]
fn shot_through_the_rim_scores_once() {
    let mut tracker = AnalyticsTracker::new(&AnalyticsSettings::default());

    let first = tracker.update(&frame(0.0, Some((300, 140)), &[]));
    assert_eq!(first.goal_count, 0);
    assert_eq!(first.trail, vec![Point::new(300, 140)]);

    let second = tracker.update(&frame(0.1, Some((300, 160)), &[]));
    assert_eq!(second.goal_count, 0);
    assert_eq!(second.zone_state, ZoneState::Armed);
    assert_eq!(second.trail.len(), 2);

    let third = tracker.update(&frame(0.2, Some((300, 210)), &[]));
    assert_eq!(third.goal_count, 1);
    assert!(third.scored);
    assert!(third.trail.is_empty());
    assert_eq!(third.score_text(), "Buckets: 1");

    let fourth = tracker.update(&frame(0.3, Some((300, 240)), &[]));
    assert_eq!(fourth.goal_count, 1);
    assert!(!fourth.scored);
    assert!(fourth.trail.is_empty());
}

#[test]
fn frames_without_rim_or_ball_are_tolerated() {
    let mut tracker = AnalyticsTracker::new(&AnalyticsSettings::default());
    let empty = DetectionFrame {
        timestamp: StreamInstant::from_secs_f64(0.0).unwrap(),
        detections: vec![],
    };
    let out = tracker.update(&empty);
    assert_eq!(out.goal_count, 0);
    assert!(out.zones.is_none());
    assert!(out.ball.is_none());
    assert!(out.smoothed_ball.is_none());
    assert!(out.possession.is_none());
    assert!(out.people.is_empty());
    assert!(out.trail.is_empty());
}

#[test]
fn possession_follows_nearest_person() {
    let mut tracker = AnalyticsTracker::new(&frame_index_settings());
    let people = [(100, 400), (500, 400)];

    let out = tracker.update(&frame(0.0, Some((480, 380)), &people));
    assert_eq!(out.holder, Some(PersonId::new(1)));
    assert_eq!(out.possession, Some(TeamColor::Blue));

    let snapshot = out.identities.clone();
    assert_eq!(
        tracker.toggle_team(&snapshot, Point::new(505, 395)),
        Some((PersonId::new(1), TeamColor::Orange))
    );

    let out = tracker.update(&frame(0.1, Some((480, 380)), &people));
    assert_eq!(out.possession, Some(TeamColor::Orange));
    assert_eq!(out.people[1].color, TeamColor::Orange);
    assert_eq!(out.people[0].color, TeamColor::Blue);
}

#[test]
fn possession_uses_this_frames_ball() {
    let mut tracker = AnalyticsTracker::new(&AnalyticsSettings::default());
    let people = [(100, 400), (300, 400)];
    for i in 0..9 {
        tracker.update(&frame(i as f64 * 0.1, Some((100, 400)), &people));
    }

    // The smoothed ball lags behind near the first person.
    let out = tracker.update(&frame(0.9, Some((215, 400)), &people));
    assert_eq!(out.ball, Some(Point::new(215, 400)));
    assert!(out.smoothed_ball.unwrap().x < 200);
    let nearest = out
        .people
        .iter()
        .find(|p| p.centroid == Point::new(300, 400))
        .unwrap();
    assert_eq!(out.holder, Some(nearest.id));
}

#[test_log::test]
fn persistent_ids_keep_team_when_detection_order_changes() {
    let mut tracker = AnalyticsTracker::new(&AnalyticsSettings::default());

    let out = tracker.update(&frame(0.0, None, &[(100, 400), (500, 400)]));
    tracker.toggle_team(&out.identities, Point::new(500, 400));

    // The detector now reports the two people in the opposite order.
    let out = tracker.update(&frame(0.1, Some((110, 390)), &[(505, 400), (102, 400)]));
    let orange: Vec<_> = out
        .people
        .iter()
        .filter(|p| p.color == TeamColor::Orange)
        .map(|p| p.centroid)
        .collect();
    assert_eq!(orange, vec![Point::new(505, 400)]);
    assert_eq!(out.possession, Some(TeamColor::Blue));
}

#[test]
fn frame_index_ids_follow_list_position() {
    let mut tracker = AnalyticsTracker::new(&frame_index_settings());

    let out = tracker.update(&frame(0.0, None, &[(100, 400), (500, 400)]));
    tracker.toggle_team(&out.identities, Point::new(500, 400));

    let out = tracker.update(&frame(0.1, None, &[(505, 400), (102, 400)]));
    assert_eq!(out.people[1].centroid, Point::new(102, 400));
    assert_eq!(out.people[1].color, TeamColor::Orange);
}

#[test]
fn clicks_resolve_against_the_snapshot_they_were_made_on() {
    let mut tracker = AnalyticsTracker::new(&AnalyticsSettings::default());
    let first = tracker.update(&frame(0.0, None, &[(100, 400)]));
    // Person leaves the spot before the click is processed.
    tracker.update(&frame(0.1, None, &[(160, 400)]));

    assert!(tracker
        .toggle_team(&tracker.last_identities(), Point::new(100, 400))
        .is_none());
    assert_eq!(
        tracker.toggle_team(&first.identities, Point::new(100, 400)),
        Some((PersonId::new(0), TeamColor::Orange))
    );
}

#[test]
fn analytics_frame_serializes_for_overlay() {
    let mut tracker = AnalyticsTracker::new(&AnalyticsSettings::default());
    let out = tracker.update(&frame(0.5, Some((300, 160)), &[(100, 400)]));
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["goal_count"], 0);
    assert_eq!(json["zone_state"], "armed");
    assert_eq!(json["possession"], "blue");
    assert_eq!(json["rim"], serde_json::json!([300, 200]));
    assert!(json.get("identities").is_none());
}
