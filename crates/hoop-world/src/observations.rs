use hoop_core::{Detection, DetectionClass, Point};

/// What the analytics need from one frame of detections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameObservations {
    pub ball: Option<Point>,
    pub rim: Option<Point>,
    /// Person centroids, in detector order
    pub people: Vec<Point>,
}

/// Turns raw detector output into [`FrameObservations`].
///
/// This is the only place detector output is checked: detections with a
/// confidence outside `[0, 1]` are dropped and inverted boxes are straightened.
/// Of the remaining detections only those with `confidence > threshold` are used,
/// and for the ball and the rim the last one reported wins.
#[derive(Debug, Clone)]
pub struct DetectionFilter {
    threshold: f32,
}

impl DetectionFilter {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn observe(&self, detections: &[Detection]) -> FrameObservations {
        let mut observations = FrameObservations::default();
        for det in detections {
            if !(0.0..=1.0).contains(&det.confidence) {
                log::warn!("Dropping detection with confidence {}", det.confidence);
                continue;
            }
            if det.confidence <= self.threshold {
                continue;
            }
            let bbox = if det.bbox.is_inverted() {
                log::debug!("Straightening inverted box {:?}", det.bbox);
                det.bbox.normalized()
            } else {
                det.bbox
            };
            let centroid = bbox.centroid();
            match det.class {
                DetectionClass::Ball => observations.ball = Some(centroid),
                DetectionClass::Rim => observations.rim = Some(centroid),
                DetectionClass::Person => observations.people.push(centroid),
            }
        }
        observations
    }
}
