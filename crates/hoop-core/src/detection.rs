use serde::{Deserialize, Serialize};

use crate::{Point, StreamInstant};

/// The object classes produced by the detector.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DetectionClass {
    Ball,
    Person,
    Rim,
}

/// A detector bounding box in pixel coordinates, serialized as `[x1, y1, x2, y2]`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct BBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BBox {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Whether the corners are swapped on either axis.
    pub fn is_inverted(&self) -> bool {
        self.x1 > self.x2 || self.y1 > self.y2
    }

    /// The same box with corners ordered so that `x1 <= x2` and `y1 <= y2`.
    pub fn normalized(&self) -> BBox {
        BBox {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    /// Center of the box, using floor division.
    pub fn centroid(&self) -> Point {
        Point::new(
            (self.x1 + self.x2).div_euclid(2),
            (self.y1 + self.y2).div_euclid(2),
        )
    }
}

impl From<[i32; 4]> for BBox {
    fn from([x1, y1, x2, y2]: [i32; 4]) -> Self {
        BBox::new(x1, y1, x2, y2)
    }
}

impl From<BBox> for [i32; 4] {
    fn from(b: BBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// A single labeled box reported by the detector.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    pub class: DetectionClass,
    pub bbox: BBox,
    pub confidence: f32,
}

impl Detection {
    pub fn new(class: DetectionClass, bbox: BBox, confidence: f32) -> Self {
        Self {
            class,
            bbox,
            confidence,
        }
    }
}

/// Everything the detector reported for one video frame.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct DetectionFrame {
    /// Capture time of the frame
    pub timestamp: StreamInstant,
    pub detections: Vec<Detection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centroid_floors() {
        assert_eq!(BBox::new(10, 10, 21, 31).centroid(), Point::new(15, 20));
        assert_eq!(BBox::new(-3, -3, 0, 0).centroid(), Point::new(-2, -2));
    }

    #[test]
    fn test_normalized() {
        let bbox = BBox::new(50, 80, 10, 20);
        assert!(bbox.is_inverted());
        let norm = bbox.normalized();
        assert_eq!(norm, BBox::new(10, 20, 50, 80));
        assert!(!norm.is_inverted());
    }

    #[test]
    fn test_deserialize_detection() {
        let det: Detection = serde_json::from_str(
            r#"{"class":"rim","bbox":[280,190,320,210],"confidence":0.87}"#,
        )
        .unwrap();
        assert_eq!(det.class, DetectionClass::Rim);
        assert_eq!(det.bbox.centroid(), Point::new(300, 200));
    }
}
