use serde::Serialize;

use crate::{distance, PersonId, Point};

/// Mapping from person ids to their centroid in the current frame.
///
/// Backed by a vector of `(id, centroid)` pairs kept in insertion order. A frame
/// rarely holds more than a handful of people, so linear search beats hashing,
/// and the insertion order is what breaks ties in [`IdentityMap::nearest`] and
/// [`IdentityMap::hit_test`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct IdentityMap {
    entries: Vec<(PersonId, Point)>,
}

impl IdentityMap {
    /// Creates an empty `IdentityMap`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(id, centroid)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(PersonId, Point)> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub fn get(&self, id: PersonId) -> Option<&Point> {
        self.entries
            .iter()
            .find(|(k, _)| *k == id)
            .map(|(_, centroid)| centroid)
    }

    /// Inserts or moves a person.
    ///
    /// If the id was already present its centroid is replaced in place (keeping its
    /// position in the iteration order) and the old centroid is returned.
    pub fn insert(&mut self, id: PersonId, centroid: Point) -> Option<Point> {
        if let Some(index) = self.entries.iter().position(|(k, _)| *k == id) {
            let old = std::mem::replace(&mut self.entries[index], (id, centroid));
            Some(old.1)
        } else {
            self.entries.push((id, centroid));
            None
        }
    }

    /// The person closest to `target`, with the distance. The first of several
    /// equally close people wins.
    pub fn nearest(&self, target: &Point) -> Option<(PersonId, f64)> {
        let mut best: Option<(PersonId, f64)> = None;
        for (id, centroid) in &self.entries {
            let d = distance(centroid, target);
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((*id, d));
            }
        }
        best
    }

    /// The first person whose centroid is strictly within `radius` pixels of
    /// `click` on both axes.
    pub fn hit_test(&self, click: &Point, radius: i32) -> Option<(PersonId, Point)> {
        self.entries
            .iter()
            .find(|(_, c)| (c.x - click.x).abs() < radius && (c.y - click.y).abs() < radius)
            .copied()
    }
}

impl FromIterator<(PersonId, Point)> for IdentityMap {
    fn from_iter<I: IntoIterator<Item = (PersonId, Point)>>(iter: I) -> Self {
        let mut map = IdentityMap::new();
        for (id, centroid) in iter {
            map.insert(id, centroid);
        }
        map
    }
}
