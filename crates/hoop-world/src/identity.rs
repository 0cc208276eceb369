use std::{ops::Deref, sync::Arc};

use hoop_core::{distance, IdentityMap, IdentityMode, IdentitySettings, PersonId, Point};

/// Gives every person centroid in a frame an id.
pub trait IdentityAssigner: Send {
    /// Assign ids to this frame's centroids. The returned map holds one entry per
    /// centroid, in input order.
    fn assign(&mut self, centroids: &[Point]) -> IdentityMap;
}

/// Build the assigner selected in the settings.
pub fn assigner_from_settings(settings: &IdentitySettings) -> Box<dyn IdentityAssigner> {
    match settings.mode {
        IdentityMode::FrameIndex => Box::new(FrameIndexAssigner),
        IdentityMode::Persistent => Box::new(CentroidTracker::new(
            settings.max_match_distance,
            settings.max_missed_frames,
        )),
    }
}

/// Ids are positions in the frame's detection list. Nothing carries over between
/// frames, so the same id may name different people in consecutive frames.
#[derive(Debug, Default)]
pub struct FrameIndexAssigner;

impl IdentityAssigner for FrameIndexAssigner {
    fn assign(&mut self, centroids: &[Point]) -> IdentityMap {
        centroids
            .iter()
            .enumerate()
            .map(|(i, c)| (PersonId::new(i as u32), *c))
            .collect()
    }
}

#[derive(Debug)]
struct Track {
    id: PersonId,
    centroid: Point,
    /// Consecutive frames without a matching centroid
    missed: u32,
}

/// Keeps ids stable across frames by matching each centroid to the nearest
/// centroid of the previous frames.
///
/// Matching is greedy on distance: the closest track/centroid pair within
/// `max_match_distance` is paired first. Unmatched centroids start new tracks and
/// tracks unmatched for more than `max_missed_frames` frames are dropped. Ids are
/// never reused.
#[derive(Debug)]
pub struct CentroidTracker {
    max_match_distance: f64,
    max_missed_frames: u32,
    tracks: Vec<Track>,
    next_id: u32,
}

impl CentroidTracker {
    pub fn new(max_match_distance: f64, max_missed_frames: u32) -> Self {
        Self {
            max_match_distance,
            max_missed_frames,
            tracks: Vec::new(),
            next_id: 0,
        }
    }

    /// Number of live tracks, including ones missing from the last frame.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }
}

impl IdentityAssigner for CentroidTracker {
    fn assign(&mut self, centroids: &[Point]) -> IdentityMap {
        let mut pairs: Vec<(f64, usize, usize)> = Vec::new();
        for (ti, track) in self.tracks.iter().enumerate() {
            for (ci, centroid) in centroids.iter().enumerate() {
                let d = distance(&track.centroid, centroid);
                if d <= self.max_match_distance {
                    pairs.push((d, ti, ci));
                }
            }
        }
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

        let mut track_of: Vec<Option<usize>> = vec![None; centroids.len()];
        let mut track_taken = vec![false; self.tracks.len()];
        for (_, ti, ci) in pairs {
            if track_taken[ti] || track_of[ci].is_some() {
                continue;
            }
            track_taken[ti] = true;
            track_of[ci] = Some(ti);
        }

        for (ti, track) in self.tracks.iter_mut().enumerate() {
            if !track_taken[ti] {
                track.missed += 1;
            }
        }

        let mut identities = IdentityMap::new();
        for (ci, centroid) in centroids.iter().enumerate() {
            let id = match track_of[ci] {
                Some(ti) => {
                    let track = &mut self.tracks[ti];
                    track.centroid = *centroid;
                    track.missed = 0;
                    track.id
                }
                None => {
                    let id = PersonId::new(self.next_id);
                    self.next_id += 1;
                    log::debug!("New person {} at {:?}", id, centroid);
                    self.tracks.push(Track {
                        id,
                        centroid: *centroid,
                        missed: 0,
                    });
                    id
                }
            };
            identities.insert(id, *centroid);
        }

        let max_missed = self.max_missed_frames;
        self.tracks.retain(|track| {
            let keep = track.missed <= max_missed;
            if !keep {
                log::debug!("Person {} lost", track.id);
            }
            keep
        });

        identities
    }
}

/// Read-only view of one frame's identities, handed to whoever resolves clicks
/// against that frame.
#[derive(Clone, Debug, Default)]
pub struct IdentitySnapshot(Arc<IdentityMap>);

impl IdentitySnapshot {
    pub fn new(identities: IdentityMap) -> Self {
        Self(Arc::new(identities))
    }
}

impl Deref for IdentitySnapshot {
    type Target = IdentityMap;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
