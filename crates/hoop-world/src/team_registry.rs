use std::collections::BTreeSet;

use hoop_core::{IdentityMap, PersonId, Point, TeamColor};

/// Team membership set by clicking on people. Everybody is on
/// [`TeamColor::Blue`] unless toggled onto [`TeamColor::Orange`].
#[derive(Debug)]
pub struct TeamRegistry {
    click_radius: i32,
    orange: BTreeSet<PersonId>,
}

impl TeamRegistry {
    pub fn new(click_radius: i32) -> Self {
        Self {
            click_radius,
            orange: BTreeSet::new(),
        }
    }

    pub fn color_of(&self, id: PersonId) -> TeamColor {
        if self.orange.contains(&id) {
            TeamColor::Orange
        } else {
            TeamColor::Blue
        }
    }

    /// Flip the team of the person under `click` in `identities`.
    ///
    /// The click hits a person if it lands strictly within `click_radius` pixels
    /// of their centroid on both axes; the first such person in iteration order is
    /// toggled. Returns the person and their new color, or `None` if nobody was
    /// hit.
    pub fn toggle(
        &mut self,
        identities: &IdentityMap,
        click: Point,
    ) -> Option<(PersonId, TeamColor)> {
        let (id, _) = identities.hit_test(&click, self.click_radius)?;
        let color = self.color_of(id).opponent();
        match color {
            TeamColor::Orange => self.orange.insert(id),
            TeamColor::Blue => self.orange.remove(&id),
        };
        log::info!("Person {} is now on team {:?}", id, color);
        Some((id, color))
    }
}
