use hoop_core::{IdentityMap, PersonId, Point, TeamColor};

use crate::TeamRegistry;

/// The person nearest to the ball and their team color.
///
/// Returns `None` without a ball or without people. Equally near people are
/// resolved in favour of the one that comes first in `identities`.
pub fn resolve_holder(
    identities: &IdentityMap,
    ball: Option<Point>,
    teams: &TeamRegistry,
) -> Option<(PersonId, TeamColor)> {
    let ball = ball?;
    let (id, _) = identities.nearest(&ball)?;
    Some((id, teams.color_of(id)))
}

/// The team in possession of the ball: the color of the nearest person.
pub fn resolve(
    identities: &IdentityMap,
    ball: Option<Point>,
    teams: &TeamRegistry,
) -> Option<TeamColor> {
    resolve_holder(identities, ball, teams).map(|(_, color)| color)
}
