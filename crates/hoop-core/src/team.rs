use serde::{Deserialize, Serialize};

/// The color of the team a person has been assigned to. Everybody starts on
/// [`TeamColor::Blue`] until toggled by a click.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TeamColor {
    #[default]
    Blue,
    Orange,
}

impl TeamColor {
    pub fn opponent(&self) -> TeamColor {
        match self {
            TeamColor::Blue => TeamColor::Orange,
            TeamColor::Orange => TeamColor::Blue,
        }
    }

    /// Display color as RGB.
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            TeamColor::Blue => [0, 0, 255],
            TeamColor::Orange => [255, 165, 0],
        }
    }
}

/// Identifier of a tracked person.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct PersonId(u32);

impl PersonId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Overlay label for this person.
    pub fn label(&self) -> String {
        format!("ID: {}", self.0)
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
