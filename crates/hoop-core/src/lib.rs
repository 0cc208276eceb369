mod detection;
mod geom;
mod identity_map;
mod instant;
mod settings;
mod team;

pub use detection::*;
pub use geom::*;
pub use identity_map::*;
pub use instant::*;
pub use settings::*;
pub use team::*;
