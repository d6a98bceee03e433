//! Roverdrive: drive a little turtle-style rover across mission maps
//!
//! A rover starts each mission at a spot read from the mission table, then
//! drives, turns and teleports on command. After every command the whole
//! scene is rendered again as an SVG fragment in which the rover follows its
//! route with an `animateMotion` while the trail is drawn in behind it, and
//! that fragment is handed to whatever display is attached.
//!
//! *Nothing here is real robotics: no physics, no collisions, one rover.*

/// Error type shared by every module.
pub mod errors;

/// The nine colors available for the pen and the background.
pub mod palette;

/// Mission table loading and lookups.
pub mod mission;

/// Rover pose, route and drawing attributes.
pub mod scene;

/// Scene to SVG, plus animation timing.
pub mod render;

/// Where rendered frames end up.
pub mod display;

/// Start-up configuration.
pub mod config;

/// The simulated ground sensor.
pub mod sensor;

/// The rover itself: mission, scene and display wired together.
pub mod rover;

/// Text scripts of rover commands.
pub mod script;

/// Import prelude::* for the usual suspects.
pub mod prelude {
    pub use crate::config::{RenderMode, RoverConfig};
    pub use crate::display::{DisplaySink, HtmlFile, Recorder};
    pub use crate::errors::RoverError;
    pub use crate::mission::{MissionInfo, MissionRegistry};
    pub use crate::palette::Color;
    pub use crate::rover::Rover;
    pub use crate::sensor::Sample;
}
