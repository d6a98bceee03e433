//! Start-up settings for a [`crate::rover::Rover`], readable from a RON file:
//!
//! ```ron
//! (
//!     window_size: (1024, 640),
//!     initial_speed: 4,
//!     mission_folder: "roverdrive/backgrounds/training",
//!     render_mode: EveryCommand,
//! )
//! ```
//!
//! Anything left out keeps its default.
use std::io::Read;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::errors::RoverError;
use crate::mission::MISSION_FOLDER;
use crate::scene::{DEFAULT_SPEED, DEFAULT_WINDOW_SIZE, MAX_SPEED};

/// When the rover pushes a fresh frame to its display.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// After every command that changes the scene.
    #[default]
    EveryCommand,
    /// Only on mission start and on an explicit `go()`.
    Explicit,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RoverConfig {
    pub window_size: (u32, u32),
    pub initial_speed: u8,
    pub mission_folder: String,
    pub render_mode: RenderMode,
}

impl Default for RoverConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            initial_speed: DEFAULT_SPEED,
            mission_folder: MISSION_FOLDER.to_string(),
            render_mode: RenderMode::default(),
        }
    }
}

impl RoverConfig {
    /// Initial speed must sit in `[1, 10]` and both window dimensions must be
    /// positive. Speed 0 is only reachable later through `set_speed`.
    pub fn validate(&self) -> std::result::Result<(), RoverError> {
        if !(1..=MAX_SPEED).contains(&self.initial_speed) {
            return Err(RoverError::invalid(
                "initial_speed should be an integer in interval [1,10]",
            ));
        }
        if self.window_size.0 == 0 || self.window_size.1 == 0 {
            return Err(RoverError::invalid(
                "window_size should be a pair of positive integers",
            ));
        }
        Ok(())
    }

    pub fn parse(data: &str) -> Result<RoverConfig> {
        let config: RoverConfig = ron::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<RoverConfig> {
        let mut reader = std::fs::File::open(path.as_ref())?;
        let mut data = String::new();
        reader.read_to_string(&mut data)?;
        RoverConfig::parse(&data)
    }
}
