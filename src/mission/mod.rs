//! Mission table: where each mission starts, which way the rover faces, and
//! which background image goes behind it.
//!
//! Missions live in a folder next to their backgrounds:
//!
//! ```text
//! backgrounds/training/missions.tsv
//! backgrounds/training/001.jpeg
//! backgrounds/training/002.jpeg
//! ```
//!
//! `missions.tsv` holds one `id\tx\ty\theading` row per mission, no header.
use std::collections::BTreeMap;
use std::path::Path;

use crate::render::VIEWBOX;

pub const MISSION_FOLDER: &str = "roverdrive/backgrounds/training";
pub const MISSION_FILE: &str = "missions.tsv";
pub const DEFAULT_HEADING: i64 = 270;

/// Everything the scene needs to know about the mission it starts in.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionInfo {
    pub id: i64,
    pub start_x: u32,
    pub start_y: u32,
    pub start_heading: i64,
    pub background: Option<String>,
}

impl MissionInfo {
    /// The stand-in for any mission the table doesn't know about: middle of
    /// the canvas, facing up, plain background.
    pub fn fallback(id: i64) -> MissionInfo {
        MissionInfo {
            id,
            start_x: VIEWBOX.0 / 2,
            start_y: VIEWBOX.1 / 2,
            start_heading: DEFAULT_HEADING,
            background: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct StartPose {
    x: u32,
    y: u32,
    heading: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MissionRegistry {
    folder: String,
    missions: BTreeMap<i64, StartPose>,
}

impl Default for MissionRegistry {
    fn default() -> Self {
        MissionRegistry::empty(MISSION_FOLDER)
    }
}

impl MissionRegistry {
    pub fn empty(folder: &str) -> MissionRegistry {
        MissionRegistry {
            folder: folder.trim_end_matches('/').to_string(),
            missions: BTreeMap::new(),
        }
    }

    /// Reads `missions.tsv` from `folder`. A missing or broken table is not
    /// fatal: the registry comes back empty and every lookup falls back to
    /// [`MissionInfo::fallback`].
    pub fn load<P: AsRef<Path>>(folder: P) -> MissionRegistry {
        let folder = folder.as_ref();
        let folder_name = folder.to_string_lossy();
        let path = folder.join(MISSION_FILE);
        match std::fs::read_to_string(&path) {
            Ok(text) => match MissionRegistry::parse(&text, &folder_name) {
                Ok(registry) => {
                    log::info!("Loaded {} missions from {}", registry.len(), path.display());
                    registry
                }
                Err(msg) => {
                    log::warn!("Ignoring malformed missions file {}: {}", path.display(), msg);
                    MissionRegistry::empty(&folder_name)
                }
            },
            Err(err) => {
                log::warn!("Couldn't find missions file {}: {}", path.display(), err);
                MissionRegistry::empty(&folder_name)
            }
        }
    }

    /// Parses the tab separated mission table. Any bad row rejects the whole
    /// table, so a half-read file never silently drops missions.
    pub fn parse(text: &str, folder: &str) -> Result<MissionRegistry, String> {
        let mut registry = MissionRegistry::empty(folder);
        for (lineno, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').map(|f| f.trim()).collect();
            if fields.len() < 4 {
                return Err(format!(
                    "line {}: expected 4 tab separated fields, found {}",
                    lineno + 1,
                    fields.len()
                ));
            }
            let bad = |what: &str, value: &str| format!("line {}: bad {} '{}'", lineno + 1, what, value);
            let id = fields[0].parse::<i64>().map_err(|_| bad("id", fields[0]))?;
            let x = fields[1].parse::<u32>().map_err(|_| bad("x", fields[1]))?;
            let y = fields[2].parse::<u32>().map_err(|_| bad("y", fields[2]))?;
            let heading = fields[3]
                .parse::<i64>()
                .map_err(|_| bad("heading", fields[3]))?;
            registry.missions.insert(id, StartPose { x, y, heading });
        }
        Ok(registry)
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn len(&self) -> usize {
        self.missions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.missions.contains_key(&id)
    }

    /// Known mission ids, ascending.
    pub fn ids(&self) -> Vec<i64> {
        self.missions.keys().copied().collect()
    }

    pub fn lookup(&self, id: i64) -> MissionInfo {
        match self.missions.get(&id) {
            Some(pose) => MissionInfo {
                id,
                start_x: pose.x,
                start_y: pose.y,
                start_heading: pose.heading,
                background: self.background_ref(id),
            },
            None => MissionInfo::fallback(id),
        }
    }

    /// Background image for a known mission, e.g. `training/007.jpeg`.
    pub fn background_ref(&self, id: i64) -> Option<String> {
        if self.contains(id) {
            Some(format!("{}/{:03}.jpeg", self.folder, id))
        } else {
            None
        }
    }
}
