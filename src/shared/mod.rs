//! Shared value types, resources, events, and constants for Bloomfield.
//!
//! This is the type contract. Every domain module imports from here;
//! cross-domain communication happens through the events below.

use bevy::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE: top-level state machine
// ═══════════════════════════════════════════════════════════════════════

/// Playing is the normal mode; Prompt is entered while a modal text or
/// confirm dialog is open (movement and intents are suppressed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Playing,
    Prompt,
}

// ═══════════════════════════════════════════════════════════════════════
// CELLS & WEATHER
// ═══════════════════════════════════════════════════════════════════════

/// One grid position's unpacked state. The packed form is a fixed 6-byte
/// record inside `FieldGrid`; this struct only ever exists as a transient
/// working copy read through `FieldGrid::cell_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// 0 = empty soil; 1..=N = plant catalog id.
    pub plant: u8,
    pub row: u8,
    pub col: u8,
    pub water: u8,
    pub sun: u8,
    pub growth: u8,
}

impl Cell {
    pub fn empty(row: u8, col: u8) -> Self {
        Self {
            plant: 0,
            row,
            col,
            water: 0,
            sun: 0,
            growth: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.plant == 0
    }

    pub fn harvest_ready(&self) -> bool {
        self.growth >= MAX_PLANT_GROWTH
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Weather {
    #[default]
    Sunny,
    Rainy,
}

impl Weather {
    /// Wire code used by the persisted records: 0 = sunny, 1 = rainy.
    pub fn code(self) -> u8 {
        match self {
            Weather::Sunny => 0,
            Weather::Rainy => 1,
        }
    }

    pub fn from_code(code: u8) -> Self {
        if code == 1 {
            Weather::Rainy
        } else {
            Weather::Sunny
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Weather::Sunny => "Sunny",
            Weather::Rainy => "Rainy",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SNAPSHOTS
// ═══════════════════════════════════════════════════════════════════════

/// A fully self-contained capture of the live game at one point in time.
///
/// Snapshots are values: every consumer that stores one owns its own copy
/// of the grid bytes and the harvest counts. `History` and the save layer
/// both rely on this: a snapshot aliasing the live buffer would silently
/// corrupt unrelated history entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub grid: Vec<u8>,
    pub day: u32,
    pub weather: Weather,
    pub weather_degree: u8,
    /// One counter per flower type, catalog order. Weeds have no slot.
    pub harvested: Vec<u32>,
}

// ═══════════════════════════════════════════════════════════════════════
// PLANT CATALOG
// ═══════════════════════════════════════════════════════════════════════

/// Immutable plant type definition. `vibe_requisite` is reserved by the
/// catalog format and unused by the growth rule.
#[derive(Debug, Clone)]
pub struct PlantDef {
    pub name: String,
    pub color: Color,
    pub sun_requisite: u8,
    pub water_requisite: u8,
    pub vibe_requisite: u8,
}

/// Static registry of plant definitions keyed by small integer ids.
///
/// Ids are `1..=plants.len()` with flowers first and weeds after; id 0 is
/// empty soil. Weed membership is decided by position, so weeds can never
/// leak into harvest accounting.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlantCatalog {
    pub plants: Vec<PlantDef>,
    pub flower_count: usize,
}

impl PlantCatalog {
    pub fn get(&self, id: u8) -> Option<&PlantDef> {
        if id == 0 {
            return None;
        }
        self.plants.get(id as usize - 1)
    }

    pub fn is_weed(&self, id: u8) -> bool {
        id as usize > self.flower_count && (id as usize) <= self.plants.len()
    }

    /// Index into the harvest counters for a flower id; None for weeds,
    /// empty soil, and unknown ids.
    pub fn flower_index(&self, id: u8) -> Option<usize> {
        if id == 0 || self.is_weed(id) {
            return None;
        }
        let idx = id as usize - 1;
        (idx < self.flower_count).then_some(idx)
    }

    /// Case-insensitive name → id lookup. Pure function used only at the
    /// interaction boundary; everything past it works in ids.
    pub fn id_by_name(&self, name: &str) -> Option<u8> {
        self.plants
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .map(|idx| (idx + 1) as u8)
    }

    pub fn flowers(&self) -> &[PlantDef] {
        &self.plants[..self.flower_count]
    }

    /// The id used when a weed sprouts (grid seeding or scenario event).
    pub fn first_weed_id(&self) -> Option<u8> {
        (self.plants.len() > self.flower_count).then_some((self.flower_count + 1) as u8)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FARMER
// ═══════════════════════════════════════════════════════════════════════

/// The player avatar. Position is continuous pixels inside the field;
/// the occupied cell is derived by floor-dividing by [`CELL_SIZE`].
#[derive(Component, Debug, Clone)]
pub struct Farmer {
    pub px: f32,
    pub py: f32,
    /// Harvested flowers, in reaping order.
    pub plants: Vec<PlantDef>,
}

impl Farmer {
    pub fn new() -> Self {
        // Start in the middle of the center cell.
        let center = (GRID_SIZE / 2) as f32 * CELL_SIZE + CELL_SIZE / 2.0;
        Self {
            px: center,
            py: center,
            plants: Vec::new(),
        }
    }

    pub fn row(&self) -> u8 {
        (self.py / CELL_SIZE) as u8
    }

    pub fn col(&self) -> u8 {
        (self.px / CELL_SIZE) as u8
    }
}

impl Default for Farmer {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RNG
// ═══════════════════════════════════════════════════════════════════════

/// Seedable randomness source for weather rolls and grid seeding. Kept as
/// a resource so tests can pin it; the simulation functions themselves
/// take `&mut impl Rng`.
#[derive(Resource, Debug)]
pub struct GameRng(pub StdRng);

// ═══════════════════════════════════════════════════════════════════════
// INTENT EVENTS, fired by the input adapter
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

#[derive(Event, Debug, Clone)]
pub struct MoveIntent {
    pub direction: Direction,
}

/// Player pressed interact over their current cell. The interaction
/// handler decides between the plant and reap paths.
#[derive(Event, Debug, Clone)]
pub struct InteractIntent;

#[derive(Event, Debug, Clone)]
pub struct AdvanceDayIntent;

#[derive(Event, Debug, Clone)]
pub struct UndoIntent;

#[derive(Event, Debug, Clone)]
pub struct RedoIntent;

/// Resolved plant selection for an empty cell: the typed name still has
/// to survive catalog lookup and the weed check.
#[derive(Event, Debug, Clone)]
pub struct PlantRequestEvent {
    pub row: u8,
    pub col: u8,
    pub name: String,
}

/// Player confirmed reaping the plant at (row, col).
#[derive(Event, Debug, Clone)]
pub struct ReapConfirmedEvent {
    pub row: u8,
    pub col: u8,
}

#[derive(Event, Debug, Clone)]
pub struct SaveGameEvent {
    /// Empty string = derive a default save name.
    pub name: String,
}

#[derive(Event, Debug, Clone)]
pub struct LoadGameEvent {
    pub name: String,
}

/// Player confirmed wiping all persisted data and starting over.
#[derive(Event, Debug, Clone)]
pub struct ResetGameEvent;

/// Open the save-name entry dialog.
#[derive(Event, Debug, Clone)]
pub struct SavePromptIntent;

/// Open the numbered saved-game selection dialog.
#[derive(Event, Debug, Clone)]
pub struct LoadPromptIntent;

/// Open the reset-everything confirmation dialog.
#[derive(Event, Debug, Clone)]
pub struct ResetPromptIntent;

// ═══════════════════════════════════════════════════════════════════════
// NOTIFICATIONS
// ═══════════════════════════════════════════════════════════════════════

/// Raised once at the end of every mutating intent. The UI refresh and
/// the autosave writer both listen for it.
#[derive(Event, Debug, Clone)]
pub struct StateChangedEvent;

/// Short user-facing notice (rejections, soft no-ops, scenario
/// completion).
#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
    pub duration_secs: f32,
}

impl ToastEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration_secs: 2.5,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

/// Cells per grid side.
pub const GRID_SIZE: u8 = 7;
/// Packed record width: plant, row, col, water, sun, growth.
pub const CELL_BYTES: usize = 6;
/// Growth ticks needed before a plant is harvest-ready.
pub const MAX_PLANT_GROWTH: u8 = 5;

/// Edge length of one rendered cell in pixels. The farmer's continuous
/// position divides by this to find its cell.
pub const CELL_SIZE: f32 = 64.0;
/// Pixel size of the whole field.
pub const FIELD_SIZE: f32 = CELL_SIZE * GRID_SIZE as f32;

pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 540.0;

/// Weather degree bounds rolled each day.
pub const WEATHER_DEGREE_MIN: u8 = 1;
pub const WEATHER_DEGREE_MAX: u8 = 6;

/// Chance a fresh cell starts with a weed on it.
pub const INITIAL_WEED_CHANCE: f64 = 0.07;

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PlantCatalog {
        PlantCatalog {
            plants: vec![
                PlantDef {
                    name: "Sunflower".into(),
                    color: Color::srgb(1.0, 0.9, 0.0),
                    sun_requisite: 3,
                    water_requisite: 2,
                    vibe_requisite: 0,
                },
                PlantDef {
                    name: "Rose".into(),
                    color: Color::srgb(1.0, 0.5, 0.7),
                    sun_requisite: 2,
                    water_requisite: 3,
                    vibe_requisite: 0,
                },
                PlantDef {
                    name: "crabgrass".into(),
                    color: Color::srgb(0.2, 0.6, 0.2),
                    sun_requisite: 0,
                    water_requisite: 0,
                    vibe_requisite: 0,
                },
            ],
            flower_count: 2,
        }
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        let catalog = catalog();
        assert_eq!(catalog.id_by_name("sunflower"), Some(1));
        assert_eq!(catalog.id_by_name("ROSE"), Some(2));
        assert_eq!(catalog.id_by_name("  Crabgrass "), Some(3));
        assert_eq!(catalog.id_by_name("tulip"), None);
    }

    #[test]
    fn weed_membership_is_positional() {
        let catalog = catalog();
        assert!(!catalog.is_weed(1));
        assert!(!catalog.is_weed(2));
        assert!(catalog.is_weed(3));
        assert!(!catalog.is_weed(0));
        assert_eq!(catalog.first_weed_id(), Some(3));
    }

    #[test]
    fn flower_index_excludes_weeds_and_empty() {
        let catalog = catalog();
        assert_eq!(catalog.flower_index(1), Some(0));
        assert_eq!(catalog.flower_index(2), Some(1));
        assert_eq!(catalog.flower_index(3), None);
        assert_eq!(catalog.flower_index(0), None);
    }

    #[test]
    fn weather_codes_round_trip() {
        assert_eq!(Weather::from_code(Weather::Sunny.code()), Weather::Sunny);
        assert_eq!(Weather::from_code(Weather::Rainy.code()), Weather::Rainy);
    }
}
