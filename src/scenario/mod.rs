//! Scenario evaluator: scripted event timeline and victory predicate.
//!
//! The scenario mirrors the live day counter and harvest totals, fires
//! scheduled events exactly once, and reports when the victory goal has
//! been met. Event completion flags are deliberately NOT part of game
//! snapshots: undoing to a day before a fired event does not re-arm it,
//! matching the behavior this game has always had.

use bevy::prelude::*;
use serde::Deserialize;

use crate::session::GameSession;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// CONFIGURATION (parsed from assets/scenario.ron)
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioConfig {
    /// [weather code, weather degree] applied to a fresh game.
    pub starting_conditions: (u8, u8),
    pub events: Vec<EventConfig>,
    pub victory_goal: Vec<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventConfig {
    pub day: u32,
    pub name: String,
    pub row: u8,
    pub col: u8,
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCE
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioEventKind {
    /// A weed sprouts at the scheduled coordinates.
    WeedGrowth,
}

#[derive(Debug, Clone)]
pub struct ScheduledEvent {
    pub day: u32,
    pub kind: ScenarioEventKind,
    pub row: u8,
    pub col: u8,
    pub completed: bool,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct Scenario {
    pub events: Vec<ScheduledEvent>,
    pub starting_weather: Weather,
    pub starting_degree: u8,
    pub victory_goal: Vec<u32>,
    /// Mirror of the live conditions, advanced by `update_current_conditions`.
    current_day: u32,
    current_harvest: Vec<u32>,
    /// Set once the completion toast has been shown.
    pub victory_announced: bool,
}

impl Scenario {
    pub fn from_config(config: ScenarioConfig) -> Self {
        let events = config
            .events
            .into_iter()
            .filter_map(|event| {
                let kind = match event.name.as_str() {
                    "WeedGrowth" => ScenarioEventKind::WeedGrowth,
                    other => {
                        warn!("Ignoring unknown scenario event '{other}'");
                        return None;
                    }
                };
                Some(ScheduledEvent {
                    day: event.day,
                    kind,
                    row: event.row,
                    col: event.col,
                    completed: false,
                })
            })
            .collect();

        Self {
            events,
            starting_weather: Weather::from_code(config.starting_conditions.0),
            starting_degree: config.starting_conditions.1,
            victory_goal: config.victory_goal,
            current_day: 0,
            current_harvest: Vec::new(),
            victory_announced: false,
        }
    }

    /// Advance the internal mirror. The scenario never reads live state
    /// directly; this is its only coupling to the game.
    pub fn update_current_conditions(&mut self, day: u32, harvested: &[u32]) {
        self.current_day = day;
        self.current_harvest.clear();
        self.current_harvest.extend_from_slice(harvested);
    }

    /// Fire every not-yet-completed event scheduled for the current day.
    /// Each event fires exactly once per play-through; replaying the same
    /// day (undo/redo) does not re-fire a completed event.
    pub fn check_events(&mut self, grid: &mut crate::grid::FieldGrid, catalog: &PlantCatalog) {
        for event in self.events.iter_mut() {
            if event.completed || event.day != self.current_day {
                continue;
            }
            match event.kind {
                ScenarioEventKind::WeedGrowth => {
                    if let Some(weed_id) = catalog.first_weed_id() {
                        info!(
                            "Scenario event: weed sprouts at ({}, {})",
                            event.row, event.col
                        );
                        grid.place_weed(event.row, event.col, weed_id);
                    }
                }
            }
            event.completed = true;
        }
    }

    /// Componentwise conjunction: every goal entry must be covered by the
    /// matching harvest counter.
    pub fn victory_conditions_met(&self) -> bool {
        !self.victory_goal.is_empty()
            && self
                .victory_goal
                .iter()
                .enumerate()
                .all(|(idx, goal)| self.current_harvest.get(idx).copied().unwrap_or(0) >= *goal)
    }

    /// Reset for a fresh play-through (event flags re-armed).
    pub fn rearm(&mut self) {
        for event in self.events.iter_mut() {
            event.completed = false;
        }
        self.current_day = 0;
        self.current_harvest.clear();
        self.victory_announced = false;
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct ScenarioPlugin;

impl Plugin for ScenarioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, evaluate_scenario);
    }
}

/// Runs after every state change: refresh the mirror, fire due events,
/// and announce victory the first time the goal is met.
pub fn evaluate_scenario(
    mut state_changes: EventReader<StateChangedEvent>,
    mut scenario: ResMut<Scenario>,
    mut session: ResMut<GameSession>,
    catalog: Res<PlantCatalog>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if state_changes.is_empty() {
        return;
    }
    state_changes.clear();

    let day = session.day;
    scenario.update_current_conditions(day, &session.harvested);
    scenario.check_events(&mut session.grid, &catalog);

    if scenario.victory_conditions_met() && !scenario.victory_announced {
        scenario.victory_announced = true;
        info!("Scenario Complete");
        toasts.send(ToastEvent::new("Scenario Complete!"));
    }
}
