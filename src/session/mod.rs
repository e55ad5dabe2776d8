//! Live game state, snapshot capture, and the undo/redo handlers.

pub mod history;
pub mod interact;

use bevy::prelude::*;

pub use history::History;

use crate::grid::FieldGrid;
use crate::shared::*;

/// The live game. Everything the simulator and interaction handlers
/// mutate lives here; a [`GameSnapshot`] is a deep copy of these fields.
#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    pub grid: FieldGrid,
    pub day: u32,
    pub weather: Weather,
    pub weather_degree: u8,
    /// One counter per flower type, catalog order.
    pub harvested: Vec<u32>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            grid: FieldGrid::new(GRID_SIZE),
            day: 1,
            weather: Weather::Sunny,
            weather_degree: 3,
            harvested: Vec::new(),
        }
    }
}

impl GameSession {
    /// Capture the live state as an owned value. Deep copies throughout;
    /// history entries must never alias the live grid.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.grid.clone_bytes(),
            day: self.day,
            weather: self.weather,
            weather_degree: self.weather_degree,
            harvested: self.harvested.clone(),
        }
    }

    /// Overwrite the live state from a snapshot (undo, redo, load).
    pub fn apply_snapshot(&mut self, snapshot: &GameSnapshot) {
        if snapshot.grid.len() == self.grid.byte_len() {
            self.grid.apply_bytes(&snapshot.grid);
        } else {
            self.grid = FieldGrid::from_bytes(GRID_SIZE, snapshot.grid.clone());
        }
        self.day = snapshot.day;
        self.weather = snapshot.weather;
        self.weather_degree = snapshot.weather_degree;
        self.harvested = snapshot.harvested.clone();
    }
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameSession>()
            .init_resource::<History>()
            .add_systems(
                Update,
                (
                    handle_undo,
                    handle_redo,
                    interact::handle_plant_request,
                    interact::handle_reap_confirmed,
                ),
            );
    }
}

pub fn handle_undo(
    mut intents: EventReader<UndoIntent>,
    mut session: ResMut<GameSession>,
    mut history: ResMut<History>,
    mut state_changes: EventWriter<StateChangedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for _ in intents.read() {
        match history.undo() {
            Some(snapshot) => {
                session.apply_snapshot(&snapshot);
                info!("Undo -> day {}", session.day);
                state_changes.send(StateChangedEvent);
            }
            None => {
                info!("Undo not available.");
                toasts.send(ToastEvent::new("Nothing to undo"));
            }
        }
    }
}

pub fn handle_redo(
    mut intents: EventReader<RedoIntent>,
    mut session: ResMut<GameSession>,
    mut history: ResMut<History>,
    mut state_changes: EventWriter<StateChangedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for _ in intents.read() {
        match history.redo() {
            Some(snapshot) => {
                session.apply_snapshot(&snapshot);
                info!("Redo -> day {}", session.day);
                state_changes.send(StateChangedEvent);
            }
            None => {
                info!("Redo not available.");
                toasts.send(ToastEvent::new("Nothing to redo"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Cell;

    #[test]
    fn snapshots_do_not_alias_the_live_grid() {
        let mut session = GameSession::default();
        let snapshot = session.snapshot();

        session.grid.store_cell(Cell {
            plant: 1,
            ..Cell::empty(0, 0)
        });
        session.day = 9;

        // The earlier capture is unaffected by the mutation.
        assert_eq!(snapshot.day, 1);
        assert_eq!(snapshot.grid[0], 0);
    }

    #[test]
    fn apply_snapshot_restores_every_field() {
        let mut session = GameSession::default();
        session.harvested = vec![0; 6];
        let before = session.snapshot();

        session.grid.store_cell(Cell {
            plant: 2,
            water: 4,
            ..Cell::empty(3, 3)
        });
        session.day = 4;
        session.weather = Weather::Rainy;
        session.weather_degree = 6;
        session.harvested[1] = 2;

        session.apply_snapshot(&before);
        assert_eq!(session.snapshot(), before);
    }
}
