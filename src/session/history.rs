//! Undo/redo history over game snapshots.
//!
//! `states` is the past with the newest entry last; once the game is
//! running it always holds at least the current state. `redo` is the
//! future, populated only by undo and cleared by any fresh mutation.

use bevy::prelude::*;

use crate::shared::GameSnapshot;

#[derive(Resource, Debug, Clone, Default)]
pub struct History {
    states: Vec<GameSnapshot>,
    redo: Vec<GameSnapshot>,
}

impl History {
    /// Record a new current state. The sole way entries are created.
    pub fn push_state(&mut self, snapshot: GameSnapshot) {
        self.states.push(snapshot);
    }

    /// Step back one state. Returns the snapshot to re-apply, or None
    /// when only the initial state remains.
    pub fn undo(&mut self) -> Option<GameSnapshot> {
        if self.states.len() < 2 {
            return None;
        }
        let current = self.states.pop()?;
        self.redo.push(current);
        self.states.last().cloned()
    }

    /// Step forward again. Returns the snapshot to re-apply, or None
    /// when nothing has been undone.
    pub fn redo(&mut self) -> Option<GameSnapshot> {
        let next = self.redo.pop()?;
        self.states.push(next.clone());
        Some(next)
    }

    /// A fresh mutation forks the timeline; the undone future is gone.
    pub fn invalidate_redo(&mut self) {
        self.redo.clear();
    }

    /// Swap in a whole past (loading a saved game). Redo does not
    /// survive a load.
    pub fn replace_all(&mut self, states: Vec<GameSnapshot>) {
        self.states = states;
        self.redo.clear();
    }

    pub fn states(&self) -> &[GameSnapshot] {
        &self.states
    }

    pub fn current(&self) -> Option<&GameSnapshot> {
        self.states.last()
    }

    pub fn can_undo(&self) -> bool {
        self.states.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Weather;

    fn snap(day: u32) -> GameSnapshot {
        GameSnapshot {
            grid: vec![day as u8; 6],
            day,
            weather: Weather::Sunny,
            weather_degree: 3,
            harvested: vec![0; 6],
        }
    }

    #[test]
    fn undo_then_redo_is_identity() {
        let mut history = History::default();
        history.push_state(snap(1));
        history.push_state(snap(2));
        history.push_state(snap(3));

        let back = history.undo().unwrap();
        assert_eq!(back.day, 2);
        let forward = history.redo().unwrap();
        assert_eq!(forward.day, 3);
        assert_eq!(history.current().unwrap().day, 3);
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_stops_at_the_initial_state() {
        let mut history = History::default();
        assert!(history.undo().is_none());

        history.push_state(snap(1));
        // The initial state itself cannot be undone away.
        assert!(history.undo().is_none());
        assert_eq!(history.current().unwrap().day, 1);

        history.push_state(snap(2));
        assert_eq!(history.undo().unwrap().day, 1);
        assert!(history.undo().is_none());
    }

    #[test]
    fn redo_without_undo_is_a_no_op() {
        let mut history = History::default();
        history.push_state(snap(1));
        assert!(history.redo().is_none());
    }

    #[test]
    fn fresh_mutation_invalidates_redo() {
        let mut history = History::default();
        history.push_state(snap(1));
        history.push_state(snap(2));
        history.undo();
        assert!(history.can_redo());

        // A new action after undo forks the timeline.
        history.invalidate_redo();
        history.push_state(snap(5));
        assert!(history.redo().is_none());
        assert_eq!(history.current().unwrap().day, 5);
    }

    #[test]
    fn repeated_undo_walks_the_whole_past() {
        let mut history = History::default();
        for day in 1..=4 {
            history.push_state(snap(day));
        }
        assert_eq!(history.undo().unwrap().day, 3);
        assert_eq!(history.undo().unwrap().day, 2);
        assert_eq!(history.undo().unwrap().day, 1);
        assert!(history.undo().is_none());
        // And redo walks it forward again.
        assert_eq!(history.redo().unwrap().day, 2);
        assert_eq!(history.redo().unwrap().day, 3);
        assert_eq!(history.redo().unwrap().day, 4);
    }

    #[test]
    fn replace_all_drops_redo() {
        let mut history = History::default();
        history.push_state(snap(1));
        history.push_state(snap(2));
        history.undo();

        history.replace_all(vec![snap(7), snap(8)]);
        assert_eq!(history.current().unwrap().day, 8);
        assert!(!history.can_redo());
        assert!(history.can_undo());
    }
}
