//! Farmer avatar: spawning and toroidal movement.
//!
//! The farmer walks in whole-cell steps. Positions are continuous pixels
//! over the field; walking off any edge comes back in on the far side.

use bevy::prelude::*;

use crate::shared::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_farmer)
            .add_systems(Update, handle_move);
    }
}

fn spawn_farmer(mut commands: Commands) {
    commands.spawn((
        Farmer::new(),
        Sprite::from_color(
            Color::srgb(0.55, 0.35, 0.2),
            Vec2::splat(CELL_SIZE * 0.6),
        ),
        Transform::from_xyz(0.0, 0.0, 2.0),
    ));
}

/// One cell-sized step with wrap-around on every edge.
pub fn apply_move(farmer: &mut Farmer, direction: Direction) {
    match direction {
        Direction::North => farmer.py = (farmer.py - CELL_SIZE).rem_euclid(FIELD_SIZE),
        Direction::South => farmer.py = (farmer.py + CELL_SIZE).rem_euclid(FIELD_SIZE),
        Direction::West => farmer.px = (farmer.px - CELL_SIZE).rem_euclid(FIELD_SIZE),
        Direction::East => farmer.px = (farmer.px + CELL_SIZE).rem_euclid(FIELD_SIZE),
    }
}

pub fn handle_move(
    mut intents: EventReader<MoveIntent>,
    mut farmers: Query<&mut Farmer>,
) {
    for intent in intents.read() {
        if let Ok(mut farmer) = farmers.get_single_mut() {
            apply_move(&mut farmer, intent.direction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn farmer_starts_on_the_center_cell() {
        let farmer = Farmer::new();
        assert_eq!(farmer.row(), GRID_SIZE / 2);
        assert_eq!(farmer.col(), GRID_SIZE / 2);
    }

    #[test]
    fn steps_move_exactly_one_cell() {
        let mut farmer = Farmer::new();
        let (row, col) = (farmer.row(), farmer.col());

        apply_move(&mut farmer, Direction::North);
        assert_eq!((farmer.row(), farmer.col()), (row - 1, col));
        apply_move(&mut farmer, Direction::South);
        apply_move(&mut farmer, Direction::East);
        assert_eq!((farmer.row(), farmer.col()), (row, col + 1));
        apply_move(&mut farmer, Direction::West);
        assert_eq!((farmer.row(), farmer.col()), (row, col));
    }

    #[test]
    fn stepping_off_any_edge_wraps_to_the_far_side() {
        let mut farmer = Farmer::new();

        // Walk to the top edge, then once more.
        while farmer.row() > 0 {
            apply_move(&mut farmer, Direction::North);
        }
        apply_move(&mut farmer, Direction::North);
        assert_eq!(farmer.row(), GRID_SIZE - 1);

        apply_move(&mut farmer, Direction::South);
        assert_eq!(farmer.row(), 0);

        while farmer.col() > 0 {
            apply_move(&mut farmer, Direction::West);
        }
        apply_move(&mut farmer, Direction::West);
        assert_eq!(farmer.col(), GRID_SIZE - 1);

        apply_move(&mut farmer, Direction::East);
        assert_eq!(farmer.col(), 0);
    }

    #[test]
    fn a_full_lap_returns_home() {
        let mut farmer = Farmer::new();
        let start = (farmer.row(), farmer.col());
        for _ in 0..GRID_SIZE {
            apply_move(&mut farmer, Direction::East);
        }
        assert_eq!((farmer.row(), farmer.col()), start);
    }
}
