//! Field and farmer rendering: one sprite per cell plus the avatar,
//! re-synced from the live session every frame.

use bevy::prelude::*;

use crate::session::GameSession;
use crate::shared::*;

const SOIL_COLOR: Color = Color::srgb(0.35, 0.25, 0.15);

#[derive(Component)]
pub struct CellSprite {
    pub row: u8,
    pub col: u8,
}

/// World-space center of a cell; row 0 is the top row.
fn cell_translation(row: u8, col: u8) -> Vec3 {
    Vec3::new(
        col as f32 * CELL_SIZE - FIELD_SIZE / 2.0 + CELL_SIZE / 2.0,
        FIELD_SIZE / 2.0 - row as f32 * CELL_SIZE - CELL_SIZE / 2.0,
        1.0,
    )
}

pub fn spawn_field(mut commands: Commands) {
    // Backdrop behind the whole field.
    commands.spawn((
        Sprite::from_color(Color::srgb(0.2, 0.15, 0.1), Vec2::splat(FIELD_SIZE + 8.0)),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            commands.spawn((
                CellSprite { row, col },
                Sprite::from_color(SOIL_COLOR, Vec2::splat(CELL_SIZE - 4.0)),
                Transform::from_translation(cell_translation(row, col)),
            ));
        }
    }
}

/// Push the session's cell contents into the sprites. Planted cells take
/// their catalog color and swell with growth; empty soil stays soil.
pub fn sync_grid_sprites(
    session: Res<GameSession>,
    catalog: Res<PlantCatalog>,
    mut sprites: Query<(&CellSprite, &mut Sprite)>,
) {
    for (cell_sprite, mut sprite) in sprites.iter_mut() {
        let cell = session.grid.cell_at(cell_sprite.row, cell_sprite.col);
        match catalog.get(cell.plant) {
            Some(plant) => {
                sprite.color = plant.color;
                let fill = 0.35 + 0.55 * (cell.growth as f32 / MAX_PLANT_GROWTH as f32);
                sprite.custom_size = Some(Vec2::splat((CELL_SIZE - 4.0) * fill));
            }
            None => {
                sprite.color = SOIL_COLOR;
                sprite.custom_size = Some(Vec2::splat(CELL_SIZE - 4.0));
            }
        }
    }
}

pub fn sync_farmer_transform(mut farmers: Query<(&Farmer, &mut Transform)>) {
    for (farmer, mut transform) in farmers.iter_mut() {
        transform.translation.x = farmer.px - FIELD_SIZE / 2.0;
        transform.translation.y = FIELD_SIZE / 2.0 - farmer.py;
    }
}
