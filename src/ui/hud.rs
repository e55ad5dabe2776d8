//! HUD text panel: day, weather, the cell underfoot, harvest totals,
//! the victory goal, and the seed list. Rebuilt every frame; the text is
//! tiny and the session is small.

use bevy::prelude::*;

use crate::scenario::Scenario;
use crate::session::GameSession;
use crate::shared::*;

#[derive(Component)]
pub struct HudText;

pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        HudText,
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            ..default()
        },
    ));
}

pub fn refresh_hud(
    session: Res<GameSession>,
    catalog: Res<PlantCatalog>,
    scenario: Res<Scenario>,
    farmers: Query<&Farmer>,
    mut texts: Query<&mut Text, With<HudText>>,
) {
    let Ok(mut text) = texts.get_single_mut() else {
        return;
    };

    let mut lines = vec![
        format!("Day {}", session.day),
        format!(
            "{} (degree {})",
            session.weather.label(),
            session.weather_degree
        ),
    ];

    if let Ok(farmer) = farmers.get_single() {
        lines.push(describe_cell(&session, &catalog, farmer.row(), farmer.col()));
    }

    let totals = catalog
        .flowers()
        .iter()
        .zip(&session.harvested)
        .map(|(plant, count)| format!("{} {}", plant.name, count))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("Harvested: {totals}"));

    let goal = catalog
        .flowers()
        .iter()
        .zip(&scenario.victory_goal)
        .filter(|(_, goal)| **goal > 0)
        .map(|(plant, goal)| format!("{} x{}", plant.name, goal))
        .collect::<Vec<_>>()
        .join(", ");
    if !goal.is_empty() {
        lines.push(format!("Goal: {goal}"));
    }

    let seeds = catalog
        .flowers()
        .iter()
        .map(|plant| plant.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("Seeds: {seeds}"));
    lines.push("Move: arrows  Interact: space  End day: T".into());
    lines.push("Undo: U  Redo: R  Save: F5  Load: F9  Reset: Del".into());

    **text = lines.join("\n");
}

/// One-line description of the cell the farmer is standing on.
pub fn describe_cell(session: &GameSession, catalog: &PlantCatalog, row: u8, col: u8) -> String {
    let cell = session.grid.cell_at(row, col);
    match catalog.get(cell.plant) {
        Some(plant) if cell.harvest_ready() => {
            format!("({row}, {col}): {}, ready to harvest", plant.name)
        }
        Some(plant) => format!(
            "({row}, {col}): {} (water {}, growth {}/{})",
            plant.name, cell.water, cell.growth, MAX_PLANT_GROWTH
        ),
        None => format!("({row}, {col}): no plant here"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Cell;

    fn session_and_catalog() -> (GameSession, PlantCatalog) {
        let mut catalog = PlantCatalog::default();
        crate::data::plants::populate_plants(&mut catalog);
        let mut session = GameSession::default();
        session.harvested = vec![0; catalog.flower_count];
        (session, catalog)
    }

    #[test]
    fn cell_readout_names_the_plant_and_levels() {
        let (mut session, catalog) = session_and_catalog();
        session.grid.store_cell(Cell {
            plant: 1,
            water: 4,
            growth: 2,
            ..Cell::empty(3, 3)
        });

        let line = describe_cell(&session, &catalog, 3, 3);
        assert!(line.contains("Sunflower"));
        assert!(line.contains("water 4"));
        assert!(line.contains("growth 2/5"));
    }

    #[test]
    fn cell_readout_handles_empty_and_ready_cells() {
        let (mut session, catalog) = session_and_catalog();
        assert!(describe_cell(&session, &catalog, 0, 0).contains("no plant here"));

        session.grid.store_cell(Cell {
            plant: 2,
            growth: MAX_PLANT_GROWTH,
            ..Cell::empty(0, 0)
        });
        assert!(describe_cell(&session, &catalog, 0, 0).contains("ready to harvest"));
    }
}
