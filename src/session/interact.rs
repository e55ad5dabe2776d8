//! Planting and reaping: the two cell mutations the player performs
//! directly. Both run after the prompt layer has resolved what the
//! player asked for.

use bevy::prelude::*;

use crate::session::{GameSession, History};
use crate::shared::*;

/// Resolve a typed plant name against the catalog and, if it names a
/// flower and the cell is still empty, put it in the ground.
pub fn handle_plant_request(
    mut requests: EventReader<PlantRequestEvent>,
    mut session: ResMut<GameSession>,
    mut history: ResMut<History>,
    catalog: Res<PlantCatalog>,
    mut state_changes: EventWriter<StateChangedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for request in requests.read() {
        let Some(id) = catalog.id_by_name(&request.name) else {
            info!("Unknown plant '{}'", request.name);
            toasts.send(ToastEvent::new(format!(
                "No seeds for \"{}\"",
                request.name.trim()
            )));
            continue;
        };
        if catalog.is_weed(id) {
            toasts.send(ToastEvent::new("You wouldn't plant a weed on purpose"));
            continue;
        }
        if !session.grid.cell_at(request.row, request.col).is_empty() {
            toasts.send(ToastEvent::new("Something is already growing here"));
            continue;
        }

        session.grid.store_cell(Cell {
            plant: id,
            ..Cell::empty(request.row, request.col)
        });
        info!(
            "Planted {} at ({}, {})",
            request.name.trim(),
            request.row,
            request.col
        );

        history.invalidate_redo();
        history.push_state(session.snapshot());
        state_changes.send(StateChangedEvent);
    }
}

/// Clear a confirmed cell. Harvest-ready flowers bump their counter and
/// land in the farmer's inventory; anything else (weeds, immature
/// plants) is simply torn out.
pub fn handle_reap_confirmed(
    mut confirmations: EventReader<ReapConfirmedEvent>,
    mut session: ResMut<GameSession>,
    mut history: ResMut<History>,
    catalog: Res<PlantCatalog>,
    mut farmers: Query<&mut Farmer>,
    mut state_changes: EventWriter<StateChangedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for confirmed in confirmations.read() {
        let cell = session.grid.cell_at(confirmed.row, confirmed.col);
        if cell.is_empty() {
            continue;
        }

        if cell.harvest_ready() {
            if let Some(index) = catalog.flower_index(cell.plant) {
                let plant = catalog.get(cell.plant).cloned();
                if let Some(plant) = plant {
                    session.harvested[index] += 1;
                    info!(
                        "Harvested {} ({} total)",
                        plant.name, session.harvested[index]
                    );
                    toasts.send(ToastEvent::new(format!("Harvested a {}!", plant.name)));
                    if let Ok(mut farmer) = farmers.get_single_mut() {
                        farmer.plants.push(plant);
                    }
                }
            }
        } else if catalog.is_weed(cell.plant) {
            toasts.send(ToastEvent::new("Pulled a weed"));
        } else {
            toasts.send(ToastEvent::new("Cleared before it was ready"));
        }

        session.grid.clear_cell(confirmed.row, confirmed.col);
        history.invalidate_redo();
        history.push_state(session.snapshot());
        state_changes.send(StateChangedEvent);
    }
}
