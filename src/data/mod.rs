//! Static game data: the plant catalog and the scenario script.

pub mod plants;

use bevy::prelude::*;

use crate::scenario::{Scenario, ScenarioConfig};
use crate::shared::PlantCatalog;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlantCatalog>()
            .init_resource::<Scenario>()
            .add_systems(PreStartup, (populate_catalog, load_scenario));
    }
}

fn populate_catalog(mut catalog: ResMut<PlantCatalog>) {
    plants::populate_plants(&mut catalog);
    info!(
        "Plant catalog ready: {} flowers, {} weeds",
        catalog.flower_count,
        catalog.plants.len() - catalog.flower_count
    );
}

/// The scenario script ships inside the binary; a malformed file is a
/// build-time mistake, so a parse failure falls back to an empty scenario
/// rather than crashing the app.
fn load_scenario(mut scenario: ResMut<Scenario>) {
    const SCENARIO_SOURCE: &str = include_str!("../../assets/scenario.ron");
    match ron::from_str::<ScenarioConfig>(SCENARIO_SOURCE) {
        Ok(config) => {
            *scenario = Scenario::from_config(config);
            info!(
                "Scenario loaded: {} events, goal {:?}",
                scenario.events.len(),
                scenario.victory_goal
            );
        }
        Err(err) => {
            warn!("Failed to parse scenario script: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_scenario_script_parses() {
        let config: ScenarioConfig =
            ron::from_str(include_str!("../../assets/scenario.ron")).unwrap();
        assert_eq!(config.starting_conditions, (0, 3));
        assert_eq!(config.events.len(), 3);
        assert_eq!(config.victory_goal, vec![1, 0, 0, 0, 0, 0]);

        let scenario = Scenario::from_config(config);
        assert_eq!(scenario.events.len(), 3);
        assert_eq!(scenario.events[0].day, 2);
    }
}
