//! Daily simulation: weather rolls, weather application, and growth.
//!
//! The three rules are pure functions over the grid and an injected
//! random source; `handle_advance_day` is the thin system that strings
//! them together when the player ends a day.

use bevy::prelude::*;
use rand::Rng;

use crate::grid::FieldGrid;
use crate::session::{GameSession, History};
use crate::shared::*;

pub struct SimPlugin;

impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, handle_advance_day);
    }
}

/// Roll tomorrow's weather: an even coin for the kind and a uniform
/// degree in 1..=6.
pub fn roll_weather(rng: &mut impl Rng) -> (Weather, u8) {
    let weather = if rng.gen::<f64>() < 0.5 {
        Weather::Sunny
    } else {
        Weather::Rainy
    };
    let degree = rng.gen_range(WEATHER_DEGREE_MIN..=WEATHER_DEGREE_MAX);
    (weather, degree)
}

/// Apply one day of weather to every occupied cell. Empty soil carries no
/// levels, so it is skipped.
///
/// Rain accumulates water by the degree and usually leaves only weak sun
/// (degree halved), with a 20% chance of the clouds parting for full sun.
/// Sunshine sets the sun level to the degree and dries the soil back to 1
/// water 90% of the time.
pub fn apply_weather(grid: &mut FieldGrid, weather: Weather, degree: u8, rng: &mut impl Rng) {
    for row in 0..grid.size() {
        for col in 0..grid.size() {
            let mut cell = grid.cell_at(row, col);
            if cell.is_empty() {
                continue;
            }
            match weather {
                Weather::Rainy => {
                    cell.water = cell.water.saturating_add(degree);
                    cell.sun = if rng.gen::<f64>() < 0.2 {
                        degree
                    } else {
                        degree / 2
                    };
                }
                Weather::Sunny => {
                    cell.sun = degree;
                    if rng.gen::<f64>() > 0.1 {
                        cell.water = 1;
                    }
                }
            }
            grid.store_cell(cell);
        }
    }
}

/// Advance growth on every planted cell whose sun and water levels meet
/// its plant's requisites. Weeds never grow; growth saturates at
/// [`MAX_PLANT_GROWTH`].
pub fn simulate_growth(grid: &mut FieldGrid, catalog: &PlantCatalog) {
    for row in 0..grid.size() {
        for col in 0..grid.size() {
            let mut cell = grid.cell_at(row, col);
            if cell.is_empty() || catalog.is_weed(cell.plant) {
                continue;
            }
            let Some(plant) = catalog.get(cell.plant) else {
                continue;
            };
            if cell.growth >= MAX_PLANT_GROWTH {
                continue;
            }
            if cell.sun >= plant.sun_requisite && cell.water >= plant.water_requisite {
                cell.growth += 1;
                if cell.growth >= MAX_PLANT_GROWTH {
                    info!("{} at ({row}, {col}) is ready to harvest", plant.name);
                }
                grid.store_cell(cell);
            }
        }
    }
}

/// End-of-day: bump the day counter, roll and apply new weather, grow
/// everything, then record the new state in history.
pub fn handle_advance_day(
    mut intents: EventReader<AdvanceDayIntent>,
    mut session: ResMut<GameSession>,
    mut history: ResMut<History>,
    mut rng: ResMut<GameRng>,
    catalog: Res<PlantCatalog>,
    mut state_changes: EventWriter<StateChangedEvent>,
) {
    for _ in intents.read() {
        session.day += 1;
        let (weather, degree) = roll_weather(&mut rng.0);
        session.weather = weather;
        session.weather_degree = degree;
        apply_weather(&mut session.grid, weather, degree, &mut rng.0);
        simulate_growth(&mut session.grid, &catalog);
        info!(
            "Day {}: {} (degree {})",
            session.day,
            weather.label(),
            degree
        );

        history.invalidate_redo();
        history.push_state(session.snapshot());
        state_changes.send(StateChangedEvent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn catalog() -> PlantCatalog {
        let mut catalog = PlantCatalog::default();
        crate::data::plants::populate_plants(&mut catalog);
        catalog
    }

    fn planted(grid: &mut FieldGrid, row: u8, col: u8, plant: u8) {
        grid.store_cell(Cell {
            plant,
            ..Cell::empty(row, col)
        });
    }

    // StepRng::new(0, 0) pins gen::<f64>() at 0.0 (below every
    // threshold); StepRng::new(u64::MAX, 0) pins it just under 1.0.

    #[test]
    fn rain_accumulates_water_and_can_break_full_sun() {
        let mut grid = FieldGrid::new(GRID_SIZE);
        planted(&mut grid, 2, 2, 1);

        // 0.0 < 0.2: the clouds part, full sun.
        apply_weather(&mut grid, Weather::Rainy, 5, &mut StepRng::new(0, 0));
        let cell = grid.cell_at(2, 2);
        assert_eq!(cell.water, 5);
        assert_eq!(cell.sun, 5);

        // High roll: weak sun, degree halved; water keeps accumulating.
        apply_weather(&mut grid, Weather::Rainy, 5, &mut StepRng::new(u64::MAX, 0));
        let cell = grid.cell_at(2, 2);
        assert_eq!(cell.water, 10);
        assert_eq!(cell.sun, 2);
    }

    #[test]
    fn sunshine_sets_sun_and_usually_dries_the_soil() {
        let mut grid = FieldGrid::new(GRID_SIZE);
        grid.store_cell(Cell {
            plant: 1,
            water: 8,
            ..Cell::empty(3, 3)
        });

        // High roll (> 0.1): soil dries back to 1.
        apply_weather(&mut grid, Weather::Sunny, 4, &mut StepRng::new(u64::MAX, 0));
        let cell = grid.cell_at(3, 3);
        assert_eq!(cell.sun, 4);
        assert_eq!(cell.water, 1);

        // Low roll: the soil keeps its moisture.
        grid.store_cell(Cell {
            plant: 1,
            water: 8,
            ..Cell::empty(3, 3)
        });
        apply_weather(&mut grid, Weather::Sunny, 4, &mut StepRng::new(0, 0));
        assert_eq!(grid.cell_at(3, 3).water, 8);
    }

    #[test]
    fn weather_skips_empty_soil() {
        let mut grid = FieldGrid::new(GRID_SIZE);
        apply_weather(&mut grid, Weather::Rainy, 6, &mut StepRng::new(0, 0));
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                assert_eq!(grid.cell_at(row, col), Cell::empty(row, col));
            }
        }
    }

    #[test]
    fn growth_requires_both_requisites() {
        let catalog = catalog();
        let mut grid = FieldGrid::new(GRID_SIZE);
        // Sunflower needs sun 3 / water 2.
        grid.store_cell(Cell {
            plant: 1,
            water: 2,
            sun: 3,
            ..Cell::empty(0, 0)
        });
        grid.store_cell(Cell {
            plant: 1,
            water: 1,
            sun: 6,
            ..Cell::empty(0, 1)
        });
        grid.store_cell(Cell {
            plant: 1,
            water: 6,
            sun: 2,
            ..Cell::empty(0, 2)
        });

        simulate_growth(&mut grid, &catalog);
        assert_eq!(grid.cell_at(0, 0).growth, 1);
        assert_eq!(grid.cell_at(0, 1).growth, 0);
        assert_eq!(grid.cell_at(0, 2).growth, 0);
    }

    #[test]
    fn growth_saturates_at_harvest_ready() {
        let catalog = catalog();
        let mut grid = FieldGrid::new(GRID_SIZE);
        grid.store_cell(Cell {
            plant: 1,
            water: 9,
            sun: 9,
            growth: MAX_PLANT_GROWTH,
            ..Cell::empty(1, 1)
        });
        simulate_growth(&mut grid, &catalog);
        assert_eq!(grid.cell_at(1, 1).growth, MAX_PLANT_GROWTH);
    }

    #[test]
    fn weeds_never_grow() {
        let catalog = catalog();
        let weed_id = catalog.first_weed_id().unwrap();
        let mut grid = FieldGrid::new(GRID_SIZE);
        grid.store_cell(Cell {
            plant: weed_id,
            water: 9,
            sun: 9,
            ..Cell::empty(4, 4)
        });
        simulate_growth(&mut grid, &catalog);
        assert_eq!(grid.cell_at(4, 4).growth, 0);
    }

    #[test]
    fn five_satisfied_days_reach_harvest_readiness() {
        let catalog = catalog();
        let mut grid = FieldGrid::new(GRID_SIZE);
        planted(&mut grid, 2, 5, 1);

        // Rain at degree 3 with the clouds parting every day keeps a
        // Sunflower's requisites (sun 3, water 2) satisfied throughout.
        for day in 1..=5 {
            apply_weather(&mut grid, Weather::Rainy, 3, &mut StepRng::new(0, 0));
            simulate_growth(&mut grid, &catalog);
            assert_eq!(grid.cell_at(2, 5).growth, day);
        }
        assert!(grid.cell_at(2, 5).harvest_ready());
    }

    #[test]
    fn weather_roll_stays_in_bounds() {
        let mut rng = StepRng::new(0, 0x1234_5678_9abc_def0);
        for _ in 0..64 {
            let (_, degree) = roll_weather(&mut rng);
            assert!((WEATHER_DEGREE_MIN..=WEATHER_DEGREE_MAX).contains(&degree));
        }
    }
}
