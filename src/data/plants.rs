use bevy::prelude::*;

use crate::shared::{PlantCatalog, PlantDef};

/// Populate the plant catalog.
///
/// Flowers first, then weeds; ids are assigned by position (1-based).
/// Requisites are the daily sun/water levels a cell must have accumulated
/// for the plant to gain a growth tick. Weeds carry zero requisites and
/// are excluded from growth and harvest accounting entirely.
pub fn populate_plants(catalog: &mut PlantCatalog) {
    let flowers = vec![
        PlantDef {
            name: "Sunflower".into(),
            color: Color::srgb(1.0, 0.85, 0.1),
            sun_requisite: 3,
            water_requisite: 2,
            vibe_requisite: 0,
        },
        PlantDef {
            name: "Rose".into(),
            color: Color::srgb(1.0, 0.45, 0.65),
            sun_requisite: 2,
            water_requisite: 3,
            vibe_requisite: 0,
        },
        PlantDef {
            name: "Daffodil".into(),
            // #FFD700
            color: Color::srgb(1.0, 0.84, 0.0),
            sun_requisite: 3,
            water_requisite: 2,
            vibe_requisite: 0,
        },
        PlantDef {
            name: "Lily".into(),
            // #FFFFFF
            color: Color::srgb(1.0, 1.0, 1.0),
            sun_requisite: 2,
            water_requisite: 3,
            vibe_requisite: 0,
        },
        PlantDef {
            name: "Marigold".into(),
            // #FFA500
            color: Color::srgb(1.0, 0.65, 0.0),
            sun_requisite: 4,
            water_requisite: 2,
            vibe_requisite: 0,
        },
        PlantDef {
            name: "Fuchsia".into(),
            // #FF00FF
            color: Color::srgb(1.0, 0.0, 1.0),
            sun_requisite: 3,
            water_requisite: 3,
            vibe_requisite: 0,
        },
    ];

    let weeds = vec![PlantDef {
        name: "crabgrass".into(),
        color: Color::srgb(0.2, 0.55, 0.15),
        sun_requisite: 0,
        water_requisite: 0,
        vibe_requisite: 0,
    }];

    catalog.flower_count = flowers.len();
    catalog.plants = flowers;
    catalog.plants.extend(weeds);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_six_flowers_and_a_weed() {
        let mut catalog = PlantCatalog::default();
        populate_plants(&mut catalog);

        assert_eq!(catalog.flower_count, 6);
        assert_eq!(catalog.plants.len(), 7);
        assert_eq!(catalog.id_by_name("Sunflower"), Some(1));
        assert_eq!(catalog.first_weed_id(), Some(7));
        assert!(catalog.is_weed(7));
        assert!(!catalog.is_weed(6));
    }

    #[test]
    fn sunflower_requisites_match_the_catalog_table() {
        let mut catalog = PlantCatalog::default();
        populate_plants(&mut catalog);

        let sunflower = catalog.get(1).unwrap();
        assert_eq!(sunflower.sun_requisite, 3);
        assert_eq!(sunflower.water_requisite, 2);
    }
}
