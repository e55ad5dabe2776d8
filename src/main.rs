mod data;
mod grid;
mod input;
mod player;
mod save;
mod scenario;
mod session;
mod shared;
mod sim;
mod ui;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Bloomfield".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Game state
        .init_state::<GameState>()
        // Intent events
        .add_event::<MoveIntent>()
        .add_event::<InteractIntent>()
        .add_event::<AdvanceDayIntent>()
        .add_event::<UndoIntent>()
        .add_event::<RedoIntent>()
        .add_event::<PlantRequestEvent>()
        .add_event::<ReapConfirmedEvent>()
        .add_event::<SaveGameEvent>()
        .add_event::<LoadGameEvent>()
        .add_event::<ResetGameEvent>()
        .add_event::<SavePromptIntent>()
        .add_event::<LoadPromptIntent>()
        .add_event::<ResetPromptIntent>()
        // Notifications
        .add_event::<StateChangedEvent>()
        .add_event::<ToastEvent>()
        // Domain plugins
        .add_plugins(data::DataPlugin)
        .add_plugins(session::SessionPlugin)
        .add_plugins(sim::SimPlugin)
        .add_plugins(scenario::ScenarioPlugin)
        .add_plugins(save::SavePlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(input::InputPlugin)
        .add_plugins(ui::UiPlugin)
        .run();
}
