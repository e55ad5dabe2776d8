//! All rendering and dialog glue. Nothing in here mutates game rules;
//! the UI reads the session and speaks back through intent events.

pub mod hud;
pub mod prompt;
pub mod render;
pub mod toast;

use bevy::prelude::*;

use crate::shared::GameState;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<prompt::ActivePrompt>()
            .add_systems(
                Startup,
                (spawn_camera, render::spawn_field, hud::spawn_hud),
            )
            .add_systems(
                Update,
                (
                    render::sync_grid_sprites,
                    render::sync_farmer_transform,
                    hud::refresh_hud,
                    toast::show_toasts,
                    toast::expire_toasts,
                ),
            )
            .add_systems(
                Update,
                prompt::open_prompts.run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                (prompt::prompt_keyboard, prompt::refresh_prompt_text)
                    .run_if(in_state(GameState::Prompt)),
            )
            .add_systems(OnEnter(GameState::Prompt), prompt::spawn_prompt_overlay)
            .add_systems(OnExit(GameState::Prompt), prompt::despawn_prompt_overlay);
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
