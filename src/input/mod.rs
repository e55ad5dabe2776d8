//! Keyboard → intent adapter. Dumb glue: no game rules live here, every
//! key press becomes exactly one intent event. Suppressed entirely while
//! a prompt is open.

use bevy::prelude::*;

use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            dispatch_keyboard.run_if(in_state(GameState::Playing)),
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn dispatch_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    mut moves: EventWriter<MoveIntent>,
    mut interacts: EventWriter<InteractIntent>,
    mut advances: EventWriter<AdvanceDayIntent>,
    mut undos: EventWriter<UndoIntent>,
    mut redos: EventWriter<RedoIntent>,
    mut save_prompts: EventWriter<SavePromptIntent>,
    mut load_prompts: EventWriter<LoadPromptIntent>,
    mut reset_prompts: EventWriter<ResetPromptIntent>,
) {
    for (key, direction) in [
        (KeyCode::ArrowUp, Direction::North),
        (KeyCode::ArrowDown, Direction::South),
        (KeyCode::ArrowLeft, Direction::West),
        (KeyCode::ArrowRight, Direction::East),
        (KeyCode::KeyW, Direction::North),
        (KeyCode::KeyS, Direction::South),
        (KeyCode::KeyA, Direction::West),
        (KeyCode::KeyD, Direction::East),
    ] {
        if keys.just_pressed(key) {
            moves.send(MoveIntent { direction });
        }
    }

    if keys.just_pressed(KeyCode::Space) {
        interacts.send(InteractIntent);
    }
    if keys.just_pressed(KeyCode::KeyT) {
        advances.send(AdvanceDayIntent);
    }
    if keys.just_pressed(KeyCode::KeyU) {
        undos.send(UndoIntent);
    }
    if keys.just_pressed(KeyCode::KeyR) {
        redos.send(RedoIntent);
    }
    if keys.just_pressed(KeyCode::F5) {
        save_prompts.send(SavePromptIntent);
    }
    if keys.just_pressed(KeyCode::F9) {
        load_prompts.send(LoadPromptIntent);
    }
    if keys.just_pressed(KeyCode::Delete) {
        reset_prompts.send(ResetPromptIntent);
    }
}
