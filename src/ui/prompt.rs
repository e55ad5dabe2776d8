//! Modal prompt layer.
//!
//! Bevy can't block on `prompt()`/`confirm()` like a browser, so dialogs
//! are a state: opening one flips [`GameState::Prompt`], which freezes
//! the normal input adapter, and the answer is delivered back through
//! the same intent events everything else uses.

use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::ButtonState;
use bevy::prelude::*;

use crate::save::SavedGames;
use crate::session::GameSession;
use crate::shared::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    /// Type a plant name for the empty cell underfoot.
    PlantName { row: u8, col: u8 },
    /// Yes/no: tear out whatever grows at (row, col).
    ConfirmReap { row: u8, col: u8 },
    /// Type a name for the save (empty = derived default).
    SaveName,
    /// Pick a saved game by its list number.
    LoadPick,
    /// Yes/no: wipe everything.
    ConfirmReset,
}

#[derive(Resource, Debug, Default)]
pub struct ActivePrompt(pub Option<PromptState>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    pub kind: PromptKind,
    pub buffer: String,
}

impl PromptState {
    fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            buffer: String::new(),
        }
    }

    fn wants_text(&self) -> bool {
        matches!(
            self.kind,
            PromptKind::PlantName { .. } | PromptKind::SaveName | PromptKind::LoadPick
        )
    }
}

#[derive(Component)]
pub struct PromptOverlay;

#[derive(Component)]
pub struct PromptText;

/// Turn prompt-opening intents into an active dialog. Interacting with a
/// cell picks plant-vs-reap based on what's underfoot.
pub fn open_prompts(
    mut interacts: EventReader<InteractIntent>,
    mut save_intents: EventReader<SavePromptIntent>,
    mut load_intents: EventReader<LoadPromptIntent>,
    mut reset_intents: EventReader<ResetPromptIntent>,
    session: Res<GameSession>,
    saved_games: Res<SavedGames>,
    farmers: Query<&Farmer>,
    mut active: ResMut<ActivePrompt>,
    mut next_state: ResMut<NextState<GameState>>,
    mut toasts: EventWriter<ToastEvent>,
) {
    let mut open = |kind: PromptKind| {
        active.0 = Some(PromptState::new(kind));
        next_state.set(GameState::Prompt);
    };

    for _ in interacts.read() {
        let Ok(farmer) = farmers.get_single() else {
            continue;
        };
        let (row, col) = (farmer.row(), farmer.col());
        if session.grid.cell_at(row, col).is_empty() {
            open(PromptKind::PlantName { row, col });
        } else {
            open(PromptKind::ConfirmReap { row, col });
        }
        return;
    }
    for _ in save_intents.read() {
        open(PromptKind::SaveName);
        return;
    }
    for _ in load_intents.read() {
        if saved_games.0.is_empty() {
            toasts.send(ToastEvent::new("No saved games yet"));
        } else {
            open(PromptKind::LoadPick);
        }
        return;
    }
    for _ in reset_intents.read() {
        open(PromptKind::ConfirmReset);
        return;
    }
}

/// Drive the open dialog from raw key input: text entry for the typed
/// prompts, Y/N (or Enter/Escape) for the confirms.
#[allow(clippy::too_many_arguments)]
pub fn prompt_keyboard(
    mut keys: EventReader<KeyboardInput>,
    mut active: ResMut<ActivePrompt>,
    saved_games: Res<SavedGames>,
    mut next_state: ResMut<NextState<GameState>>,
    mut plant_requests: EventWriter<PlantRequestEvent>,
    mut reap_confirms: EventWriter<ReapConfirmedEvent>,
    mut saves: EventWriter<SaveGameEvent>,
    mut loads: EventWriter<LoadGameEvent>,
    mut resets: EventWriter<ResetGameEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    let Some(prompt) = active.0.as_mut() else {
        return;
    };

    let mut close = false;
    for key in keys.read() {
        if key.state != ButtonState::Pressed {
            continue;
        }
        match &key.logical_key {
            Key::Escape => {
                close = true;
                break;
            }
            Key::Backspace if prompt.wants_text() => {
                prompt.buffer.pop();
            }
            Key::Space if prompt.wants_text() => {
                prompt.buffer.push(' ');
            }
            Key::Character(typed) if prompt.wants_text() => {
                for ch in typed.chars().filter(|c| !c.is_control()) {
                    prompt.buffer.push(ch);
                }
            }
            Key::Character(typed) => {
                // Confirm dialogs: y / n.
                match typed.to_lowercase().as_str() {
                    "y" => {
                        submit(prompt, &saved_games, &mut plant_requests, &mut reap_confirms,
                               &mut saves, &mut loads, &mut resets, &mut toasts);
                        close = true;
                    }
                    "n" => close = true,
                    _ => {}
                }
                if close {
                    break;
                }
            }
            Key::Enter => {
                submit(prompt, &saved_games, &mut plant_requests, &mut reap_confirms,
                       &mut saves, &mut loads, &mut resets, &mut toasts);
                close = true;
                break;
            }
            _ => {}
        }
    }

    if close {
        active.0 = None;
        next_state.set(GameState::Playing);
    }
}

#[allow(clippy::too_many_arguments)]
fn submit(
    prompt: &PromptState,
    saved_games: &SavedGames,
    plant_requests: &mut EventWriter<PlantRequestEvent>,
    reap_confirms: &mut EventWriter<ReapConfirmedEvent>,
    saves: &mut EventWriter<SaveGameEvent>,
    loads: &mut EventWriter<LoadGameEvent>,
    resets: &mut EventWriter<ResetGameEvent>,
    toasts: &mut EventWriter<ToastEvent>,
) {
    match &prompt.kind {
        PromptKind::PlantName { row, col } => {
            if !prompt.buffer.trim().is_empty() {
                plant_requests.send(PlantRequestEvent {
                    row: *row,
                    col: *col,
                    name: prompt.buffer.clone(),
                });
            }
        }
        PromptKind::ConfirmReap { row, col } => {
            reap_confirms.send(ReapConfirmedEvent {
                row: *row,
                col: *col,
            });
        }
        PromptKind::SaveName => {
            saves.send(SaveGameEvent {
                name: prompt.buffer.clone(),
            });
        }
        PromptKind::LoadPick => {
            let picked = prompt
                .buffer
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| saved_games.0.get(idx));
            match picked {
                Some((name, _)) => loads.send(LoadGameEvent { name: name.clone() }),
                None => {
                    toasts.send(ToastEvent::new("That's not one of the saves"));
                    return;
                }
            };
        }
        PromptKind::ConfirmReset => {
            resets.send(ResetGameEvent);
        }
    }
}

pub fn spawn_prompt_overlay(mut commands: Commands) {
    commands
        .spawn((
            PromptOverlay,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(20.0),
                right: Val::Percent(20.0),
                top: Val::Percent(35.0),
                padding: UiRect::all(Val::Px(16.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.85)),
        ))
        .with_children(|parent| {
            parent.spawn((
                PromptText,
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

pub fn despawn_prompt_overlay(mut commands: Commands, overlays: Query<Entity, With<PromptOverlay>>) {
    for entity in overlays.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

pub fn refresh_prompt_text(
    active: Res<ActivePrompt>,
    saved_games: Res<SavedGames>,
    mut texts: Query<&mut Text, With<PromptText>>,
) {
    let Ok(mut text) = texts.get_single_mut() else {
        return;
    };
    let Some(prompt) = active.0.as_ref() else {
        return;
    };

    **text = match &prompt.kind {
        PromptKind::PlantName { .. } => {
            format!("Plant what here?\n> {}_\n(Enter to plant, Esc to cancel)", prompt.buffer)
        }
        PromptKind::ConfirmReap { .. } => {
            "Tear this plant out? (Y/N)".to_string()
        }
        PromptKind::SaveName => {
            format!("Save as:\n> {}_\n(empty name picks one for you)", prompt.buffer)
        }
        PromptKind::LoadPick => {
            let mut listing = String::from("Load which save?\n");
            for (idx, (name, _)) in saved_games.0.iter().enumerate() {
                listing.push_str(&format!("  {}. {}\n", idx + 1, name));
            }
            listing.push_str(&format!("> {}_", prompt.buffer));
            listing
        }
        PromptKind::ConfirmReset => {
            "Wipe ALL progress and saved games? (Y/N)".to_string()
        }
    };
}
