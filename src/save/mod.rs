//! Save system: game bootstrap, autosave, named saves, and reset.
//!
//! Persistence is best-effort. A corrupt or missing record means a fresh
//! game with a log line, never a crash; write failures are logged and
//! play continues.

pub mod codec;
pub mod store;

use bevy::prelude::*;
use rand::{Rng, SeedableRng};

use crate::scenario::Scenario;
use crate::session::{GameSession, History};
use crate::shared::*;
use crate::sim;

use codec::{decode_snapshot, encode_snapshot, EncodedSnapshot};
use store::{SAVED_GAMES_KEY, STATES_KEY};

/// Named saves, insertion order preserved. Each entry keeps the full
/// decoded history so loading restores undo depth too.
#[derive(Resource, Debug, Default)]
pub struct SavedGames(pub Vec<(String, Vec<GameSnapshot>)>);

impl SavedGames {
    pub fn find(&self, name: &str) -> Option<&[GameSnapshot]> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, states)| states.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }
}

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SavedGames>()
            .insert_resource(GameRng(rand::rngs::StdRng::from_entropy()))
            .add_systems(Startup, initialize_game)
            .add_systems(
                Update,
                (
                    autosave_on_state_change,
                    handle_save_game,
                    handle_load_game,
                    handle_reset_game,
                ),
            );
    }
}

/// Resume the autosaved run if one decodes cleanly; otherwise start
/// fresh with the scenario's starting conditions. Also warms the named
/// save list.
pub fn initialize_game(
    mut session: ResMut<GameSession>,
    mut history: ResMut<History>,
    mut saved_games: ResMut<SavedGames>,
    mut scenario: ResMut<Scenario>,
    mut rng: ResMut<GameRng>,
    catalog: Res<PlantCatalog>,
    mut state_changes: EventWriter<StateChangedEvent>,
) {
    saved_games.0 = read_saved_games(catalog.flower_count);

    match read_autosave(catalog.flower_count) {
        Some(states) if !states.is_empty() => {
            if let Some(last) = states.last() {
                info!("Resuming autosaved run (day {})", last.day);
                session.apply_snapshot(last);
            }
            history.replace_all(states);
        }
        _ => {
            start_fresh_game(&mut session, &mut scenario, &catalog, &mut rng.0);
            history.replace_all(vec![session.snapshot()]);
            info!("Started a fresh game");
        }
    }
    state_changes.send(StateChangedEvent);
}

/// Build a brand-new day-1 session: empty grid with random starting
/// weeds, scenario starting weather applied once.
pub fn start_fresh_game(
    session: &mut GameSession,
    scenario: &mut Scenario,
    catalog: &PlantCatalog,
    rng: &mut impl Rng,
) {
    *session = GameSession::default();
    session.harvested = vec![0; catalog.flower_count];
    if let Some(weed_id) = catalog.first_weed_id() {
        session.grid.seed_weeds(weed_id, rng);
    }
    scenario.rearm();
    session.weather = scenario.starting_weather;
    session.weather_degree = scenario.starting_degree;
    sim::apply_weather(
        &mut session.grid,
        session.weather,
        session.weather_degree,
        rng,
    );
}

/// Rewrite the autosave record after every mutating action.
pub fn autosave_on_state_change(
    mut state_changes: EventReader<StateChangedEvent>,
    history: Res<History>,
) {
    if state_changes.is_empty() {
        return;
    }
    state_changes.clear();

    let encoded: Vec<EncodedSnapshot> = history.states().iter().map(encode_snapshot).collect();
    match serde_json::to_string(&encoded) {
        Ok(payload) => {
            if let Err(err) = store::write_record(STATES_KEY, &payload) {
                warn!("Autosave failed: {err}");
            }
        }
        Err(err) => warn!("Autosave serialization failed: {err}"),
    }
}

pub fn handle_save_game(
    mut events: EventReader<SaveGameEvent>,
    session: Res<GameSession>,
    history: Res<History>,
    mut saved_games: ResMut<SavedGames>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for event in events.read() {
        let name = if event.name.trim().is_empty() {
            format!("day{}-save{}", session.day, saved_games.0.len() + 1)
        } else {
            event.name.trim().to_string()
        };

        let states = history.states().to_vec();
        match saved_games.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = states,
            None => saved_games.0.push((name.clone(), states)),
        }

        if let Err(err) = persist_saved_games(&saved_games) {
            warn!("Saving '{name}' failed: {err}");
            toasts.send(ToastEvent::new("Save failed"));
        } else {
            info!("Saved game '{name}'");
            toasts.send(ToastEvent::new(format!("Saved as \"{name}\"")));
        }
    }
}

pub fn handle_load_game(
    mut events: EventReader<LoadGameEvent>,
    mut session: ResMut<GameSession>,
    mut history: ResMut<History>,
    saved_games: Res<SavedGames>,
    mut state_changes: EventWriter<StateChangedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for event in events.read() {
        let Some(states) = saved_games.find(&event.name) else {
            warn!("No saved game named '{}'", event.name);
            toasts.send(ToastEvent::new(format!("No save named \"{}\"", event.name)));
            continue;
        };
        if let Some(last) = states.last() {
            session.apply_snapshot(last);
            history.replace_all(states.to_vec());
            info!("Loaded '{}' (day {})", event.name, session.day);
            toasts.send(ToastEvent::new(format!("Loaded \"{}\"", event.name)));
            state_changes.send(StateChangedEvent);
        }
    }
}

/// Wipe both persisted records and rebuild a fresh game in place.
pub fn handle_reset_game(
    mut events: EventReader<ResetGameEvent>,
    mut session: ResMut<GameSession>,
    mut history: ResMut<History>,
    mut saved_games: ResMut<SavedGames>,
    mut scenario: ResMut<Scenario>,
    mut rng: ResMut<GameRng>,
    catalog: Res<PlantCatalog>,
    mut state_changes: EventWriter<StateChangedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for _ in events.read() {
        for key in [STATES_KEY, SAVED_GAMES_KEY] {
            if let Err(err) = store::delete_record(key) {
                warn!("Reset: {err}");
            }
        }
        saved_games.0.clear();

        start_fresh_game(&mut session, &mut scenario, &catalog, &mut rng.0);
        history.replace_all(vec![session.snapshot()]);
        info!("Reset: all progress wiped");
        toasts.send(ToastEvent::new("Everything reset"));
        state_changes.send(StateChangedEvent);
    }
}

fn read_autosave(flower_count: usize) -> Option<Vec<GameSnapshot>> {
    let payload = match store::read_record(STATES_KEY) {
        Ok(Some(payload)) => payload,
        Ok(None) => return None,
        Err(err) => {
            warn!("Autosave unreadable: {err}");
            return None;
        }
    };
    let encoded: Vec<EncodedSnapshot> = match serde_json::from_str(&payload) {
        Ok(encoded) => encoded,
        Err(err) => {
            warn!("Autosave corrupt, starting fresh: {err}");
            return None;
        }
    };
    let mut states = Vec::with_capacity(encoded.len());
    for snapshot in &encoded {
        match decode_snapshot(snapshot, flower_count) {
            Ok(state) => states.push(state),
            Err(err) => {
                warn!("Autosave corrupt, starting fresh: {err}");
                return None;
            }
        }
    }
    Some(states)
}

fn read_saved_games(flower_count: usize) -> Vec<(String, Vec<GameSnapshot>)> {
    let payload = match store::read_record(SAVED_GAMES_KEY) {
        Ok(Some(payload)) => payload,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!("Saved games unreadable: {err}");
            return Vec::new();
        }
    };
    let encoded: Vec<(String, Vec<EncodedSnapshot>)> = match serde_json::from_str(&payload) {
        Ok(encoded) => encoded,
        Err(err) => {
            warn!("Saved games corrupt, ignoring: {err}");
            return Vec::new();
        }
    };
    let mut games = Vec::with_capacity(encoded.len());
    for (name, snapshots) in &encoded {
        let mut states = Vec::with_capacity(snapshots.len());
        let mut ok = true;
        for snapshot in snapshots {
            match decode_snapshot(snapshot, flower_count) {
                Ok(state) => states.push(state),
                Err(err) => {
                    warn!("Saved game '{name}' corrupt, skipping: {err}");
                    ok = false;
                    break;
                }
            }
        }
        if ok {
            games.push((name.clone(), states));
        }
    }
    games
}

fn persist_saved_games(saved_games: &SavedGames) -> Result<(), String> {
    let encoded: Vec<(String, Vec<EncodedSnapshot>)> = saved_games
        .0
        .iter()
        .map(|(name, states)| (name.clone(), states.iter().map(encode_snapshot).collect()))
        .collect();
    let payload =
        serde_json::to_string(&encoded).map_err(|e| format!("serialization failed: {e}"))?;
    store::write_record(SAVED_GAMES_KEY, &payload)
}
