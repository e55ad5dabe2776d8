//! Snapshot wire format.
//!
//! A snapshot persists as a JSON object with the grid bytes packed into
//! padded standard base64. Field names are camelCase for parity with the
//! records this game has always written.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::{GameSnapshot, Weather, CELL_BYTES, GRID_SIZE};

/// Grid buffer length a decoded snapshot must have.
pub const GRID_BYTE_LEN: usize = GRID_SIZE as usize * GRID_SIZE as usize * CELL_BYTES;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedSnapshot {
    /// Base64 of the packed grid bytes.
    pub grid: String,
    /// Day counter.
    pub time: u32,
    /// [weather code, weather degree].
    pub current_weather: [u8; 2],
    pub harvested_plants: Vec<u32>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SnapshotDecodeError {
    Base64(base64::DecodeError),
    WrongGridLength { expected: usize, actual: usize },
    WrongCounterCount { expected: usize, actual: usize },
}

impl fmt::Display for SnapshotDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotDecodeError::Base64(err) => write!(f, "grid is not valid base64: {err}"),
            SnapshotDecodeError::WrongGridLength { expected, actual } => {
                write!(f, "grid decodes to {actual} bytes, expected {expected}")
            }
            SnapshotDecodeError::WrongCounterCount { expected, actual } => {
                write!(f, "{actual} harvest counters, expected {expected}")
            }
        }
    }
}

impl From<base64::DecodeError> for SnapshotDecodeError {
    fn from(err: base64::DecodeError) -> Self {
        SnapshotDecodeError::Base64(err)
    }
}

pub fn encode_snapshot(snapshot: &GameSnapshot) -> EncodedSnapshot {
    EncodedSnapshot {
        grid: STANDARD.encode(&snapshot.grid),
        time: snapshot.day,
        current_weather: [snapshot.weather.code(), snapshot.weather_degree],
        harvested_plants: snapshot.harvested.clone(),
    }
}

/// Decode one persisted snapshot. `flower_count` is the live catalog's
/// flower total; a counters array of any other length is corrupt (a
/// hand-edited record, or one written against a different catalog) and
/// must not reach the harvest accounting.
pub fn decode_snapshot(
    encoded: &EncodedSnapshot,
    flower_count: usize,
) -> Result<GameSnapshot, SnapshotDecodeError> {
    let grid = STANDARD.decode(&encoded.grid)?;
    if grid.len() != GRID_BYTE_LEN {
        return Err(SnapshotDecodeError::WrongGridLength {
            expected: GRID_BYTE_LEN,
            actual: grid.len(),
        });
    }
    if encoded.harvested_plants.len() != flower_count {
        return Err(SnapshotDecodeError::WrongCounterCount {
            expected: flower_count,
            actual: encoded.harvested_plants.len(),
        });
    }
    Ok(GameSnapshot {
        grid,
        day: encoded.time,
        weather: Weather::from_code(encoded.current_weather[0]),
        weather_degree: encoded.current_weather[1],
        harvested: encoded.harvested_plants.clone(),
    })
}
