use serde::{Deserialize, Serialize};

use crate::audio::Cue;
use crate::common::Coord;
use crate::config::FLEET;

/// Identifiers returned by `GET /new_game/` and `GET /join_game/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIds {
    pub game_id: String,
    pub player_id: String,
}

/// Body of `POST /position/{game_id}`: one coordinate list per ship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRequest {
    pub player_id: String,
    pub position: Vec<Vec<Coord>>,
}

/// Body of `POST /shot/{game_id}`. `x` is the row, `y` the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotRequest {
    pub player_id: String,
    pub x: u32,
    pub y: u32,
}

impl ShotRequest {
    pub fn new(player_id: impl Into<String>, target: Coord) -> Self {
        Self {
            player_id: player_id.into(),
            x: target.row,
            y: target.col,
        }
    }
}

/// Outcome of a shot, both as the `/shot` response and as a push event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotResult {
    pub hit: bool,
    pub sunk: bool,
    /// Length of the sunk ship; only meaningful when `sunk`.
    #[serde(default)]
    pub length: usize,
    pub fleet_destroyed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot: Option<Coord>,
}

/// One `LostPoint` per unit of the sunk ship. A `length` longer than any
/// ship of the fleet is clamped to the longest one.
fn lost_points(result: &ShotResult) -> impl Iterator<Item = Cue> {
    let longest = FLEET.iter().copied().max().unwrap_or(0);
    if result.length > longest {
        log::warn!("sunk ship length {} out of range, using {}", result.length, longest);
    }
    std::iter::repeat(Cue::LostPoint).take(result.length.min(longest))
}

/// Cues for the answer to one of our own shots.
pub fn outgoing_cues(result: &ShotResult) -> Vec<Cue> {
    let mut cues = vec![Cue::Shot];
    if result.hit {
        cues.extend([Cue::Hit, Cue::EnemyHit]);
    } else {
        cues.push(Cue::Miss);
    }
    if result.sunk {
        cues.push(Cue::Sinking);
        cues.extend(lost_points(result));
        cues.push(Cue::EnemySunk);
    }
    if result.fleet_destroyed {
        cues.push(Cue::Ending);
    }
    cues
}

/// Cues for an opponent shot against our board.
pub fn incoming_cues(result: &ShotResult) -> Vec<Cue> {
    let mut cues = vec![Cue::Shot];
    if result.hit {
        cues.extend([Cue::Hit, Cue::OwnHit]);
    } else {
        cues.push(Cue::Miss);
    }
    if result.sunk {
        cues.push(Cue::LostOwnShip);
        cues.extend(lost_points(result));
        cues.push(Cue::OwnSunk);
    }
    if result.fleet_destroyed {
        cues.push(Cue::Ending);
    }
    cues
}
