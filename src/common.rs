//! Common types: grid coordinates and the error enums shared across modules.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Logical (row, col) position on a board. Serialized as `[row, col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct Coord {
    pub row: u32,
    pub col: u32,
}

impl Coord {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl From<[u32; 2]> for Coord {
    fn from([row, col]: [u32; 2]) -> Self {
        Self { row, col }
    }
}

impl From<Coord> for [u32; 2] {
    fn from(c: Coord) -> Self {
        [c.row, c.col]
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Errors raised by the placement state machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("no ship with index {0}")]
    UnknownShip(usize),
    #[error("ship {0} is already being dragged")]
    AlreadyDragging(usize),
    #[error("no drag in progress")]
    NotDragging,
    #[error("cannot rotate while dragging")]
    RotateWhileDragging,
    #[error("board has no cells to snap to")]
    EmptyGrid,
    #[error("ship {ship} has no committed coordinates")]
    NotPlaced { ship: usize },
    #[error("invalid rotation value {0}: must be either 0 or 90")]
    InvalidRotation(u16),
}

/// Errors raised while talking to the game server.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{endpoint} answered with status {status}")]
    Status { endpoint: &'static str, status: u16 },
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("request rejected: {0}")]
    Rejected(String),
}
