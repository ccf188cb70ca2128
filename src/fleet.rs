//! The set of ships on the placement page and pointer routing between them.

use crate::audio::AudioQueue;
use crate::board::Board;
use crate::common::{Coord, PlacementError};
use crate::config::{LayoutOffsets, FLEET};
use crate::ship::Ship;
use crate::view::{CellView, Point, ViewHandle};

/// Pointer input relevant to ship placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Press on the view of ship `ship`.
    Down { ship: usize, at: Point },
    /// Document-wide pointer move.
    Move(Point),
    /// Document-wide pointer release.
    Up(Point),
    /// Double activation on the view of ship `ship`.
    DoubleClick { ship: usize },
}

pub struct Fleet<V: ViewHandle> {
    ships: Vec<Ship<V>>,
    dragging: Option<usize>,
    audio: AudioQueue,
}

impl<V: ViewHandle> Fleet<V> {
    pub fn new(ships: Vec<Ship<V>>, audio: AudioQueue) -> Self {
        Self {
            ships,
            dragging: None,
            audio,
        }
    }

    /// One ship per entry of [`FLEET`], paired with `views` in order.
    /// Extra views are ignored.
    pub fn standard<I>(views: I, layout: LayoutOffsets, audio: AudioQueue) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        let ships = FLEET
            .iter()
            .zip(views)
            .map(|(&len, view)| Ship::new(len, view, layout))
            .collect();
        Self::new(ships, audio)
    }

    pub fn ships(&self) -> &[Ship<V>] {
        &self.ships
    }

    pub fn ship(&self, idx: usize) -> Option<&Ship<V>> {
        self.ships.get(idx)
    }

    /// Index of the ship currently being dragged.
    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    /// Feed one pointer event; this stands in for registering pointer-down and
    /// double-click listeners on each ship view. Moves and releases only reach
    /// a ship between its press and its release; outside a drag they are ignored.
    pub fn handle<C: CellView>(
        &mut self,
        event: PointerEvent,
        board: &Board<C>,
    ) -> Result<(), PlacementError> {
        match event {
            PointerEvent::Down { ship, at } => {
                if let Some(active) = self.dragging {
                    return Err(PlacementError::AlreadyDragging(active));
                }
                self.ships
                    .get_mut(ship)
                    .ok_or(PlacementError::UnknownShip(ship))?
                    .press(at);
                self.dragging = Some(ship);
                Ok(())
            }
            PointerEvent::Move(at) => match self.dragging {
                Some(idx) => self.ships[idx].drag(at),
                None => Ok(()),
            },
            PointerEvent::Up(at) => match self.dragging.take() {
                Some(idx) => self.ships[idx].release(at, board, &self.audio).map(|_| ()),
                None => Ok(()),
            },
            PointerEvent::DoubleClick { ship } => self
                .ships
                .get_mut(ship)
                .ok_or(PlacementError::UnknownShip(ship))?
                .rotate()
                .map(|rotation| log::debug!("ship {} rotated to {}°", ship, rotation.degrees())),
        }
    }

    /// Whether every ship has committed coordinates.
    pub fn is_complete(&self) -> bool {
        self.ships.iter().all(|s| s.coordinates().is_some())
    }

    /// Coordinate list of every ship, in fleet order.
    pub fn positions(&self) -> Result<Vec<Vec<Coord>>, PlacementError> {
        self.ships
            .iter()
            .enumerate()
            .map(|(idx, ship)| {
                ship.coordinates()
                    .map(<[Coord]>::to_vec)
                    .ok_or(PlacementError::NotPlaced { ship: idx })
            })
            .collect()
    }
}
