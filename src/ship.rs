//! Draggable ships and their placement lifecycle.

use crate::audio::{AudioQueue, Cue};
use crate::board::Board;
use crate::common::{Coord, PlacementError};
use crate::config::LayoutOffsets;
use crate::view::{CellView, Point, ViewHandle};

/// Orientation of a ship graphic. Only quarter turns between the two poses
/// exist; any other angle is rejected at conversion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
        }
    }

    /// Next pose of the `(deg + 90) % 180` cycle.
    pub fn toggled(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg0,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = PlacementError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            other => Err(PlacementError::InvalidRotation(other)),
        }
    }
}

/// Where a ship is in its drag lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging,
}

/// A ship owned by the placement page until the fleet is submitted.
pub struct Ship<V: ViewHandle> {
    length: usize,
    rotation: Rotation,
    coordinates: Option<Vec<Coord>>,
    state: DragState,
    view: V,
    layout: LayoutOffsets,
}

impl<V: ViewHandle> Ship<V> {
    pub fn new(length: usize, view: V, layout: LayoutOffsets) -> Self {
        Self {
            length,
            rotation: Rotation::Deg0,
            coordinates: None,
            state: DragState::Idle,
            view,
            layout,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Coordinates committed by the last release, if any.
    pub fn coordinates(&self) -> Option<&[Coord]> {
        self.coordinates.as_deref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Lateral correction keeping a rotated graphic centered on its pivot.
    pub fn rotation_offset(&self) -> Point {
        match self.rotation {
            Rotation::Deg0 => Point::new(0.0, 0.0),
            Rotation::Deg90 => {
                let half = self.view.bounds().width / 2.0;
                Point::new(half - self.layout.anchor_x, -half + self.layout.anchor_x)
            }
        }
    }

    fn pointer_position(&self, pointer: Point) -> Point {
        let rot = self.rotation_offset();
        Point::new(
            pointer.x - self.layout.pointer_left + rot.x,
            pointer.y - self.layout.anchor_x - self.layout.anchor_y + rot.y,
        )
    }

    /// Pointer pressed on the ship: start tracking it.
    pub fn press(&mut self, pointer: Point) {
        let at = self.pointer_position(pointer);
        self.view.set_position(at);
        self.state = DragState::Dragging;
        log::debug!("drag start, length {} at {:?}", self.length, at);
    }

    /// Pointer moved while dragging. Visual only, nothing is committed.
    pub fn drag(&mut self, pointer: Point) -> Result<(), PlacementError> {
        if self.state != DragState::Dragging {
            return Err(PlacementError::NotDragging);
        }
        let at = self.pointer_position(pointer);
        self.view.set_position(at);
        Ok(())
    }

    /// Pointer released: snap to the nearest cell of `board` and commit
    /// `length` coordinates from it.
    pub fn release<C: CellView>(
        &mut self,
        pointer: Point,
        board: &Board<C>,
        audio: &AudioQueue,
    ) -> Result<&[Coord], PlacementError> {
        if self.state != DragState::Dragging {
            return Err(PlacementError::NotDragging);
        }
        self.state = DragState::Idle;
        audio.enqueue(Cue::EnterLetter);
        audio.enqueue(Cue::EnterNumber);

        let cell = board.nearest_cell(pointer).ok_or(PlacementError::EmptyGrid)?;
        let bounds = cell.bounds();
        let anchor = cell.coord();
        let rot = self.rotation_offset();
        self.view.set_position(Point::new(
            bounds.left - self.layout.snap_left + rot.x,
            bounds.top - self.layout.anchor_y + rot.y,
        ));

        let coords = derive_coordinates(anchor, self.length);
        log::debug!("ship of length {} snapped to {}", self.length, anchor);
        Ok(self.coordinates.insert(coords).as_slice())
    }

    /// Toggle between 0° and 90°. Committed coordinates are left untouched
    /// until the ship is dragged again.
    pub fn rotate(&mut self) -> Result<Rotation, PlacementError> {
        if self.state == DragState::Dragging {
            return Err(PlacementError::RotateWhileDragging);
        }
        self.rotation = self.rotation.toggled();
        self.view.set_rotation_transform(self.rotation);
        Ok(self.rotation)
    }
}

/// `length` cells starting at `anchor`, one row further down per unit.
///
/// The column is held fixed whatever the ship's rotation.
// TODO: derive along the column for 90° once the server-side coordinate
// convention for horizontal ships is settled.
pub fn derive_coordinates(anchor: Coord, length: usize) -> Vec<Coord> {
    (0..length as u32)
        .map(|i| Coord::new(anchor.row + i, anchor.col))
        .collect()
}
