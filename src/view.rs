//! Seams towards the rendering layer.
//!
//! The placement state machine and the protocol client only ever talk to
//! these traits. A browser front end would implement them over DOM elements;
//! the headless implementations below record what they were asked to do and
//! back the terminal binary and the tests.

use crate::common::Coord;
use crate::config::BOARD_SIZE;
use crate::ship::Rotation;

/// Screen-space position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Rendered bounds of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// How a cell is recolored after a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMark {
    /// Our shot hit an enemy ship (red).
    Hit,
    /// Our shot landed in water (blue).
    Miss,
    /// The opponent fired at this cell of our board (black, raised).
    Struck,
}

/// Visual handle of a draggable ship.
pub trait ViewHandle {
    /// Current rendered bounds, rotation applied.
    fn bounds(&self) -> Rect;
    fn set_position(&mut self, at: Point);
    fn set_rotation_transform(&mut self, rotation: Rotation);
}

/// One rendered board cell.
pub trait CellView {
    fn coord(&self) -> Coord;
    fn bounds(&self) -> Rect;
    fn paint(&mut self, mark: CellMark);
}

/// Page chrome outside the two boards.
pub trait GameView {
    fn show_invite(&mut self, url: &str);
    fn hide_submit_control(&mut self);
}

/// Ship view that keeps its state in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessShip {
    width: f64,
    height: f64,
    position: Point,
    rotation: Rotation,
    history: Vec<Point>,
}

impl HeadlessShip {
    /// A ship graphic of `width` × `height` pixels in its unrotated pose.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            position: Point::default(),
            rotation: Rotation::Deg0,
            history: Vec::new(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Every position set so far, oldest first.
    pub fn history(&self) -> &[Point] {
        &self.history
    }
}

impl ViewHandle for HeadlessShip {
    fn bounds(&self) -> Rect {
        match self.rotation {
            Rotation::Deg0 => Rect::new(self.position.x, self.position.y, self.width, self.height),
            Rotation::Deg90 => Rect::new(self.position.x, self.position.y, self.height, self.width),
        }
    }

    fn set_position(&mut self, at: Point) {
        self.position = at;
        self.history.push(at);
    }

    fn set_rotation_transform(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }
}

/// Board cell that remembers the last mark painted on it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessCell {
    coord: Coord,
    bounds: Rect,
    mark: Option<CellMark>,
}

impl HeadlessCell {
    pub fn new(coord: Coord, bounds: Rect) -> Self {
        Self {
            coord,
            bounds,
            mark: None,
        }
    }

    /// Square `BOARD_SIZE` × `BOARD_SIZE` grid in row-major order, top-left
    /// cell at `origin`, each cell `pitch` pixels wide.
    pub fn grid(origin: Point, pitch: f64) -> Vec<HeadlessCell> {
        let mut cells = Vec::with_capacity((BOARD_SIZE * BOARD_SIZE) as usize);
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let left = origin.x + f64::from(col) * pitch;
                let top = origin.y + f64::from(row) * pitch;
                cells.push(HeadlessCell::new(
                    Coord::new(row, col),
                    Rect::new(left, top, pitch, pitch),
                ));
            }
        }
        cells
    }

    pub fn mark(&self) -> Option<CellMark> {
        self.mark
    }
}

impl CellView for HeadlessCell {
    fn coord(&self) -> Coord {
        self.coord
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn paint(&mut self, mark: CellMark) {
        self.mark = Some(mark);
    }
}

/// Page chrome kept in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessPage {
    invite: Option<String>,
    submit_visible: bool,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self {
            invite: None,
            submit_visible: true,
        }
    }

    pub fn invite(&self) -> Option<&str> {
        self.invite.as_deref()
    }

    pub fn submit_visible(&self) -> bool {
        self.submit_visible
    }
}

impl Default for HeadlessPage {
    fn default() -> Self {
        Self::new()
    }
}

impl GameView for HeadlessPage {
    fn show_invite(&mut self, url: &str) {
        log::info!("Player B URL = {}", url);
        self.invite = Some(url.to_string());
    }

    fn hide_submit_control(&mut self) {
        self.submit_visible = false;
    }
}
