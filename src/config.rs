/// Rows and columns of each board.
pub const BOARD_SIZE: u32 = 10;
/// Number of ships in a fleet.
pub const NUM_SHIPS: usize = 5;
/// Ship lengths in the order the placement page builds them.
pub const FLEET: [usize; NUM_SHIPS] = [2, 3, 3, 4, 5];

pub const DEFAULT_BACKEND_URL: &str = "http://battleship.jackenbaer.com:5000";
pub const DEFAULT_FRONTEND_URL: &str = "http://battleship.jackenbaer.com:80";

/// Pixel constants of the placement page layout.
///
/// While dragging, a ship is drawn at
/// `(x - pointer_left + rot.x, y - anchor_x - anchor_y + rot.y)`; on release
/// it snaps to `(cell.left - snap_left + rot.x, cell.top - anchor_y + rot.y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOffsets {
    pub pointer_left: f64,
    pub anchor_x: f64,
    pub anchor_y: f64,
    pub snap_left: f64,
}

impl Default for LayoutOffsets {
    fn default() -> Self {
        Self {
            pointer_left: 568.0,
            anchor_x: 25.0,
            anchor_y: 8.0,
            snap_left: 543.0,
        }
    }
}

/// Endpoints and layout used by one client instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the game server, e.g. `http://127.0.0.1:5000`.
    pub backend_url: String,
    /// Origin embedded into invite links for the second player.
    pub frontend_url: String,
    pub layout: LayoutOffsets,
}

impl ClientConfig {
    pub fn new(backend_url: impl Into<String>, frontend_url: impl Into<String>) -> Self {
        Self {
            backend_url: trim_slash(backend_url.into()),
            frontend_url: trim_slash(frontend_url.into()),
            layout: LayoutOffsets::default(),
        }
    }

    pub fn with_layout(mut self, layout: LayoutOffsets) -> Self {
        self.layout = layout;
        self
    }

    /// Link the second player opens to join `game_id`.
    pub fn invite_link(&self, game_id: &str) -> String {
        format!("{}/{}", self.frontend_url, game_id)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL, DEFAULT_FRONTEND_URL)
    }
}

fn trim_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
