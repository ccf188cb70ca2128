//! Client side of a two-player networked battleship game: drag-and-drop
//! fleet placement, a sequential audio cue scheduler, and the HTTP/SSE
//! protocol client that ties both to the game server.

pub mod app;
pub mod audio;
pub mod board;
pub mod client;
mod common;
pub mod config;
pub mod fleet;
mod logging;
pub mod protocol;
pub mod session;
pub mod ship;
pub mod sse;
pub mod transport;
pub mod view;

pub use app::{App, UiEvent};
pub use audio::{AudioQueue, AudioScheduler, AudioSink, Cue, LoggingSink, SchedulerHandle};
pub use board::Board;
pub use client::{GameClient, Phase};
pub use common::*;
pub use config::*;
pub use fleet::{Fleet, PointerEvent};
pub use logging::init_logging;
pub use protocol::*;
pub use session::{bootstrap, GameSession, Route};
pub use ship::{derive_coordinates, DragState, Rotation, Ship};
pub use sse::SseDecoder;
pub use transport::http::HttpTransport;
pub use transport::in_memory::{EventFeed, Fault, InMemoryTransport};
pub use transport::{Endpoint, EventStream, GameTransport};
pub use view::*;
