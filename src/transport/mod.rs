use futures::stream::BoxStream;

use crate::common::ProtocolError;
use crate::protocol::{PositionRequest, SessionIds, ShotRequest, ShotResult};

/// Shot outcomes pushed by the server for one game session.
pub type EventStream = BoxStream<'static, Result<ShotResult, ProtocolError>>;

/// Server endpoints used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    NewGame,
    JoinGame,
    Position,
    Shot,
    Events,
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::NewGame => "new_game",
            Endpoint::JoinGame => "join_game",
            Endpoint::Position => "position",
            Endpoint::Shot => "shot",
            Endpoint::Events => "events",
        }
    }
}

/// Request/response calls plus the push stream of the game server.
#[async_trait::async_trait]
pub trait GameTransport: Send + Sync {
    async fn new_game(&self) -> Result<SessionIds, ProtocolError>;
    async fn join_game(&self, game_id: &str) -> Result<SessionIds, ProtocolError>;
    async fn submit_position(
        &self,
        game_id: &str,
        request: &PositionRequest,
    ) -> Result<(), ProtocolError>;
    async fn fire_shot(
        &self,
        game_id: &str,
        request: &ShotRequest,
    ) -> Result<ShotResult, ProtocolError>;
    async fn open_events(&self, game_id: &str, player_id: &str)
        -> Result<EventStream, ProtocolError>;
}

pub mod http;
pub mod in_memory;
