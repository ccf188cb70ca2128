//! Scripted in-process stand-in for the game server.
//!
//! Every call is recorded. Responses default to a plausible happy path and
//! can be overridden per endpoint; push events are fed through an
//! [`EventFeed`].

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::channel::mpsc;
use futures::StreamExt;

use crate::common::ProtocolError;
use crate::protocol::{PositionRequest, SessionIds, ShotRequest, ShotResult};
use crate::transport::{Endpoint, EventStream, GameTransport};

/// A request as the server received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    NewGame,
    JoinGame(String),
    Position {
        game_id: String,
        request: PositionRequest,
    },
    Shot {
        game_id: String,
        request: ShotRequest,
    },
    Events {
        game_id: String,
        player_id: String,
    },
}

/// Scripted failure of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The server answers with this non-2xx status.
    Status(u16),
    /// The request never reaches the server.
    Unreachable,
}

impl Fault {
    fn into_error(self, endpoint: Endpoint) -> ProtocolError {
        match self {
            Fault::Status(status) => ProtocolError::Status {
                endpoint: endpoint.name(),
                status,
            },
            Fault::Unreachable => {
                ProtocolError::Rejected(format!("{} unreachable", endpoint.name()))
            }
        }
    }
}

type EventSender = mpsc::UnboundedSender<Result<ShotResult, ProtocolError>>;

#[derive(Default)]
struct State {
    requests: Vec<Request>,
    faults: HashMap<Endpoint, VecDeque<Fault>>,
    shot_results: VecDeque<ShotResult>,
    events: Option<EventSender>,
}

#[derive(Clone)]
pub struct InMemoryTransport {
    game_id: String,
    state: Arc<Mutex<State>>,
}

impl InMemoryTransport {
    /// Server that hands out game `game_id`. A new game is answered with
    /// player `player-a`, a join with player `player-b`.
    pub fn new(game_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make the next call to `endpoint` fail with `fault`.
    pub fn fail_next(&self, endpoint: Endpoint, fault: Fault) {
        self.lock().faults.entry(endpoint).or_default().push_back(fault);
    }

    /// Queue the answer to the next `/shot` call. Without one, shots miss.
    pub fn queue_shot_result(&self, result: ShotResult) {
        self.lock().shot_results.push_back(result);
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    /// Handle that pushes events into the currently open stream.
    pub fn event_feed(&self) -> EventFeed {
        EventFeed {
            state: self.state.clone(),
        }
    }

    fn begin(&self, endpoint: Endpoint, request: Request) -> Result<(), ProtocolError> {
        let mut state = self.lock();
        state.requests.push(request);
        match state.faults.get_mut(&endpoint).and_then(VecDeque::pop_front) {
            Some(fault) => Err(fault.into_error(endpoint)),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl GameTransport for InMemoryTransport {
    async fn new_game(&self) -> Result<SessionIds, ProtocolError> {
        self.begin(Endpoint::NewGame, Request::NewGame)?;
        Ok(SessionIds {
            game_id: self.game_id.clone(),
            player_id: "player-a".to_string(),
        })
    }

    async fn join_game(&self, game_id: &str) -> Result<SessionIds, ProtocolError> {
        self.begin(Endpoint::JoinGame, Request::JoinGame(game_id.to_string()))?;
        if game_id != self.game_id {
            return Err(Fault::Status(404).into_error(Endpoint::JoinGame));
        }
        Ok(SessionIds {
            game_id: game_id.to_string(),
            player_id: "player-b".to_string(),
        })
    }

    async fn submit_position(
        &self,
        game_id: &str,
        request: &PositionRequest,
    ) -> Result<(), ProtocolError> {
        self.begin(
            Endpoint::Position,
            Request::Position {
                game_id: game_id.to_string(),
                request: request.clone(),
            },
        )
    }

    async fn fire_shot(
        &self,
        game_id: &str,
        request: &ShotRequest,
    ) -> Result<ShotResult, ProtocolError> {
        self.begin(
            Endpoint::Shot,
            Request::Shot {
                game_id: game_id.to_string(),
                request: request.clone(),
            },
        )?;
        let queued = self.lock().shot_results.pop_front();
        Ok(queued.unwrap_or(ShotResult {
            hit: false,
            sunk: false,
            length: 0,
            fleet_destroyed: false,
            shot: Some([request.x, request.y].into()),
        }))
    }

    async fn open_events(
        &self,
        game_id: &str,
        player_id: &str,
    ) -> Result<EventStream, ProtocolError> {
        self.begin(
            Endpoint::Events,
            Request::Events {
                game_id: game_id.to_string(),
                player_id: player_id.to_string(),
            },
        )?;
        let (tx, rx) = mpsc::unbounded();
        self.lock().events = Some(tx);
        Ok(rx.boxed())
    }
}

/// Server side of the push stream.
#[derive(Clone)]
pub struct EventFeed {
    state: Arc<Mutex<State>>,
}

impl EventFeed {
    fn send(&self, item: Result<ShotResult, ProtocolError>) -> bool {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match &state.events {
            Some(tx) => tx.unbounded_send(item).is_ok(),
            None => false,
        }
    }

    /// Deliver an opponent shot. Returns `false` if no stream is open.
    pub fn push(&self, result: ShotResult) -> bool {
        self.send(Ok(result))
    }

    /// Deliver a stream-level error.
    pub fn fail(&self, error: ProtocolError) -> bool {
        self.send(Err(error))
    }

    /// End the stream as if the server hung up.
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.events = None;
    }

    /// Whether the client still holds the stream.
    pub fn is_open(&self) -> bool {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.events.as_ref().is_some_and(|tx| !tx.is_closed())
    }
}
