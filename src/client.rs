//! Protocol client: game moves out, shot outcomes in.
//!
//! Every failure is handled here. Callers get a plain outcome and the
//! failure is logged; there is no retry and no reconnect.

use futures::StreamExt;

use crate::audio::{AudioQueue, Cue};
use crate::board::Board;
use crate::common::{Coord, ProtocolError};
use crate::protocol::{incoming_cues, outgoing_cues, PositionRequest, ShotRequest, ShotResult};
use crate::session::GameSession;
use crate::transport::{EventStream, GameTransport};
use crate::view::{CellMark, CellView, GameView};

/// Lifecycle of the client after a session exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ships are being placed; opponent board clicks are not armed.
    Placing,
    /// Placement accepted; shots may be fired.
    Playing,
    /// Torn down; the push stream is closed.
    Closed,
}

pub struct GameClient<T: GameTransport> {
    session: GameSession,
    transport: T,
    audio: AudioQueue,
    phase: Phase,
    events: Option<EventStream>,
}

impl<T: GameTransport> GameClient<T> {
    pub fn new(session: GameSession, transport: T, audio: AudioQueue) -> Self {
        Self {
            session,
            transport,
            audio,
            phase: Phase::Placing,
            events: None,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether clicks on the opponent board turn into shots.
    pub fn shots_armed(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn has_event_stream(&self) -> bool {
        self.events.is_some()
    }

    /// Send the fleet layout. On acceptance the submit control is hidden,
    /// the opponent board is armed and the push stream is opened.
    pub async fn submit_placement<V>(&mut self, positions: Vec<Vec<Coord>>, view: &mut V) -> bool
    where
        V: GameView + ?Sized,
    {
        if self.phase != Phase::Placing {
            log::warn!("placement already submitted");
            return false;
        }
        let request = PositionRequest {
            player_id: self.session.player_id().to_string(),
            position: positions,
        };
        log::debug!("sending placement {:?}", request.position);
        match self
            .transport
            .submit_position(self.session.game_id(), &request)
            .await
        {
            Ok(()) => {
                log::info!("placement accepted for game {}", self.session.game_id());
                view.hide_submit_control();
                self.audio.enqueue(Cue::NewGame);
                self.phase = Phase::Playing;
                self.open_events().await;
                true
            }
            Err(e @ ProtocolError::Status { .. }) => {
                log::warn!("Error while sending JSON. Server response: {}", e);
                false
            }
            Err(e) => {
                log::error!("Error while sending JSON: {}", e);
                false
            }
        }
    }

    async fn open_events(&mut self) {
        match self
            .transport
            .open_events(self.session.game_id(), self.session.player_id())
            .await
        {
            Ok(stream) => self.events = Some(stream),
            Err(e) => log::error!("could not open event stream: {}", e),
        }
    }

    /// Fire at `target` on the opponent board and recolor it from the answer.
    /// A failed attempt only plays the error cue.
    pub async fn fire_shot<C: CellView>(
        &mut self,
        target: Coord,
        opponent: &mut Board<C>,
    ) -> Option<ShotResult> {
        if !self.shots_armed() {
            log::debug!("shot at {} ignored, opponent board not armed", target);
            return None;
        }
        let request = ShotRequest::new(self.session.player_id(), target);
        match self.transport.fire_shot(self.session.game_id(), &request).await {
            Ok(result) => {
                log::info!("shot at {}: {:?}", target, result);
                let mark = if result.hit { CellMark::Hit } else { CellMark::Miss };
                opponent.mark(target, mark);
                self.audio.enqueue_all(outgoing_cues(&result));
                Some(result)
            }
            Err(e) => {
                log::warn!("Error while sending JSON: {}", e);
                self.audio.enqueue(Cue::Error);
                None
            }
        }
    }

    /// Apply an opponent shot to our board.
    pub fn handle_push_event<C: CellView>(&self, result: &ShotResult, own: &mut Board<C>) {
        log::info!("event received: {:?}", result);
        self.audio.enqueue_all(incoming_cues(result));
        match result.shot {
            Some(coord) => {
                if !own.mark(coord, CellMark::Struck) {
                    log::warn!("no cell at {} on own board", coord);
                }
            }
            None => log::warn!("event carries no shot coordinate"),
        }
    }

    /// Next shot pushed by the server. Never resolves while no stream is
    /// open. A malformed message is skipped; a failed or finished stream is
    /// closed and not reopened.
    pub async fn next_push_event(&mut self) -> ShotResult {
        loop {
            let Some(stream) = self.events.as_mut() else {
                return std::future::pending().await;
            };
            let item = stream.next().await;
            match item {
                Some(Ok(result)) => return result,
                Some(Err(ProtocolError::Decode(e))) => {
                    log::warn!("skipping malformed event: {}", e);
                }
                Some(Err(e)) => {
                    log::error!("event stream failed: {}", e);
                    self.events = None;
                }
                None => {
                    log::info!("event stream ended");
                    self.events = None;
                }
            }
        }
    }

    /// Close the push stream for page teardown.
    pub fn close(&mut self) {
        if self.events.take().is_some() {
            log::debug!("event stream closed");
        }
        self.phase = Phase::Closed;
    }
}
