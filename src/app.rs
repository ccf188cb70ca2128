//! Page glue: one cooperative loop over UI input and the push stream.

use tokio::sync::mpsc;

use crate::board::Board;
use crate::client::GameClient;
use crate::common::Coord;
use crate::fleet::{Fleet, PointerEvent};
use crate::protocol::ShotResult;
use crate::transport::GameTransport;
use crate::view::{CellView, GameView, ViewHandle};

/// Input delivered by the page.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Pointer(PointerEvent),
    /// The "finished placement" control was activated.
    SubmitClicked,
    OpponentCellClicked(Coord),
    /// The page is going away.
    Teardown,
}

enum Step {
    Ui(Option<UiEvent>),
    Push(ShotResult),
}

pub struct App<T, V, C, P>
where
    T: GameTransport,
    V: ViewHandle,
    C: CellView,
    P: GameView,
{
    fleet: Fleet<V>,
    own_board: Board<C>,
    opponent_board: Board<C>,
    client: GameClient<T>,
    page: P,
}

impl<T, V, C, P> App<T, V, C, P>
where
    T: GameTransport,
    V: ViewHandle,
    C: CellView,
    P: GameView,
{
    pub fn new(
        fleet: Fleet<V>,
        own_board: Board<C>,
        opponent_board: Board<C>,
        client: GameClient<T>,
        page: P,
    ) -> Self {
        Self {
            fleet,
            own_board,
            opponent_board,
            client,
            page,
        }
    }

    pub fn fleet(&self) -> &Fleet<V> {
        &self.fleet
    }

    pub fn own_board(&self) -> &Board<C> {
        &self.own_board
    }

    pub fn opponent_board(&self) -> &Board<C> {
        &self.opponent_board
    }

    pub fn client(&self) -> &GameClient<T> {
        &self.client
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Handle one UI event. Returns `false` once the page is torn down.
    pub async fn handle(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::Pointer(pointer) => {
                if let Err(e) = self.fleet.handle(pointer, &self.own_board) {
                    log::warn!("pointer event {:?} rejected: {}", pointer, e);
                }
            }
            UiEvent::SubmitClicked => match self.fleet.positions() {
                Ok(positions) => {
                    self.client.submit_placement(positions, &mut self.page).await;
                }
                Err(e) => log::warn!("cannot submit placement: {}", e),
            },
            UiEvent::OpponentCellClicked(target) => {
                self.client.fire_shot(target, &mut self.opponent_board).await;
            }
            UiEvent::Teardown => {
                self.client.close();
                return false;
            }
        }
        true
    }

    pub fn handle_push(&mut self, result: &ShotResult) {
        self.client.handle_push_event(result, &mut self.own_board);
    }

    /// Drive the page until teardown or until the UI channel closes. The push
    /// stream is closed on the way out.
    pub async fn run(mut self, mut ui: mpsc::Receiver<UiEvent>) -> Self {
        loop {
            let step = tokio::select! {
                event = ui.recv() => Step::Ui(event),
                result = self.client.next_push_event() => Step::Push(result),
            };
            match step {
                Step::Ui(Some(event)) => {
                    if !self.handle(event).await {
                        break;
                    }
                }
                Step::Ui(None) => {
                    self.client.close();
                    break;
                }
                Step::Push(result) => self.handle_push(&result),
            }
        }
        self
    }
}
