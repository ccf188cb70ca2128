//! Navigation routing and creation of the per-page game session.

use crate::config::ClientConfig;
use crate::protocol::SessionIds;
use crate::transport::GameTransport;
use crate::view::GameView;

/// What the page was opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Empty path: create a game and invite a second player.
    NewGame,
    /// First path segment names the game to join.
    Join(String),
    /// Any other path; no request is made.
    Unknown(String),
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        if path.is_empty() || path == "/" {
            return Route::NewGame;
        }
        match path.split('/').nth(1) {
            Some(segment) if !segment.is_empty() => Route::Join(segment.to_string()),
            _ => Route::Unknown(path.to_string()),
        }
    }
}

/// Identifiers that scope every request of this player in this game.
/// Created once per page and never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    game_id: String,
    player_id: String,
}

impl GameSession {
    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }
}

impl From<SessionIds> for GameSession {
    fn from(ids: SessionIds) -> Self {
        Self {
            game_id: ids.game_id,
            player_id: ids.player_id,
        }
    }
}

/// Issue the one session request `route` calls for.
///
/// A new game surfaces its invite link on `view`. Failures are logged and
/// leave the page without a session.
pub async fn bootstrap<T, V>(
    route: &Route,
    transport: &T,
    view: &mut V,
    config: &ClientConfig,
) -> Option<GameSession>
where
    T: GameTransport + ?Sized,
    V: GameView + ?Sized,
{
    match route {
        Route::NewGame => match transport.new_game().await {
            Ok(ids) => {
                log::info!("created game {}", ids.game_id);
                view.show_invite(&config.invite_link(&ids.game_id));
                Some(ids.into())
            }
            Err(e) => {
                log::error!("An error occurred: {}", e);
                None
            }
        },
        Route::Join(game_id) => match transport.join_game(game_id).await {
            Ok(ids) => {
                log::info!("joined game {}", ids.game_id);
                Some(ids.into())
            }
            Err(e) => {
                log::error!("An error occurred: {}", e);
                None
            }
        },
        Route::Unknown(path) => {
            log::warn!("unknown path provided {}", path);
            None
        }
    }
}
