use std::collections::VecDeque;

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};
use reqwest::{header, Client, Response};

use crate::common::ProtocolError;
use crate::protocol::{PositionRequest, SessionIds, ShotRequest, ShotResult};
use crate::sse::SseDecoder;
use crate::transport::{Endpoint, EventStream, GameTransport};

/// JSON-over-HTTP access to the game server. No timeouts and no retries.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// `base_url` is the server origin, e.g. `http://127.0.0.1:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn check(endpoint: Endpoint, response: Response) -> Result<Response, ProtocolError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ProtocolError::Status {
            endpoint: endpoint.name(),
            status: status.as_u16(),
        })
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    endpoint: Endpoint,
    response: Response,
) -> Result<T, ProtocolError> {
    let body = check(endpoint, response)?.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait::async_trait]
impl GameTransport for HttpTransport {
    async fn new_game(&self) -> Result<SessionIds, ProtocolError> {
        let response = self.client.get(self.url("/new_game/")).send().await?;
        decode(Endpoint::NewGame, response).await
    }

    async fn join_game(&self, game_id: &str) -> Result<SessionIds, ProtocolError> {
        let response = self
            .client
            .get(self.url(&format!("/join_game/{}", game_id)))
            .send()
            .await?;
        decode(Endpoint::JoinGame, response).await
    }

    async fn submit_position(
        &self,
        game_id: &str,
        request: &PositionRequest,
    ) -> Result<(), ProtocolError> {
        let response = self
            .client
            .post(self.url(&format!("/position/{}", game_id)))
            .json(request)
            .send()
            .await?;
        check(Endpoint::Position, response).map(|_| ())
    }

    async fn fire_shot(
        &self,
        game_id: &str,
        request: &ShotRequest,
    ) -> Result<ShotResult, ProtocolError> {
        let response = self
            .client
            .post(self.url(&format!("/shot/{}", game_id)))
            .json(request)
            .send()
            .await?;
        decode(Endpoint::Shot, response).await
    }

    async fn open_events(
        &self,
        game_id: &str,
        player_id: &str,
    ) -> Result<EventStream, ProtocolError> {
        let response = self
            .client
            .get(self.url(&format!("/events/{}/{}", game_id, player_id)))
            .header(header::ACCEPT, "text/event-stream")
            .send()
            .await?;
        let response = check(Endpoint::Events, response)?;
        Ok(decode_event_stream(response.bytes_stream()))
    }
}

/// Turn a raw `text/event-stream` body into decoded shot results.
///
/// A message that is not valid JSON yields a `Decode` error and the stream
/// carries on; a transport error is yielded as is. The stream ends with the
/// body.
pub fn decode_event_stream<S, E>(body: S) -> EventStream
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Send + 'static,
    ProtocolError: From<E>,
{
    let state = (Box::pin(body), SseDecoder::new(), VecDeque::<String>::new());
    stream::unfold(state, |(mut body, mut decoder, mut ready)| async move {
        loop {
            if let Some(data) = ready.pop_front() {
                let item = serde_json::from_str::<ShotResult>(&data).map_err(ProtocolError::Decode);
                return Some((item, (body, decoder, ready)));
            }
            match body.next().await {
                Some(Ok(chunk)) => ready.extend(decoder.push(&chunk)),
                Some(Err(e)) => return Some((Err(ProtocolError::from(e)), (body, decoder, ready))),
                None => return None,
            }
        }
    })
    .boxed()
}
