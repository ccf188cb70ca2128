use std::time::Duration;

use battleship_client::transport::in_memory::Request;
use battleship_client::{
    App, AudioQueue, Board, CellMark, Coord, Cue, Fleet, GameClient, HeadlessCell, HeadlessPage,
    HeadlessShip, InMemoryTransport, LayoutOffsets, Point, PointerEvent, SessionIds, ShotResult,
    UiEvent, FLEET,
};
use tokio::sync::mpsc;

const PITCH: f64 = 50.0;
const OWN: Point = Point::new(650.0, 100.0);
const OPPONENT: Point = Point::new(50.0, 100.0);

type TestApp = App<InMemoryTransport, HeadlessShip, HeadlessCell, HeadlessPage>;

fn center(origin: Point, row: u32, col: u32) -> Point {
    Point::new(
        origin.x + f64::from(col) * PITCH + PITCH / 2.0,
        origin.y + f64::from(row) * PITCH + PITCH / 2.0,
    )
}

fn app(transport: &InMemoryTransport, audio: AudioQueue) -> TestApp {
    let views = FLEET
        .iter()
        .map(|&len| HeadlessShip::new(len as f64 * PITCH, PITCH));
    let fleet = Fleet::standard(views, LayoutOffsets::default(), audio.clone());
    let session = SessionIds {
        game_id: "g1".to_string(),
        player_id: "p1".to_string(),
    }
    .into();
    let client = GameClient::new(session, transport.clone(), audio);
    App::new(
        fleet,
        Board::new(HeadlessCell::grid(OWN, PITCH)),
        Board::new(HeadlessCell::grid(OPPONENT, PITCH)),
        client,
        HeadlessPage::new(),
    )
}

async fn place_fleet(tx: &mpsc::Sender<UiEvent>) {
    for ship in 0..FLEET.len() {
        let at = center(OWN, 0, 2 * ship as u32);
        tx.send(UiEvent::Pointer(PointerEvent::Down { ship, at }))
            .await
            .unwrap();
        tx.send(UiEvent::Pointer(PointerEvent::Up(at))).await.unwrap();
    }
}

fn drain(rx: &mut mpsc::UnboundedReceiver<Cue>) -> Vec<Cue> {
    let mut cues = Vec::new();
    while let Ok(cue) = rx.try_recv() {
        cues.push(cue);
    }
    cues
}

#[tokio::test(start_paused = true)]
async fn full_round_trip_until_teardown() {
    let transport = InMemoryTransport::new("g1");
    let (audio, mut cues) = AudioQueue::unbounded();
    let (tx, rx) = mpsc::channel(32);
    let running = tokio::spawn(app(&transport, audio).run(rx));

    // Clicking the opponent board before placement does nothing.
    tx.send(UiEvent::OpponentCellClicked(Coord::new(5, 5)))
        .await
        .unwrap();
    place_fleet(&tx).await;
    tx.send(UiEvent::SubmitClicked).await.unwrap();

    let feed = transport.event_feed();
    while !feed.is_open() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    assert!(feed.push(ShotResult {
        hit: true,
        sunk: false,
        length: 0,
        fleet_destroyed: false,
        shot: Some(Coord::new(0, 0)),
    }));
    tokio::time::sleep(Duration::from_millis(10)).await;

    tx.send(UiEvent::OpponentCellClicked(Coord::new(4, 4)))
        .await
        .unwrap();
    tx.send(UiEvent::Teardown).await.unwrap();

    let app = running.await.unwrap();
    assert!(!app.page().submit_visible());
    assert!(!feed.is_open());
    assert_eq!(
        app.own_board().cell(Coord::new(0, 0)).unwrap().mark(),
        Some(CellMark::Struck)
    );
    assert_eq!(
        app.opponent_board().cell(Coord::new(4, 4)).unwrap().mark(),
        Some(CellMark::Miss)
    );
    assert_eq!(app.opponent_board().cell(Coord::new(5, 5)).unwrap().mark(), None);

    let requests = transport.requests();
    assert!(matches!(requests[0], Request::Position { .. }));
    assert!(matches!(requests[1], Request::Events { .. }));
    assert!(matches!(requests[2], Request::Shot { .. }));
    assert_eq!(requests.len(), 3);

    let mut expected = Vec::new();
    for _ in 0..FLEET.len() {
        expected.extend([Cue::EnterLetter, Cue::EnterNumber]);
    }
    expected.extend([Cue::NewGame, Cue::Shot, Cue::Hit, Cue::OwnHit, Cue::Shot, Cue::Miss]);
    assert_eq!(drain(&mut cues), expected);
}

#[tokio::test]
async fn incomplete_fleet_is_not_submitted() {
    let transport = InMemoryTransport::new("g1");
    let (audio, _cues) = AudioQueue::unbounded();
    let mut app = app(&transport, audio);

    let at = center(OWN, 3, 3);
    assert!(app.handle(UiEvent::Pointer(PointerEvent::Down { ship: 0, at })).await);
    assert!(app.handle(UiEvent::Pointer(PointerEvent::Up(at))).await);
    assert!(app.handle(UiEvent::SubmitClicked).await);
    assert!(transport.requests().is_empty());
    assert!(app.page().submit_visible());
    assert!(!app.fleet().is_complete());
}

#[tokio::test]
async fn closing_the_ui_channel_stops_the_loop() {
    let transport = InMemoryTransport::new("g1");
    let (audio, _cues) = AudioQueue::unbounded();
    let (tx, rx) = mpsc::channel(32);
    place_fleet(&tx).await;
    tx.send(UiEvent::SubmitClicked).await.unwrap();
    drop(tx);

    let app = app(&transport, audio).run(rx).await;
    assert!(!app.client().has_event_stream());
    assert!(!app.client().shots_armed());
    assert!(!transport.event_feed().is_open());
}
