use battleship_client::{
    AudioQueue, Board, Coord, Cue, DragState, Fleet, HeadlessCell, HeadlessShip, LayoutOffsets,
    PlacementError, Point, PointerEvent, Rotation, FLEET,
};

const ORIGIN: Point = Point::new(600.0, 100.0);
const PITCH: f64 = 50.0;

fn center(row: u32, col: u32) -> Point {
    Point::new(
        ORIGIN.x + f64::from(col) * PITCH + PITCH / 2.0,
        ORIGIN.y + f64::from(row) * PITCH + PITCH / 2.0,
    )
}

fn fleet(audio: AudioQueue) -> Fleet<HeadlessShip> {
    let views = FLEET
        .iter()
        .map(|&len| HeadlessShip::new(len as f64 * PITCH, PITCH));
    Fleet::standard(views, LayoutOffsets::default(), audio)
}

fn place(fleet: &mut Fleet<HeadlessShip>, board: &Board<HeadlessCell>, ship: usize, at: Point) {
    fleet
        .handle(PointerEvent::Down { ship, at }, board)
        .unwrap();
    fleet.handle(PointerEvent::Up(at), board).unwrap();
}

#[test]
fn standard_fleet_follows_the_page_order() {
    let (audio, _rx) = AudioQueue::unbounded();
    let fleet = fleet(audio);
    let lengths: Vec<usize> = fleet.ships().iter().map(|s| s.length()).collect();
    assert_eq!(lengths, vec![2, 3, 3, 4, 5]);
    assert!(!fleet.is_complete());
}

#[test]
fn moves_only_reach_the_dragged_ship() {
    let (audio, _rx) = AudioQueue::unbounded();
    let board = Board::new(HeadlessCell::grid(ORIGIN, PITCH));
    let mut fleet = fleet(audio);

    // No drag yet: moves and releases go nowhere.
    fleet.handle(PointerEvent::Move(center(4, 4)), &board).unwrap();
    fleet.handle(PointerEvent::Up(center(4, 4)), &board).unwrap();
    assert!(fleet.ships().iter().all(|s| s.view().history().is_empty()));

    fleet
        .handle(PointerEvent::Down { ship: 3, at: center(0, 0) }, &board)
        .unwrap();
    assert_eq!(fleet.dragging(), Some(3));
    fleet.handle(PointerEvent::Move(center(1, 1)), &board).unwrap();
    fleet.handle(PointerEvent::Move(center(2, 2)), &board).unwrap();
    assert_eq!(fleet.ship(3).unwrap().view().history().len(), 3);
    assert!(fleet.ship(0).unwrap().view().history().is_empty());

    fleet.handle(PointerEvent::Up(center(2, 2)), &board).unwrap();
    assert_eq!(fleet.dragging(), None);
    assert_eq!(fleet.ship(3).unwrap().state(), DragState::Idle);
    assert_eq!(
        fleet.ship(3).unwrap().coordinates().unwrap(),
        &[
            Coord::new(2, 2),
            Coord::new(3, 2),
            Coord::new(4, 2),
            Coord::new(5, 2)
        ]
    );

    // Listeners are gone after the release.
    fleet.handle(PointerEvent::Move(center(8, 8)), &board).unwrap();
    assert_eq!(fleet.ship(3).unwrap().view().history().len(), 4);
}

#[test]
fn second_press_during_a_drag_is_rejected() {
    let (audio, _rx) = AudioQueue::unbounded();
    let board = Board::new(HeadlessCell::grid(ORIGIN, PITCH));
    let mut fleet = fleet(audio);
    fleet
        .handle(PointerEvent::Down { ship: 0, at: center(0, 0) }, &board)
        .unwrap();
    let err = fleet
        .handle(PointerEvent::Down { ship: 1, at: center(0, 0) }, &board)
        .unwrap_err();
    assert_eq!(err, PlacementError::AlreadyDragging(0));
    assert_eq!(
        fleet
            .handle(PointerEvent::DoubleClick { ship: 0 }, &board)
            .unwrap_err(),
        PlacementError::RotateWhileDragging
    );
}

#[test]
fn unknown_ship_is_reported() {
    let (audio, _rx) = AudioQueue::unbounded();
    let board = Board::new(HeadlessCell::grid(ORIGIN, PITCH));
    let mut fleet = fleet(audio);
    assert_eq!(
        fleet
            .handle(PointerEvent::Down { ship: 7, at: center(0, 0) }, &board)
            .unwrap_err(),
        PlacementError::UnknownShip(7)
    );
    assert_eq!(
        fleet
            .handle(PointerEvent::DoubleClick { ship: 5 }, &board)
            .unwrap_err(),
        PlacementError::UnknownShip(5)
    );
}

#[test]
fn double_click_rotates_the_ship() {
    let (audio, _rx) = AudioQueue::unbounded();
    let board = Board::new(HeadlessCell::grid(ORIGIN, PITCH));
    let mut fleet = fleet(audio);
    fleet
        .handle(PointerEvent::DoubleClick { ship: 2 }, &board)
        .unwrap();
    assert_eq!(fleet.ship(2).unwrap().rotation(), Rotation::Deg90);
    assert_eq!(fleet.ship(2).unwrap().view().rotation(), Rotation::Deg90);
}

#[test]
fn positions_require_every_ship() {
    let (audio, mut rx) = AudioQueue::unbounded();
    let board = Board::new(HeadlessCell::grid(ORIGIN, PITCH));
    let mut fleet = fleet(audio);
    place(&mut fleet, &board, 0, center(0, 0));
    place(&mut fleet, &board, 1, center(0, 2));
    assert_eq!(
        fleet.positions().unwrap_err(),
        PlacementError::NotPlaced { ship: 2 }
    );

    place(&mut fleet, &board, 2, center(0, 4));
    place(&mut fleet, &board, 3, center(0, 6));
    place(&mut fleet, &board, 4, center(0, 8));
    assert!(fleet.is_complete());
    let positions = fleet.positions().unwrap();
    assert_eq!(positions.len(), 5);
    for (ship, coords) in positions.iter().enumerate() {
        assert_eq!(coords.len(), FLEET[ship]);
        assert_eq!(coords[0], Coord::new(0, 2 * ship as u32));
    }

    let mut cues = Vec::new();
    while let Ok(cue) = rx.try_recv() {
        cues.push(cue);
    }
    assert_eq!(cues.len(), 10);
    assert!(cues
        .chunks(2)
        .all(|pair| pair == [Cue::EnterLetter, Cue::EnterNumber]));
}
