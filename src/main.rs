use std::time::Duration;

use battleship_client::{
    bootstrap, init_logging, App, AudioScheduler, Board, CellMark, ClientConfig, Coord, Fleet,
    GameClient, HeadlessCell, HeadlessPage, HeadlessShip, HttpTransport, LoggingSink, Point,
    PointerEvent, Route, UiEvent, BOARD_SIZE, DEFAULT_BACKEND_URL, DEFAULT_FRONTEND_URL, FLEET,
};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Pixel pitch of the headless boards.
const PITCH: f64 = 50.0;
const OPPONENT_ORIGIN: Point = Point::new(50.0, 100.0);
const OWN_ORIGIN: Point = Point::new(650.0, 100.0);

#[derive(Parser)]
#[command(author, version, about = "Headless terminal client for the battleship server", long_about = None)]
struct Cli {
    #[arg(long, default_value = DEFAULT_BACKEND_URL)]
    backend: String,
    #[arg(long, default_value = DEFAULT_FRONTEND_URL)]
    frontend: String,
    /// Navigation path: `/` creates a game, `/<game_id>` joins one.
    #[arg(long, default_value = "/")]
    path: String,
    /// How long each audio cue is held, in milliseconds.
    #[arg(long, default_value_t = 400)]
    cue_ms: u64,
}

fn cell_center(origin: Point, row: u32, col: u32) -> Point {
    Point::new(
        origin.x + f64::from(col) * PITCH + PITCH / 2.0,
        origin.y + f64::from(row) * PITCH + PITCH / 2.0,
    )
}

fn parse_target(line: &str) -> Option<Coord> {
    let mut parts = line.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() || row >= BOARD_SIZE || col >= BOARD_SIZE {
        return None;
    }
    Some(Coord::new(row, col))
}

async fn read_shots(tx: mpsc::Sender<UiEvent>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Enter shots as `row col` (0-{}), end with Ctrl-D.", BOARD_SIZE - 1);
    while let Some(line) = lines.next_line().await? {
        match parse_target(&line) {
            Some(target) => tx.send(UiEvent::OpponentCellClicked(target)).await?,
            None if line.trim().is_empty() => {}
            None => eprintln!("Invalid target: {}", line.trim()),
        }
    }
    tx.send(UiEvent::Teardown).await?;
    Ok(())
}

fn print_board(title: &str, board: &Board<HeadlessCell>, ships: &[Coord]) {
    println!("{}", title);
    print!("   ");
    for c in 0..BOARD_SIZE {
        print!(" {}", c);
    }
    println!();
    for r in 0..BOARD_SIZE {
        print!("{:2} ", r);
        for c in 0..BOARD_SIZE {
            let coord = Coord::new(r, c);
            let ch = match board.cell(coord).and_then(HeadlessCell::mark) {
                Some(CellMark::Hit) | Some(CellMark::Struck) => 'X',
                Some(CellMark::Miss) => 'o',
                None if ships.contains(&coord) => 'S',
                None => '.',
            };
            print!(" {}", ch);
        }
        println!();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = ClientConfig::new(cli.backend, cli.frontend);
    let transport = HttpTransport::new(config.backend_url.clone());

    let mut page = HeadlessPage::new();
    let route = Route::from_path(&cli.path);
    let session = bootstrap(&route, &transport, &mut page, &config)
        .await
        .ok_or_else(|| anyhow::anyhow!("no game session for path {}", cli.path))?;
    println!("Game {} as player {}", session.game_id(), session.player_id());
    if let Some(url) = page.invite() {
        println!("Player B URL = {}", url);
    }

    let (audio, scheduler) =
        AudioScheduler::spawn(LoggingSink::new(Duration::from_millis(cli.cue_ms)));
    let views = FLEET
        .iter()
        .map(|&len| HeadlessShip::new(len as f64 * PITCH, PITCH));
    let fleet = Fleet::standard(views, config.layout, audio.clone());
    let own_board = Board::new(HeadlessCell::grid(OWN_ORIGIN, PITCH));
    let opponent_board = Board::new(HeadlessCell::grid(OPPONENT_ORIGIN, PITCH));
    let client = GameClient::new(session, transport, audio);
    let app = App::new(fleet, own_board, opponent_board, client, page);

    // Default layout: ship i dropped on cell (0, 2i), one column apart.
    let (tx, rx) = mpsc::channel(64);
    for (ship, col) in (0..FLEET.len()).zip((0u32..).step_by(2)) {
        let at = cell_center(OWN_ORIGIN, 0, col);
        tx.send(UiEvent::Pointer(PointerEvent::Down { ship, at })).await?;
        tx.send(UiEvent::Pointer(PointerEvent::Up(at))).await?;
    }
    tx.send(UiEvent::SubmitClicked).await?;
    let input = tokio::spawn(read_shots(tx));

    let app = app.run(rx).await;
    input.abort();

    let ships: Vec<Coord> = app
        .fleet()
        .ships()
        .iter()
        .filter_map(|s| s.coordinates())
        .flatten()
        .copied()
        .collect();
    print_board("Opponent board", app.opponent_board(), &[]);
    print_board("Own board", app.own_board(), &ships);
    if app.page().submit_visible() {
        println!("Placement was not accepted.");
    }
    drop(app);
    scheduler.join().await?;
    Ok(())
}
