//! Check-in Scanner: gate console for festival check-in.
//!
//! A TUI front end over `checkin-engine`.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, Instrument};

use checkin_engine::{
    CheckinScannerApi, DecoderExit, HttpScannerApi, JsonFileStore, ScannerSession, StatTile,
    SystemTimeSource,
};
use checkin_scanner::settings::{self, Overrides};
use checkin_scanner::{
    ui, wedge_channel, App, Command, Delivery, WedgeSender, WedgeTokenSource,
};
use checkin_telemetry::{
    init_telemetry, log_event, log_scan_event, log_stats_event, scanner_span, TelemetryConfig,
};

/// Check-in Scanner: gate console
#[derive(Parser, Debug)]
#[command(name = "checkin-scanner")]
#[command(about = "TUI check-in console for keyboard-wedge ticket scanners")]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Check-in API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Operator name sent with every validation
    #[arg(long)]
    validated_by: Option<String>,

    /// Gate location sent with every validation
    #[arg(short, long)]
    location: Option<String>,

    /// Directory for persisted session counters
    #[arg(long)]
    store_dir: Option<PathBuf>,

    /// Write logs to stderr (redirect it, e.g. `2>scanner.log`)
    #[arg(long)]
    log_stderr: bool,
}

/// Results of background operator actions.
enum Notice {
    Synced(bool),
    Error(String),
}

const WEDGE_CAPACITY: usize = 16;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stderr shares the terminal with the alternate screen
    let mut telemetry = TelemetryConfig::from_env();
    telemetry.console_output = args.log_stderr;
    let _telemetry = init_telemetry(telemetry)?;

    let raw = match &args.config {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?,
        ),
        None => None,
    };
    let config = settings::resolve(
        raw.as_deref(),
        Overrides {
            base_url: args.base_url,
            validated_by: args.validated_by,
            location: args.location,
            store_dir: args.store_dir,
        },
    )?;

    let api = Arc::new(HttpScannerApi::new(&config)?);
    let store = Arc::new(JsonFileStore::new(config.store_dir.clone()));
    let session = ScannerSession::new(config.clone(), api, store, Arc::new(SystemTimeSource))?;
    session.start();
    log_event!(
        info,
        "console",
        "scanner started",
        location = %config.location,
        endpoint = %config.api_root()
    );

    let mut app = App::new(config.api_root(), &config.location);
    if session.refresh_baseline().await {
        app.last_refresh = Some(chrono::Local::now());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &session).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    session.shutdown();
    result
}

fn spawn_decoder(
    session: Arc<ScannerSession>,
    mut source: WedgeTokenSource,
) -> JoinHandle<DecoderExit> {
    let span = scanner_span!("decoder", location = %session.config().location);
    tokio::spawn(
        async move {
            let exit = session.run_decoder(&mut source).await;
            debug!(?exit, "decoder loop ended");
            exit
        }
        .instrument(span),
    )
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    session: &Arc<ScannerSession>,
) -> anyhow::Result<()> {
    let (mut wedge, source) = wedge_channel(WEDGE_CAPACITY);
    let mut decoder = spawn_decoder(session.clone(), source);
    let (notice_tx, mut notice_rx) = mpsc::unbounded_channel();

    loop {
        while let Ok(notice) = notice_rx.try_recv() {
            match notice {
                Notice::Synced(true) => {
                    app.last_refresh = Some(chrono::Local::now());
                    app.error_message = None;
                    let stats = session.snapshot().stats;
                    log_stats_event!(
                        debug,
                        "tiles after manual sync",
                        stats.displayed(StatTile::Today),
                        stats.displayed(StatTile::Session),
                        stats.displayed(StatTile::Total),
                        stats.displayed(StatTile::Valid),
                        stats.displayed(StatTile::Failed)
                    );
                }
                Notice::Synced(false) => {
                    app.error_message = Some("Server totals unavailable".to_string());
                }
                Notice::Error(message) => app.error_message = Some(message),
            }
        }

        app.snapshot = Some(session.snapshot());
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle input with timeout so countdowns keep redrawing
        if event::poll(Duration::from_millis(100))? {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Some(command) = app.handle_key(key) {
                        if let Command::ResumeDecoder = command {
                            decoder.abort();
                            let (sender, source) = wedge_channel(WEDGE_CAPACITY);
                            wedge = sender;
                            decoder = spawn_decoder(session.clone(), source);
                        }
                        execute_command(command, session, &wedge, &notice_tx).await;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    log_event!(warn, "decoder", "terminal input failed", error = %e);
                    wedge.fault(e.to_string());
                }
            }
        }

        if app.should_quit() {
            decoder.abort();
            return Ok(());
        }
    }
}

async fn execute_command(
    command: Command,
    session: &Arc<ScannerSession>,
    wedge: &WedgeSender,
    notices: &mpsc::UnboundedSender<Notice>,
) {
    match command {
        Command::Submit(token) => {
            match wedge.try_send(token) {
                Delivery::Queued => {}
                Delivery::Busy => {
                    log_event!(warn, "decoder", "scan dropped, decoder queue full");
                    let _ = notices.send(Notice::Error("Decoder busy, scan again".into()));
                }
                Delivery::Closed => {
                    let _ = notices.send(Notice::Error("Decoder stopped, press Ctrl-D".into()));
                }
            }
        }
        Command::Lookup(ticket_id) => {
            let session = session.clone();
            let notices = notices.clone();
            tokio::spawn(async move {
                match session.lookup_ticket(&ticket_id).await {
                    Ok(outcome) => {
                        log_scan_event!(
                            info,
                            "manual lookup resolved",
                            outcome.kind().as_str(),
                            ticket_id
                        );
                    }
                    Err(e) => {
                        let _ = notices.send(Notice::Error(e.to_string()));
                    }
                }
            });
        }
        Command::RefreshBaseline => {
            let session = session.clone();
            let notices = notices.clone();
            tokio::spawn(async move {
                let _ = notices.send(Notice::Synced(session.refresh_baseline().await));
            });
        }
        Command::OpenTickets(category) => {
            let session = session.clone();
            tokio::spawn(async move { session.open_tickets(category).await });
        }
        Command::NavigateTickets(direction) => {
            let session = session.clone();
            tokio::spawn(async move {
                session.navigate_tickets(direction).await;
            });
        }
        Command::CloseTickets => session.close_tickets(),
        Command::CloseResult => session.close_result(),
        Command::ClearSession => session.clear_session(),
        Command::ResumeDecoder => session.resume_decoder(),
    }
}
