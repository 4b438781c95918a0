//! Application state management.

use checkin_engine::{PageDirection, ScanView, ScannerSnapshot, TicketCategory};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Scanning view.
    #[default]
    Scanning,
    /// Help overlay.
    Help,
    /// Waiting for the operator to confirm clearing the session.
    ConfirmClear,
    /// Quitting.
    Quit,
}

/// Operator intent produced by a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A complete token typed (or wedged) into the input line.
    Submit(String),
    /// Validate the token belonging to a ticket id.
    Lookup(String),
    CloseResult,
    ClearSession,
    RefreshBaseline,
    OpenTickets(TicketCategory),
    NavigateTickets(PageDirection),
    CloseTickets,
    ResumeDecoder,
}

/// Main application model.
#[derive(Default)]
pub struct App {
    /// Current application state/view.
    pub state: AppState,
    /// Characters typed since the last Enter.
    pub input: String,
    /// Most recent engine snapshot.
    pub snapshot: Option<ScannerSnapshot>,
    /// Last successful baseline refresh.
    pub last_refresh: Option<chrono::DateTime<chrono::Local>>,
    /// Error message to display (if any).
    pub error_message: Option<String>,
    /// API root shown in the header.
    pub endpoint: String,
    /// Gate location shown in the header.
    pub location: String,
}

impl App {
    /// Create a new application instance.
    pub fn new(endpoint: &str, location: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            location: location.to_string(),
            ..Self::default()
        }
    }

    fn overlay_open(&self) -> bool {
        self.snapshot
            .as_ref()
            .is_some_and(|s| s.overlay.category.is_some())
    }

    fn result_open(&self) -> bool {
        self.snapshot.as_ref().is_some_and(|s| s.modal.is_open)
    }

    fn camera_halted(&self) -> bool {
        self.snapshot
            .as_ref()
            .is_some_and(|s| matches!(s.view, ScanView::CameraHalted { .. }))
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        match self.state {
            AppState::Scanning => self.handle_scanning_key(key),
            AppState::Help => {
                // Any key closes help
                self.state = AppState::Scanning;
                None
            }
            AppState::ConfirmClear => {
                self.state = AppState::Scanning;
                matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'))
                    .then_some(Command::ClearSession)
            }
            AppState::Quit => None,
        }
    }

    fn handle_scanning_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.state = AppState::Quit;
                    None
                }
                KeyCode::Char('r') => Some(Command::RefreshBaseline),
                KeyCode::Char('l') => {
                    self.state = AppState::ConfirmClear;
                    None
                }
                KeyCode::Char('d') if self.camera_halted() => Some(Command::ResumeDecoder),
                _ => None,
            };
        }

        if self.overlay_open() {
            return match key.code {
                KeyCode::Left => Some(Command::NavigateTickets(PageDirection::Prev)),
                KeyCode::Right => Some(Command::NavigateTickets(PageDirection::Next)),
                KeyCode::Esc => Some(Command::CloseTickets),
                KeyCode::F(n) => Self::tile_hotkey(n).map(Command::OpenTickets),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Enter => self.take_input(),
            KeyCode::Esc if self.result_open() => Some(Command::CloseResult),
            KeyCode::Esc => {
                self.input.clear();
                None
            }
            KeyCode::F(1) => {
                self.state = AppState::Help;
                None
            }
            KeyCode::F(n) => Self::tile_hotkey(n).map(Command::OpenTickets),
            _ => None,
        }
    }

    /// `#<ticket id>` looks a ticket up; anything else is a token.
    fn take_input(&mut self) -> Option<Command> {
        let line = std::mem::take(&mut self.input);
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        match line.strip_prefix('#') {
            Some(ticket_id) if !ticket_id.trim().is_empty() => {
                Some(Command::Lookup(ticket_id.trim().to_string()))
            }
            Some(_) => None,
            None => Some(Command::Submit(line.to_string())),
        }
    }

    /// F2..F6 map onto the five stat tiles.
    pub fn tile_hotkey(n: u8) -> Option<TicketCategory> {
        match n {
            2..=6 => TicketCategory::ALL.get(usize::from(n - 2)).copied(),
            _ => None,
        }
    }

    /// Check if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.state == AppState::Quit
    }
}
