use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::chat::{ChatRecord, Completion, Dispatch, PendingCall, Phase, Session};
use crate::tui::ui::render_ui;

/// Input mode for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// TUI Application state
pub struct WhisprApp {
    session: Session,

    // Input state
    input: String,
    input_history: Vec<String>,
    input_history_index: usize,

    // Completed transport calls, delivered by spawned tasks
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
}

impl WhisprApp {
    pub fn new(session: Session) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        Self {
            session,
            input: String::new(),
            input_history: Vec::new(),
            input_history_index: 0,
            completion_tx,
            completion_rx,
        }
    }

    /// Get the current transcript
    pub fn records(&self) -> &[ChatRecord] {
        self.session.records()
    }

    /// Get the current input text
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Check if a reply is pending
    pub fn is_pending(&self) -> bool {
        self.session.is_pending()
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    /// Get the model name, if a client is configured
    pub fn model_name(&self) -> &str {
        self.session.model_name().unwrap_or("not configured")
    }

    /// Add a character to the input
    fn handle_input(&mut self, c: char) {
        if !self.is_pending() {
            self.input.push(c);
        }
    }

    /// Remove the last character from the input
    fn backspace(&mut self) {
        if !self.is_pending() {
            self.input.pop();
        }
    }

    /// Go to the previous input in history
    fn previous_input(&mut self) {
        if self.input_history.is_empty() || self.is_pending() {
            return;
        }

        if self.input_history_index > 0 {
            self.input_history_index -= 1;
            self.input = self.input_history[self.input_history_index].clone();
        }
    }

    /// Go to the next input in history
    fn next_input(&mut self) {
        if self.input_history.is_empty() || self.is_pending() {
            return;
        }

        if self.input_history_index < self.input_history.len() - 1 {
            self.input_history_index += 1;
            self.input = self.input_history[self.input_history_index].clone();
        } else {
            self.input_history_index = self.input_history.len();
            self.input.clear();
        }
    }

    /// Submit the current input as a message
    fn submit_message(&mut self) {
        let text = self.input.clone();

        match self.session.dispatch(&text) {
            Dispatch::Rejected => {
                debug!("submission rejected");
                return;
            }
            Dispatch::Completed => {}
            Dispatch::InFlight(call) => spawn_call(call, self.completion_tx.clone()),
        }

        // Add to input history
        self.input_history.push(text);
        self.input_history_index = self.input_history.len();
        self.input.clear();
    }

    /// Apply any replies that have arrived since the last tick
    fn drain_completions(&mut self) {
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.session.complete(completion);
        }
    }

    /// Returns false when the app should exit.
    fn handle_key(&mut self, state: &mut TuiState, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        match state.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('e') => {
                    state.input_mode = InputMode::Editing;
                }
                KeyCode::Char('q') => {
                    return false;
                }
                _ => {}
            },
            InputMode::Editing => match key.code {
                KeyCode::Enter => {
                    self.submit_message();
                }
                KeyCode::Esc => {
                    state.input_mode = InputMode::Normal;
                }
                KeyCode::Char(c) => {
                    self.handle_input(c);
                }
                KeyCode::Backspace => {
                    self.backspace();
                }
                KeyCode::Up => {
                    self.previous_input();
                }
                KeyCode::Down => {
                    self.next_input();
                }
                _ => {}
            },
        }
        true
    }
}

/// Run `call` in the background. A call that panics still reports back, so
/// the session never stays pending.
fn spawn_call(call: PendingCall, tx: mpsc::UnboundedSender<Completion>) {
    let placeholder = call.placeholder();
    tokio::spawn(async move {
        let completion = match tokio::spawn(call.run()).await {
            Ok(completion) => completion,
            Err(err) => {
                error!(error = %err, "transport call aborted");
                Completion::interrupted(placeholder, err.to_string())
            }
        };
        // The receiver only goes away when the app is shutting down.
        let _ = tx.send(completion);
    });
}

/// TUI-specific state
pub struct TuiState {
    pub input_mode: InputMode,
    last_tick: Instant,
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            input_mode: InputMode::Editing, // Start in editing mode
            last_tick: Instant::now(),
        }
    }
}

/// Run the TUI application
pub async fn run(session: Session) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = WhisprApp::new(session);
    let mut state = TuiState::default();
    info!(model = app.model_name(), "starting chat");

    let tick_rate = Duration::from_millis(100);
    let result = run_app(&mut terminal, &mut app, &mut state, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut WhisprApp,
    state: &mut TuiState,
    tick_rate: Duration,
) -> Result<()> {
    loop {
        app.drain_completions();

        terminal.draw(|f| render_ui(f, &*app, &*state))?;

        let timeout = tick_rate
            .checked_sub(state.last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !app.handle_key(state, key) {
                    return Ok(());
                }
            }
        }

        // Let spawned transport calls make progress between polls
        tokio::task::yield_now().await;

        if state.last_tick.elapsed() >= tick_rate {
            state.last_tick = Instant::now();
        }
    }
}
