//! Main TUI application loop.
//!
//! Handles:
//! - Input event handling
//! - Dispatching submissions to the background worker
//! - Polling the worker and the startup health probe

use std::io;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::runtime::Runtime;

use crate::adapters::http::HttpPredictionClient;
use crate::application::AssessmentController;
use crate::config::ClientConfig;
use crate::domain::{AssessmentError, HealthStatus};
use crate::ports::PredictionService;
use crate::Result;

use super::ui::{
    form::{render_form, render_form_footer, FormView},
    render_disclaimer, render_header,
    result::render_result_panel,
    ServiceStatus,
};
use super::worker::{AssessmentProgress, AssessmentWorker, AssessmentWorkerHandle};

/// Time constant of the loading gauge's asymptotic fill, in seconds.
const LOADING_TAU_SECS: f64 = 1.5;
/// The loading gauge never fills past this before the response arrives.
const LOADING_CEILING: f64 = 0.95;

/// Main application state
pub struct App {
    controller: AssessmentController,
    service: Arc<dyn PredictionService>,
    service_url: String,
    runtime: Runtime,
    form_view: FormView,
    pending: Option<AssessmentWorkerHandle>,
    loading_started_at: Option<Instant>,
    health_rx: Option<Receiver<std::result::Result<HealthStatus, AssessmentError>>>,
    service_status: ServiceStatus,
    should_quit: bool,
}

impl App {
    /// Create the application with the HTTP client built from `config`.
    ///
    /// # Errors
    /// Returns error if the HTTP client or the async runtime cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = HttpPredictionClient::new(config)?;
        Self::with_service(Arc::new(client), config.base_url.clone())
    }

    /// Create the application around any prediction service.
    ///
    /// # Errors
    /// Returns error if the async runtime cannot be created.
    pub fn with_service(service: Arc<dyn PredictionService>, service_url: String) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("cardiopredict-io")
            .enable_all()
            .build()?;

        Ok(Self {
            controller: AssessmentController::new(),
            service,
            service_url,
            runtime,
            form_view: FormView::default(),
            pending: None,
            loading_started_at: None,
            health_rx: None,
            service_status: ServiceStatus::Checking,
            should_quit: false,
        })
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        self.health_rx = Some(AssessmentWorker::probe_health(
            self.runtime.handle(),
            self.service.clone(),
        ));

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore the terminal even if the loop failed.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_health();
            self.poll_worker();

            terminal.draw(|f| {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(2), // Header
                        Constraint::Min(0),    // Form + result
                        Constraint::Length(2), // Footer
                        Constraint::Length(2), // Disclaimer
                    ])
                    .split(f.area());
                let body = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
                    .split(rows[1]);

                let loading = self.controller.is_loading();
                render_header(f, rows[0], &self.service_url, &self.service_status);
                render_form(f, body[0], &self.form_view, self.controller.form(), loading);
                render_result_panel(f, body[1], self.controller.state(), self.loading_progress());
                render_form_footer(f, rows[2], self.controller.form(), loading);
                render_disclaimer(f, rows[3]);
            })?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn poll_health(&mut self) {
        let Some(rx) = &self.health_rx else {
            return;
        };
        if let Ok(result) = rx.try_recv() {
            self.service_status = match result {
                Ok(status) if status.is_healthy() => ServiceStatus::Online,
                Ok(status) => ServiceStatus::Offline(status.status),
                Err(e) => ServiceStatus::Offline(e.to_string()),
            };
            self.health_rx = None;
        }
    }

    /// Drain progress from the in-flight request, if any.
    fn poll_worker(&mut self) {
        while let Some(progress) = self.pending.as_ref().and_then(AssessmentWorkerHandle::try_recv)
        {
            match progress {
                AssessmentProgress::Sending => {
                    tracing::debug!("Prediction request dispatched");
                }
                AssessmentProgress::Complete(outcome) => {
                    if let Some(worker) = self.pending.take() {
                        self.controller.finish_submission(worker.ticket, outcome);
                    }
                    self.loading_started_at = None;
                }
            }
        }
    }

    fn loading_progress(&self) -> f64 {
        let Some(started) = self.loading_started_at else {
            return 0.0;
        };
        let elapsed = started.elapsed().as_secs_f64();
        (1.0 - (-elapsed / LOADING_TAU_SECS).exp()) * LOADING_CEILING
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::BackTab => self.form_view.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.form_view.next_field(),
            KeyCode::Char('q' | 'Q') => self.should_quit = true,
            KeyCode::Char('r' | 'R') => self.reset(),
            // Input is locked while a request is in flight.
            _ if self.controller.is_loading() => {}
            KeyCode::Left => self.form_view.cycle_option(&mut self.controller, false),
            KeyCode::Right | KeyCode::Char(' ') => {
                self.form_view.cycle_option(&mut self.controller, true);
            }
            KeyCode::Char('s' | 'S') => self.controller.load_sample_data(),
            KeyCode::Char(c) => self.form_view.input_char(&mut self.controller, c),
            KeyCode::Backspace => self.form_view.delete_char(&mut self.controller),
            KeyCode::Delete => self.form_view.clear_field(&mut self.controller),
            KeyCode::Enter => self.submit(),
            _ => {}
        }
    }

    fn submit(&mut self) {
        if self.pending.is_some() {
            return;
        }
        // Validation failures are recorded in the controller state.
        let Ok(submission) = self.controller.begin_submission() else {
            return;
        };
        self.loading_started_at = Some(Instant::now());
        self.pending = Some(AssessmentWorker::spawn(
            self.runtime.handle(),
            self.service.clone(),
            submission,
        ));
    }

    fn reset(&mut self) {
        // Dropping the handle discards any in-flight outcome.
        self.pending = None;
        self.loading_started_at = None;
        self.controller.reset();
        self.form_view = FormView::default();
    }
}
