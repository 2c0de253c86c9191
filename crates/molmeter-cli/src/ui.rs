use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use molmeter::engine::events::{EventCallback, SessionEvent};
use molmeter::workflows::replay::ReplayProgress;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::warn;

#[derive(Debug)]
pub enum UiEvent {
    Progress(ReplayProgress),
    /// `audible` asks for a terminal bell on completed measurements.
    Session { event: SessionEvent, audible: bool },
    Log(String),
}

pub struct UiManager {
    mp: Arc<MultiProgress>,
    state: BarState,
    event_receiver: mpsc::Receiver<UiEvent>,
    shutdown_receiver: watch::Receiver<bool>,
    _sentinel_bar: ProgressBar,
}

#[derive(Default)]
struct BarState {
    active_bar: Option<ProgressBar>,
    completed: usize,
}

impl UiManager {
    pub fn new() -> (Self, mpsc::Sender<UiEvent>, watch::Sender<bool>) {
        let (event_sender, event_receiver) = mpsc::channel(1024);
        let (shutdown_sender, shutdown_receiver) = watch::channel(false);
        let mp = Arc::new(MultiProgress::new());
        mp.set_draw_target(ProgressDrawTarget::stderr_with_hz(12));
        let _sentinel_bar = mp.add(ProgressBar::hidden());
        let manager = Self {
            mp,
            state: BarState::default(),
            event_receiver,
            shutdown_receiver,
            _sentinel_bar,
        };

        (manager, event_sender, shutdown_sender)
    }

    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(event) = self.event_receiver.recv() => {
                    self.handle_event(event);
                }
                result = self.shutdown_receiver.changed() => {
                    if result.is_err() || *self.shutdown_receiver.borrow() {
                        break;
                    }
                }
            }
        }
        while let Ok(event) = self.event_receiver.try_recv() {
            self.handle_event(event);
        }
        self._sentinel_bar.finish_and_clear();
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Log(msg) => {
                self.mp.println(msg).ok();
            }
            UiEvent::Progress(progress) => self.handle_progress(progress),
            UiEvent::Session { event, audible } => self.handle_session(event, audible),
        }
    }

    fn handle_progress(&mut self, progress: ReplayProgress) {
        match progress {
            ReplayProgress::Started { total_steps } => {
                if let Some(bar) = self.state.active_bar.take() {
                    bar.finish_and_clear();
                }
                let pb = self.mp.add(ProgressBar::new(total_steps));
                pb.set_style(Self::bar_style());
                pb.set_message("Replaying picks");
                self.state.active_bar = Some(pb);
                self.state.completed = 0;
            }
            ReplayProgress::StepFinished => {
                if let Some(bar) = self.state.active_bar.as_ref() {
                    bar.inc(1);
                }
            }
            ReplayProgress::Finished => {
                if let Some(bar) = self.state.active_bar.take() {
                    bar.finish_and_clear();
                }
                self.mp
                    .println(format!(
                        "✓ Replay finished ({} measurement(s) completed)",
                        self.state.completed
                    ))
                    .ok();
            }
        }
    }

    fn handle_session(&mut self, event: SessionEvent, audible: bool) {
        match event {
            SessionEvent::ModeChanged { to, .. } => {
                if let Some(bar) = self.state.active_bar.as_ref() {
                    bar.set_message(format!("Replaying picks [{}]", to));
                }
            }
            SessionEvent::MeasurementCompleted {
                id,
                kind,
                value,
                degenerate,
            } => {
                self.state.completed += 1;
                let marker = if degenerate { "⚠" } else { "+" };
                let bell = if audible { "\x07" } else { "" };
                self.mp
                    .println(format!(
                        "  {} {} #{}: {}{}",
                        marker,
                        kind,
                        id,
                        kind.format_value(value),
                        bell
                    ))
                    .ok();
            }
            SessionEvent::MeasurementsCleared { removed } => {
                self.mp
                    .println(format!("  Cleared {} measurement(s)", removed))
                    .ok();
            }
            SessionEvent::AtomSelected { .. }
            | SessionEvent::PartialSelection { .. }
            | SessionEvent::HighlightChanged { .. } => {}
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<32} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("━╸ ")
    }
}

#[derive(Clone)]
pub struct CliProgressHandler {
    sender: mpsc::Sender<UiEvent>,
    audible: bool,
}

impl CliProgressHandler {
    pub fn new(sender: mpsc::Sender<UiEvent>) -> Self {
        Self {
            sender,
            audible: false,
        }
    }

    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.audible = enabled;
        self
    }

    pub fn progress_callback(&self) -> impl FnMut(ReplayProgress) + use<> {
        let sender = self.sender.clone();
        move |progress: ReplayProgress| {
            if let Err(e) = sender.try_send(UiEvent::Progress(progress)) {
                warn!("Failed to send progress update to UI channel: {}", e);
            }
        }
    }

    pub fn event_callback(&self) -> EventCallback<'static> {
        let sender = self.sender.clone();
        let audible = self.audible;
        Box::new(move |event: SessionEvent| {
            if let Err(e) = sender.try_send(UiEvent::Session { event, audible }) {
                warn!("Failed to send session event to UI channel: {}", e);
            }
        })
    }
}
