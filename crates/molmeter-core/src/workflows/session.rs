use crate::core::models::atom::AtomInfo;
use crate::core::models::ids::MeasurementId;
use crate::core::models::measurement::{Measurement, MeasurementError};
use crate::engine::error::EngineError;
use crate::engine::events::{EventReporter, SessionEvent};
use crate::engine::mode::ToolMode;
use crate::engine::selection::{SelectionAccumulator, SelectionStep};
use crate::engine::store::{ExportRecord, MeasurementStore};
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

/// Result of feeding one atom pick into a [`MeasurementSession`].
#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    /// Select mode: the atom is now the inspected atom.
    Selected,
    /// The atom was added to a measurement in progress.
    Pending { collected: usize, required: usize },
    /// A stale full selection was discarded and the atom starts a new one.
    Restarted { required: usize },
    /// The atom completed a measurement, which was appended to the store.
    Completed(MeasurementId),
    /// The completed selection could not be turned into a measurement.
    Rejected(MeasurementError),
}

/// The measurement core behind a viewer page.
///
/// Pick events from the renderer, toolbar mode changes, and panel actions all go
/// through this type. Each call runs to completion before the next, so the
/// session needs no locking.
#[derive(Default)]
pub struct MeasurementSession<'a> {
    selection: SelectionAccumulator,
    store: MeasurementStore,
    reporter: EventReporter<'a>,
}

impl<'a> MeasurementSession<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: ToolMode) -> Self {
        Self {
            selection: SelectionAccumulator::new(mode),
            ..Self::default()
        }
    }

    pub fn with_reporter(mut self, reporter: EventReporter<'a>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Entry point for atom picks from the rendering collaborator.
    pub fn on_atom_picked(&mut self, atom: AtomInfo) -> PickOutcome {
        self.on_atom_picked_at(atom, Utc::now())
    }

    /// Same as [`on_atom_picked`](Self::on_atom_picked) with an explicit clock reading,
    /// used as the creation time if the pick completes a measurement.
    pub fn on_atom_picked_at(&mut self, atom: AtomInfo, now: DateTime<Utc>) -> PickOutcome {
        let label = atom.display_label();
        debug!(mode = %self.selection.mode(), atom = %label, "Atom picked.");

        match self.selection.push(atom) {
            SelectionStep::Replaced => {
                self.reporter.report(SessionEvent::AtomSelected { label });
                PickOutcome::Selected
            }
            SelectionStep::Collecting {
                collected,
                required,
            } => {
                self.reporter.report(SessionEvent::PartialSelection {
                    collected,
                    required,
                });
                PickOutcome::Pending {
                    collected,
                    required,
                }
            }
            SelectionStep::Restarted { required } => {
                self.reporter.report(SessionEvent::PartialSelection {
                    collected: 1,
                    required,
                });
                PickOutcome::Restarted { required }
            }
            SelectionStep::Completed(done) => {
                let id = self.store.next_id(now);
                match Measurement::new(id, done.kind, done.atoms, now) {
                    Ok(measurement) => self.record(measurement),
                    Err(e) => {
                        error!("Discarding completed selection: {}", e);
                        PickOutcome::Rejected(e)
                    }
                }
            }
        }
    }

    fn record(&mut self, measurement: Measurement) -> PickOutcome {
        let id = measurement.id();
        if let Some(reason) = measurement.degeneracy() {
            warn!(
                %id,
                kind = %measurement.kind(),
                "Degenerate measurement recorded as 0: {}",
                reason
            );
        } else {
            info!(
                %id,
                kind = %measurement.kind(),
                "Measurement completed: {}",
                measurement.formatted_value()
            );
        }
        self.reporter.report(SessionEvent::MeasurementCompleted {
            id,
            kind: measurement.kind(),
            value: measurement.value(),
            degenerate: measurement.is_degenerate(),
        });
        self.store.append(measurement);
        PickOutcome::Completed(id)
    }

    /// Switches tools, discarding any partial selection.
    pub fn set_active_mode(&mut self, mode: ToolMode) {
        let from = self.selection.mode();
        self.selection.set_mode(mode);
        self.reporter
            .report(SessionEvent::ModeChanged { from, to: mode });
    }

    pub fn active_mode(&self) -> ToolMode {
        self.selection.mode()
    }

    /// Atoms the renderer should mark as picked.
    pub fn selected_atoms(&self) -> &[AtomInfo] {
        self.selection.picked()
    }

    pub fn measurements(&self) -> &[Measurement] {
        self.store.measurements()
    }

    pub fn measurement(&self, id: MeasurementId) -> Option<&Measurement> {
        self.store.get(id)
    }

    /// Removes every completed measurement. Partial selections are left alone.
    pub fn clear_measurements(&mut self) -> usize {
        let removed = self.store.clear();
        info!("Cleared {} measurement(s).", removed);
        self.reporter
            .report(SessionEvent::MeasurementsCleared { removed });
        removed
    }

    pub fn export_measurements(&self) -> Vec<ExportRecord> {
        self.store.export_all()
    }

    /// # Errors
    ///
    /// Returns [`EngineError::MeasurementNotFound`] if no measurement has this id.
    pub fn set_highlighted(
        &mut self,
        id: MeasurementId,
        highlighted: bool,
    ) -> Result<(), EngineError> {
        self.store.set_highlighted(id, highlighted)?;
        self.reporter
            .report(SessionEvent::HighlightChanged { id, highlighted });
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`EngineError::MeasurementNotFound`] if no measurement has this id.
    pub fn toggle_highlight(&mut self, id: MeasurementId) -> Result<bool, EngineError> {
        let highlighted = self.store.toggle_highlight(id)?;
        self.reporter
            .report(SessionEvent::HighlightChanged { id, highlighted });
        Ok(highlighted)
    }

    pub fn summary(&self) -> String {
        self.store.summary()
    }
}
