use super::mode::ToolMode;
use crate::core::models::atom::AtomInfo;
use crate::core::models::measurement::MeasurementKind;
use tracing::{debug, warn};

/// A full set of picks for one measurement, in pick order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedSelection {
    pub kind: MeasurementKind,
    pub atoms: Vec<AtomInfo>,
}

/// What a single pick did to the selection.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionStep {
    /// Select mode: the pick replaced the inspected atom.
    Replaced,
    /// The pick was appended and more atoms are needed.
    Collecting { collected: usize, required: usize },
    /// Leftover picks were already at the required count; they were discarded
    /// and the new pick starts a fresh selection.
    Restarted { required: usize },
    /// The pick completed a measurement. The partial selection is now empty.
    Completed(CompletedSelection),
}

/// Accumulates atom picks for the active tool until a measurement is complete.
///
/// In select mode it holds at most one atom. In a measurement mode it holds
/// between zero and `required - 1` picks; the pick that reaches the required
/// count is emitted as a [`CompletedSelection`] and the list starts over in the
/// same mode.
#[derive(Debug, Clone, Default)]
pub struct SelectionAccumulator {
    mode: ToolMode,
    picked: Vec<AtomInfo>,
}

impl SelectionAccumulator {
    pub fn new(mode: ToolMode) -> Self {
        Self {
            mode,
            picked: Vec::new(),
        }
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    /// Atoms picked so far for the active tool.
    pub fn picked(&self) -> &[AtomInfo] {
        &self.picked
    }

    /// Switches tools. Any partial selection is discarded, even when the mode is
    /// unchanged. Returns the number of picks that were dropped.
    pub fn set_mode(&mut self, mode: ToolMode) -> usize {
        let dropped = self.reset();
        if dropped > 0 {
            debug!(
                from = %self.mode,
                to = %mode,
                dropped,
                "Discarding partial selection on mode change."
            );
        }
        self.mode = mode;
        dropped
    }

    /// Empties the partial selection without changing the mode.
    pub fn reset(&mut self) -> usize {
        let dropped = self.picked.len();
        self.picked.clear();
        dropped
    }

    pub fn push(&mut self, atom: AtomInfo) -> SelectionStep {
        let Some(kind) = self.mode.measurement_kind() else {
            self.picked.clear();
            self.picked.push(atom);
            return SelectionStep::Replaced;
        };
        let required = kind.required_atoms();

        if self.picked.len() >= required {
            warn!(
                mode = %self.mode,
                stale = self.picked.len(),
                "Selection already held a full set of atoms; restarting with the new pick."
            );
            self.picked.clear();
            self.picked.push(atom);
            return SelectionStep::Restarted { required };
        }

        self.picked.push(atom);
        let collected = self.picked.len();

        if collected == required {
            SelectionStep::Completed(CompletedSelection {
                kind,
                atoms: std::mem::take(&mut self.picked),
            })
        } else {
            SelectionStep::Collecting {
                collected,
                required,
            }
        }
    }
}
