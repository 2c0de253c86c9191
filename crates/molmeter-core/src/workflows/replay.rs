use super::session::{MeasurementSession, PickOutcome};
use crate::core::models::atom::AtomInfo;
use crate::engine::error::EngineError;
use crate::engine::mode::ToolMode;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// One recorded user interaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "action")]
pub enum ScriptStep {
    /// Toolbar mode change.
    Mode { mode: ToolMode },
    /// Atom pick in the viewport. `at` pins the clock for reproducible ids and
    /// timestamps; without it the current time is used.
    Pick {
        atom: AtomInfo,
        #[serde(default)]
        at: Option<DateTime<Utc>>,
    },
    /// "Clear all" in the measurement panel.
    Clear,
    /// Toggle the highlight of the measurement at `index` (0-based, creation order).
    Highlight { index: usize },
}

/// A recorded sequence of interactions, optionally starting in a given mode.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PickScript {
    #[serde(default)]
    pub mode: Option<ToolMode>,
    #[serde(default, rename = "step")]
    pub steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayProgress {
    Started { total_steps: u64 },
    StepFinished,
    Finished,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub steps: usize,
    pub picks: usize,
    pub completed: usize,
    pub rejected: usize,
    pub cleared: usize,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ReplayError {
    #[error("Step {step}: no measurement at index {index} (only {available} recorded)")]
    NoSuchMeasurement {
        step: usize,
        index: usize,
        available: usize,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Drives `session` through every step of `script`, in order.
///
/// # Errors
///
/// Stops at the first step that addresses a measurement that does not exist.
#[instrument(skip_all, name = "replay_workflow")]
pub fn run(
    session: &mut MeasurementSession<'_>,
    script: &PickScript,
    mut progress: impl FnMut(ReplayProgress),
) -> Result<ReplaySummary, ReplayError> {
    if let Some(mode) = script.mode {
        session.set_active_mode(mode);
    }
    info!(
        "Replaying {} step(s) starting in '{}' mode.",
        script.steps.len(),
        session.active_mode()
    );
    progress(ReplayProgress::Started {
        total_steps: script.steps.len() as u64,
    });

    let mut summary = ReplaySummary::default();

    for (step_index, step) in script.steps.iter().enumerate() {
        debug!(step = step_index, "Applying {:?}", step);
        match step {
            ScriptStep::Mode { mode } => session.set_active_mode(*mode),
            ScriptStep::Pick { atom, at } => {
                summary.picks += 1;
                let outcome = match at {
                    Some(at) => session.on_atom_picked_at(atom.clone(), *at),
                    None => session.on_atom_picked(atom.clone()),
                };
                match outcome {
                    PickOutcome::Completed(_) => summary.completed += 1,
                    PickOutcome::Rejected(_) => summary.rejected += 1,
                    _ => {}
                }
            }
            ScriptStep::Clear => {
                summary.cleared += session.clear_measurements();
            }
            ScriptStep::Highlight { index } => {
                let available = session.measurements().len();
                let id = session
                    .measurements()
                    .get(*index)
                    .map(|m| m.id())
                    .ok_or(ReplayError::NoSuchMeasurement {
                        step: step_index,
                        index: *index,
                        available,
                    })?;
                session.toggle_highlight(id)?;
            }
        }
        summary.steps += 1;
        progress(ReplayProgress::StepFinished);
    }

    progress(ReplayProgress::Finished);
    info!(
        "Replay finished: {} pick(s), {} measurement(s) completed.",
        summary.picks, summary.completed
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::measurement::MeasurementKind;

    const SCRIPT: &str = r#"
        mode = "measure-distance"

        [[step]]
        action = "pick"
        at = "2024-05-01T12:00:00Z"
        atom = { residue = "ALA", residueNumber = 1, atomName = "CA", x = 0.0, y = 0.0, z = 0.0 }

        [[step]]
        action = "pick"
        at = "2024-05-01T12:00:01Z"
        atom = { residue = "GLY", residueNumber = 2, atomName = "CA", x = 3.0, y = 4.0, z = 0.0 }

        [[step]]
        action = "mode"
        mode = "angle"

        [[step]]
        action = "pick"
        atom = { residue = "GLY", residueNumber = 2, atomName = "N", x = 1.0, y = 0.0, z = 0.0 }

        [[step]]
        action = "pick"
        atom = { residue = "GLY", residueNumber = 2, atomName = "CA", x = 0.0, y = 0.0, z = 0.0 }

        [[step]]
        action = "pick"
        atom = { residue = "GLY", residueNumber = 2, atomName = "C", x = 0.0, y = 1.0, z = 0.0 }

        [[step]]
        action = "highlight"
        index = 1
    "#;

    fn parse(src: &str) -> PickScript {
        toml::from_str(src).unwrap()
    }

    #[test]
    fn script_parses_all_step_kinds() {
        let script = parse(SCRIPT);
        assert_eq!(script.mode, Some(ToolMode::MeasureDistance));
        assert_eq!(script.steps.len(), 7);
        assert!(matches!(
            script.steps[2],
            ScriptStep::Mode {
                mode: ToolMode::MeasureAngle
            }
        ));
        assert!(matches!(script.steps[6], ScriptStep::Highlight { index: 1 }));
        assert!(parse("[[step]]\naction = \"clear\"\n").steps[0] == ScriptStep::Clear);
    }

    #[test]
    fn replay_produces_measurements_in_order() {
        let script = parse(SCRIPT);
        let mut session = MeasurementSession::new();
        let mut events = Vec::new();

        let summary = run(&mut session, &script, |p| events.push(p)).unwrap();

        assert_eq!(
            summary,
            ReplaySummary {
                steps: 7,
                picks: 5,
                completed: 2,
                rejected: 0,
                cleared: 0,
            }
        );
        let kinds: Vec<_> = session.measurements().iter().map(|m| m.kind()).collect();
        assert_eq!(kinds, vec![MeasurementKind::Distance, MeasurementKind::Angle]);
        assert!((session.measurements()[0].value() - 5.0).abs() < 1e-12);
        assert!((session.measurements()[1].value() - 90.0).abs() < 1e-6);
        assert!(session.measurements()[1].is_highlighted());
        assert_eq!(
            session.export_measurements()[0].timestamp,
            "2024-05-01T12:00:01.000Z"
        );

        assert_eq!(events.first(), Some(&ReplayProgress::Started { total_steps: 7 }));
        assert_eq!(events.last(), Some(&ReplayProgress::Finished));
        assert_eq!(
            events
                .iter()
                .filter(|p| **p == ReplayProgress::StepFinished)
                .count(),
            7
        );
    }

    #[test]
    fn clear_step_counts_removed_measurements() {
        let mut script = parse(SCRIPT);
        script.steps.truncate(2);
        script.steps.push(ScriptStep::Clear);

        let mut session = MeasurementSession::new();
        let summary = run(&mut session, &script, |_| {}).unwrap();
        assert_eq!(summary.cleared, 1);
        assert!(session.measurements().is_empty());
    }

    #[test]
    fn highlight_of_missing_measurement_fails() {
        let script = PickScript {
            mode: None,
            steps: vec![ScriptStep::Highlight { index: 0 }],
        };
        let mut session = MeasurementSession::new();
        let result = run(&mut session, &script, |_| {});
        assert_eq!(
            result,
            Err(ReplayError::NoSuchMeasurement {
                step: 0,
                index: 0,
                available: 0,
            })
        );
    }

    #[test]
    fn unknown_mode_in_script_is_a_parse_error() {
        let result: Result<PickScript, _> = toml::from_str(r#"mode = "measure-volume""#);
        assert!(result.is_err());
    }
}
