use super::error::EngineError;
use crate::core::models::ids::MeasurementId;
use crate::core::models::measurement::{Measurement, MeasurementKind};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One row of the exported measurement document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    #[serde(rename = "type")]
    pub kind: MeasurementKind,
    pub value: f64,
    /// Residue labels in pick order joined by `" → "`, e.g. `ALA1 → GLY2 → SER3`.
    pub atoms: String,
    /// Creation time as ISO-8601 UTC with millisecond precision.
    pub timestamp: String,
}

impl From<&Measurement> for ExportRecord {
    fn from(m: &Measurement) -> Self {
        Self {
            kind: m.kind(),
            value: m.value(),
            atoms: m.export_label(),
            timestamp: m.timestamp().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Completed measurements in creation order.
///
/// Insertion order is the display and export order. Records are only removed by
/// [`MeasurementStore::clear`]; the only field that changes after insertion is
/// the highlight flag.
#[derive(Debug, Clone, Default)]
pub struct MeasurementStore {
    measurements: Vec<Measurement>,
    last_id: Option<MeasurementId>,
}

impl MeasurementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the id for a measurement created at `now`.
    ///
    /// Ids keep increasing across [`clear`](Self::clear) so that a presentation
    /// layer keyed on them never sees a reused id.
    pub fn next_id(&mut self, now: DateTime<Utc>) -> MeasurementId {
        let id = MeasurementId::after(self.last_id, now.timestamp_millis());
        self.last_id = Some(id);
        id
    }

    pub fn append(&mut self, measurement: Measurement) {
        if self.last_id.is_none_or(|last| measurement.id() > last) {
            self.last_id = Some(measurement.id());
        }
        self.measurements.push(measurement);
    }

    /// Removes every measurement. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.measurements.len();
        self.measurements.clear();
        removed
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    pub fn get(&self, id: MeasurementId) -> Option<&Measurement> {
        self.measurements.iter().find(|m| m.id() == id)
    }

    /// # Errors
    ///
    /// Returns [`EngineError::MeasurementNotFound`] if no measurement has this id.
    pub fn set_highlighted(
        &mut self,
        id: MeasurementId,
        highlighted: bool,
    ) -> Result<(), EngineError> {
        let measurement = self
            .measurements
            .iter_mut()
            .find(|m| m.id() == id)
            .ok_or(EngineError::MeasurementNotFound(id))?;
        measurement.set_highlighted(highlighted);
        Ok(())
    }

    /// Flips the highlight flag and returns the new state.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MeasurementNotFound`] if no measurement has this id.
    pub fn toggle_highlight(&mut self, id: MeasurementId) -> Result<bool, EngineError> {
        let current = self
            .get(id)
            .map(Measurement::is_highlighted)
            .ok_or(EngineError::MeasurementNotFound(id))?;
        self.set_highlighted(id, !current)?;
        Ok(!current)
    }

    pub fn export_all(&self) -> Vec<ExportRecord> {
        self.measurements.iter().map(ExportRecord::from).collect()
    }

    /// Panel heading, e.g. `1 measurement` or `3 measurements`.
    pub fn summary(&self) -> String {
        let n = self.measurements.len();
        format!("{} measurement{}", n, if n == 1 { "" } else { "s" })
    }
}
