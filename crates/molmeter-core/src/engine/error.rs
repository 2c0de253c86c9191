use crate::core::models::ids::MeasurementId;
use crate::core::models::measurement::MeasurementError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum EngineError {
    #[error("No measurement with id {0}")]
    MeasurementNotFound(MeasurementId),

    #[error("Invalid measurement: {source}")]
    InvalidMeasurement {
        #[from]
        source: MeasurementError,
    },
}
