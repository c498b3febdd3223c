//! BCI simulation model: modality profiles and the metric formulas the
//! simulator page displays and users star.

pub mod advice;
pub mod metrics;
pub mod modality;

use thiserror::Error;

pub use advice::{Improvement, UseCases};
pub use metrics::{Metrics, Parameters, SimulationReport, simulate};
pub use modality::{ElectrodeRange, Modality, ModalityProfile};

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("Unknown modality: {0}")]
    UnknownModality(String),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}
