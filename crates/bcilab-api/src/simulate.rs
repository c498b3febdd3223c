use axum::Json;
use serde::{Deserialize, Serialize};

use bcilab_sim::{Modality, ModalityProfile, Parameters, SimulationReport};

use crate::error::{ApiError, ApiJson, ApiResult};

#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
    pub modality: Option<String>,
    pub parameters: Option<Parameters>,
}

#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub success: bool,
    pub report: SimulationReport,
}

#[derive(Debug, Serialize)]
pub struct ModalitiesResponse {
    pub success: bool,
    pub modalities: Vec<ModalityProfile>,
}

pub async fn list_modalities() -> Json<ModalitiesResponse> {
    Json(ModalitiesResponse {
        success: true,
        modalities: Modality::catalogue(),
    })
}

pub async fn simulate(ApiJson(req): ApiJson<SimulateRequest>) -> ApiResult<Json<SimulateResponse>> {
    let modality: Modality = req
        .modality
        .ok_or_else(|| ApiError::missing("modality"))?
        .parse()?;
    let parameters = req.parameters.ok_or_else(|| ApiError::missing("parameters"))?;

    let report = bcilab_sim::simulate(modality, parameters)?;
    Ok(Json(SimulateResponse {
        success: true,
        report,
    }))
}
