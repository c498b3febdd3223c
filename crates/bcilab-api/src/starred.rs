use axum::{Extension, Json, extract::State};
use tracing::{debug, info};

use bcilab_types::api::{
    StarResultRequest, StarResultResponse, StarredResultsResponse, SuccessResponse,
    UnstarResultRequest, UpdateResultNameRequest,
};
use bcilab_types::models::NewStarredResult;

use crate::auth::AppState;
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::middleware::CurrentUser;

pub async fn star_result(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(req): ApiJson<StarResultRequest>,
) -> ApiResult<Json<StarResultResponse>> {
    let modality = req.modality.ok_or_else(|| ApiError::missing("modality"))?;

    let result = state.starred.add_result(
        &user.id,
        NewStarredResult {
            modality,
            parameters: req.parameters.unwrap_or_default(),
            metrics: req.metrics.unwrap_or_default(),
            name: req.name,
        },
    )?;
    info!(user_id = %user.id, result_id = %result.id, "Result starred");

    Ok(Json(StarResultResponse {
        success: true,
        result,
    }))
}

/// Removing an id that is not in the list still succeeds.
pub async fn unstar_result(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(req): ApiJson<UnstarResultRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let id = req.id.ok_or_else(|| ApiError::missing("id"))?;

    if state.starred.remove_result(&user.id, &id)? {
        info!(user_id = %user.id, result_id = %id, "Result unstarred");
    } else {
        debug!(user_id = %user.id, result_id = %id, "Unstar of unknown result ignored");
    }

    Ok(Json(SuccessResponse::ok()))
}

pub async fn get_starred_results(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<StarredResultsResponse>> {
    let results = state.starred.list_results(&user.id)?;
    Ok(Json(StarredResultsResponse {
        success: true,
        results,
    }))
}

pub async fn update_result_name(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(req): ApiJson<UpdateResultNameRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let id = req.id.ok_or_else(|| ApiError::missing("id"))?;
    let name = req.name.ok_or_else(|| ApiError::missing("name"))?;

    if !state.starred.rename_result(&user.id, &id, &name)? {
        return Err(ApiError::NotFound("Result"));
    }
    info!(user_id = %user.id, result_id = %id, "Result renamed");

    Ok(Json(SuccessResponse::ok()))
}
