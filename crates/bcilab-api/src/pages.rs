use axum::{Extension, extract::State, response::Html};

use crate::auth::AppState;
use crate::error::ApiResult;
use crate::middleware::CurrentUser;
use crate::templates;

pub async fn simulator(Extension(user): Extension<CurrentUser>) -> Html<String> {
    Html(templates::simulator_page(&user.username))
}

pub async fn account(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Html<String>> {
    let results = state.starred.list_results(&user.id)?;
    Ok(Html(templates::account_page(&user.username, &results)))
}
