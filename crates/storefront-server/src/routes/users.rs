use axum::extract::{Query, State};
use axum::Json;

use storefront_core::user::User;
use storefront_core::StorefrontError;

use crate::error::AppError;
use crate::state::UserState;

#[derive(serde::Deserialize)]
pub struct LookupParams {
    #[serde(default)]
    id: Option<String>,
}

/// GET /user?id=<int> — point lookup into the directory.
pub async fn get_user(
    State(state): State<UserState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<User>, AppError> {
    let raw = params
        .id
        .ok_or_else(|| AppError::bad_request("missing query parameter: id"))?;
    let id: i32 = raw
        .parse()
        .map_err(|_| AppError::bad_request(format!("invalid id '{raw}': must be an integer")))?;

    let user = state
        .directory
        .lookup(id)
        .ok_or(StorefrontError::UserNotFound(id))?;

    Ok(Json(user))
}

/// GET /users — list all users.
pub async fn list_users(State(state): State<UserState>) -> Json<Vec<User>> {
    Json(state.directory.list())
}
