use axum::{
    Json,
    response::{IntoResponse, Response},
};
use storage::dto::vocabulary::VocabularyResponse;

#[utoipa::path(
    get,
    path = "/api/vocabulary",
    responses(
        (status = 200, description = "Levels, sports by level and positions by sport", body = VocabularyResponse)
    ),
    tag = "vocabulary"
)]
pub async fn get_vocabulary() -> Response {
    Json(VocabularyResponse::build()).into_response()
}
