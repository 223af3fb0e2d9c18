use axum::extract::State;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::models::MediaCheckRequest;
use crate::repositories::MediaRepository;
use crate::state::AppState;

/// Webhook gating a download decision for autobrr.
///
/// Resolves the title/year pair to an IMDB id via live search, then
/// checks whether that id is present in the popularity catalog:
/// 200 = download, 404 = unknown or not popular, 500 = lookup failed.
pub async fn media_check(
    State(state): State<AppState>,
    Json(request): Json<MediaCheckRequest>,
) -> AppResult<&'static str> {
    tracing::info!(?request, "received media check request, searching for imdb id");

    let id = match state.imdb.find_id(&request.title, request.year).await {
        Ok(Some(id)) => id,
        Ok(None) => {
            tracing::info!(title = %request.title, year = request.year, "media not found");
            return Err(AppError::not_found("media not found"));
        }
        Err(error) => {
            tracing::error!(%error, "failed to search for media");
            return Err(AppError::internal("failed to search for media"));
        }
    };

    tracing::info!(%id, "found media");

    match MediaRepository::exists(&state.db, &id).await {
        Ok(true) => {
            tracing::info!(%id, "media should be downloaded");
            Ok("media should be downloaded")
        }
        Ok(false) => {
            tracing::info!(%id, "media should not be downloaded");
            Err(AppError::not_found("media should not be downloaded"))
        }
        Err(error) => {
            tracing::error!(%error, "failed to check if media should be downloaded");
            Err(AppError::internal(
                "failed to check if media should be downloaded",
            ))
        }
    }
}
