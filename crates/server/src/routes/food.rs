use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::debug;
use workoutvibes_core::analysis::{has_allowed_extension, FoodAnalysis};

use super::Shared;
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    success: bool,
    #[serde(flatten)]
    analysis: FoodAnalysis,
}

/// Multipart upload: an `image` file part and an optional `filename` text
/// part that overrides the uploaded file's name as a detection hint.
pub async fn analyze(
    State(state): State<Shared>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;
    let mut hint: Option<String> = None;
    while let Some(field) = multipart.next_field().await? {
        match field.name().map(str::to_string).as_deref() {
            Some("image") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                upload = Some((file_name, field.bytes().await?));
            }
            Some("filename") => hint = Some(field.text().await?),
            _ => {}
        }
    }

    let Some((file_name, data)) = upload else {
        return Err(AppError::bad_request("No image uploaded"));
    };
    if file_name.is_empty() {
        return Err(AppError::bad_request("No image selected"));
    }
    if !has_allowed_extension(&file_name) {
        return Err(AppError::bad_request("Invalid image format"));
    }
    let filename = hint
        .filter(|h| !h.trim().is_empty())
        .unwrap_or(file_name);
    debug!(%filename, bytes = data.len(), "analysing upload");

    let analyzer = state.analyzer.clone();
    let mut rng = state.request_rng();
    let analysis =
        tokio::task::spawn_blocking(move || analyzer.analyze(&data, &filename, &mut rng)).await?;
    Ok(Json(AnalyzeResponse {
        success: true,
        analysis,
    }))
}
