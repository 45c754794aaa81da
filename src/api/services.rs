use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Method, header},
    response::IntoResponse,
};
use tracing::Instrument;
use uuid::Uuid;

use super::{dispatch::dispatch, error::DispatchError, state::AppState};

/// Thumbnail endpoint (POST, any path)
///
/// ## Flow:
/// 1. Validate method and Content-Type (400 on any violation, empty body)
/// 2. `image/<format>`: read the body and resize it to 100x100
/// 3. `<major>/<label>`: render the label (at most 4 characters) on a 100x100 canvas
/// 4. Return 200 `image/png` with the complete thumbnail
///
/// The converter output is buffered before the status is written, so a failing
/// conversion always surfaces as a 500 `text/plain` response carrying the error.
pub async fn thumbnail(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Result<impl IntoResponse, DispatchError> {
    let content_type = headers.get(header::CONTENT_TYPE).cloned();
    let span = tracing::info_span!(
        "thumbnail",
        request_id = %Uuid::now_v7(),
        %method,
        content_type = ?content_type,
    );

    async move {
        match dispatch(state.converter.as_ref(), &method, content_type.as_ref(), body).await {
            Ok(png) => {
                tracing::info!(bytes = png.len(), "Thumbnail rendered");
                state.metrics.thumbnail_rendered();
                Ok(([(header::CONTENT_TYPE, mime::IMAGE_PNG.to_string())], png))
            }
            Err(err) => {
                match &err {
                    DispatchError::BadRequest => state.metrics.request_rejected(),
                    DispatchError::ConversionFailed(cause) => {
                        tracing::warn!(error = %cause, "Thumbnail conversion failed");
                        state.metrics.conversion_failed();
                    }
                }
                Err(err)
            }
        }
    }
    .instrument(span)
    .await
}
