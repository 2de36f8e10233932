// HTTP request handlers
use crate::application::error::VisualError;
use crate::domain::data_view::DataView;
use crate::domain::visual::Visual;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub data_view: DataView,
    /// Partial settings for this update only
    #[serde(default)]
    pub settings: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_status(error: &VisualError) -> StatusCode {
    match error {
        VisualError::UnknownVisual(_) => StatusCode::NOT_FOUND,
        VisualError::InvalidSettings(_) => StatusCode::BAD_REQUEST,
        VisualError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn respond<T: Serialize>(status: StatusCode, data: &T, compress: bool) -> Response {
    match json_response(status, data, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List all configured visuals
pub async fn list_visuals(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);

    match state.visual_service.list_visuals().await {
        Ok(visuals) => respond(StatusCode::OK, &visuals, compress).await,
        Err(e) => {
            tracing::error!("Error listing visuals: {}", e);
            // Return empty list on error
            respond(StatusCode::OK, &Vec::<Visual>::new(), compress).await
        }
    }
}

/// Build and classify one update of a visual
pub async fn render_visual(
    Path(id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    request: Result<Json<RenderRequest>, JsonRejection>,
) -> Response {
    let compress = accepts_brotli(&headers);

    let request = match request {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("Rejected render of visual {}: {}", id, rejection);
            let body = ErrorBody {
                error: rejection.body_text(),
            };
            return respond(rejection.status(), &body, compress).await;
        }
    };

    match state
        .visual_service
        .render(&id, &request.data_view, request.settings.as_ref())
        .await
    {
        Ok(rendered) => respond(StatusCode::OK, &rendered, compress).await,
        Err(e) => {
            let status = error_status(&e);
            if status.is_server_error() {
                tracing::error!("Error rendering visual {}: {}", id, e);
            } else {
                tracing::warn!("Rejected render of visual {}: {}", id, e);
            }
            let body = ErrorBody {
                error: e.to_string(),
            };
            respond(status, &body, compress).await
        }
    }
}
