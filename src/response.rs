use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

/// Page model handed to the client-side view, wrapped in the success envelope
#[derive(Debug)]
pub struct PageResponse<T: Serialize> {
    pub view: &'static str,
    pub data: T,
}

impl<T: Serialize> PageResponse<T> {
    /// Render `view` with `data` and a 200 status
    pub fn view(view: &'static str, data: T) -> Self {
        Self { view, data }
    }
}

impl<T: Serialize> IntoResponse for PageResponse<T> {
    fn into_response(self) -> Response {
        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize page data for {}: {}", self.view, e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": "Failed to serialize page data"
                    })),
                )
                    .into_response();
            }
        };

        (StatusCode::OK, Json(page_envelope(self.view, data_value))).into_response()
    }
}

fn page_envelope(view: &str, data: Value) -> Value {
    json!({
        "success": true,
        "view": view,
        "data": data
    })
}
