//! Meeting block endpoint.
//!
//! - Formatting a raw meeting string (GET|POST /process-meeting)

use crate::api::envelope::{self, PayloadFormat};
use crate::api::error::{ApiError, ApiResult};
use crate::api::fields::RequestFields;
use crate::api::AppContext;
use crate::meeting;
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tracing::info;

const MEETING_FIELD: &str = "meeting_string";
pub const NO_MEETING_STRING: &str = "No meeting string provided";

pub fn router() -> Router<AppContext> {
    Router::new().route(
        "/process-meeting",
        get(process_meeting).post(process_meeting),
    )
}

/// Parses the meeting block in `meeting_string` and returns the report as
/// `data.message`.
///
/// Host JSON problems are reported as 500s; guest problems only drop the
/// guest list.
async fn process_meeting(fields: RequestFields) -> ApiResult<Json<Value>> {
    let raw = fields
        .require(MEETING_FIELD, NO_MEETING_STRING)?
        .as_str()
        .ok_or_else(|| {
            ApiError::internal("meeting_string must be a string", "InvalidFieldType")
        })?;

    info!("Processing meeting string ({} bytes)", raw.len());
    let message = meeting::process_meeting(raw)?;

    Ok(envelope::success(
        json!({ "message": message }),
        PayloadFormat::Docstring,
    ))
}
