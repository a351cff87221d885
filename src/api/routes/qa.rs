//! Q&A list endpoint.
//!
//! - Formatting a question/answer list (GET|POST /process-qa)

use crate::api::envelope::{self, PayloadFormat};
use crate::api::error::ApiResult;
use crate::api::fields::RequestFields;
use crate::api::AppContext;
use crate::qa;
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tracing::info;

const QA_FIELD: &str = "qa_list";
pub const NO_QA_LIST: &str = "No QA list provided";

pub fn router() -> Router<AppContext> {
    Router::new().route("/process-qa", get(process_qa).post(process_qa))
}

/// Formats `qa_list` (a JSON array, or a string holding one) and returns it
/// as `data.formatted_qa`.
async fn process_qa(fields: RequestFields) -> ApiResult<Json<Value>> {
    let entries = qa::parse_qa_list(fields.require(QA_FIELD, NO_QA_LIST)?)?;

    info!("Formatting {} QA entries", entries.len());
    let formatted = qa::format_qa(&entries)?;

    Ok(envelope::success(
        json!({ "formatted_qa": formatted }),
        PayloadFormat::PlainText,
    ))
}
