//! Request field extraction shared by the processing endpoints.
//!
//! GET requests read the query string. POST requests read a JSON object
//! body, a urlencoded form, or the text parts of a multipart form, chosen by
//! content type. Bodies of any other type yield no fields. A body that cannot
//! be decoded is a processing failure (500), not a missing field.

use super::error::{ApiError, ApiResult};
use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Query, Request},
    http::{header, HeaderMap, Method},
    Form, Json,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Named request fields, whatever transport they arrived in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestFields(pub Map<String, Value>);

impl RequestFields {
    fn from_strings(params: HashMap<String, String>) -> Self {
        Self(
            params
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a required field, failing with a 400 carrying `missing_message`.
    pub fn require(&self, key: &str, missing_message: &str) -> ApiResult<&Value> {
        self.get(key)
            .ok_or_else(|| ApiError::missing_field(missing_message))
    }
}

#[async_trait]
impl<S> FromRequest<S> for RequestFields
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.method() == Method::GET {
            let Query(params) = Query::<HashMap<String, String>>::try_from_uri(req.uri())
                .map_err(|e| ApiError::invalid_body(e.body_text()))?;
            return Ok(Self::from_strings(params));
        }

        match body_kind(req.headers()) {
            BodyKind::Json => {
                let Json(value) = Json::<Value>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::invalid_body(e.body_text()))?;
                match value {
                    Value::Object(map) => Ok(Self(map)),
                    _ => Ok(Self::default()),
                }
            }
            BodyKind::Form => {
                let Form(params) = Form::<HashMap<String, String>>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::invalid_body(e.body_text()))?;
                Ok(Self::from_strings(params))
            }
            BodyKind::Multipart => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::invalid_body(e.body_text()))?;
                Ok(Self::from_strings(read_text_parts(multipart).await?))
            }
            BodyKind::Other => Ok(Self::default()),
        }
    }
}

/// Collect the text parts of a multipart body; file uploads are skipped.
async fn read_text_parts(mut multipart: Multipart) -> ApiResult<HashMap<String, String>> {
    let mut params = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_body(format!("Multipart error: {}", e)))?
    {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(|n| n.to_string()) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| ApiError::invalid_body(format!("Read error: {}", e)))?;
        params.entry(name).or_insert(value);
    }

    Ok(params)
}

#[derive(Debug, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Multipart,
    Other,
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let essence = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if essence == "application/json" || essence.ends_with("+json") {
        BodyKind::Json
    } else if essence == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else if essence == "multipart/form-data" {
        BodyKind::Multipart
    } else {
        BodyKind::Other
    }
}
