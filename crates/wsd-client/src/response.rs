//! Lenient decoding of the service's render response.
//!
//! The service answers with a JavaScript object literal rather than strict
//! JSON, e.g. `{img: "?png=mscKTO107", page: 0, numPages: 1, errors: []}`.
//! Older deployments answer with a query string instead
//! (`img=%3Fpng%3DmscKTO107&errors=`). Both shapes are accepted.

use percent_encoding::percent_decode_str;
use serde::Deserialize;

use crate::error::ClientError;

/// Decoded render response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderResponse {
    /// Diagram rendered; `img` is the (usually relative) image location.
    Image(String),
    /// Service rejected the diagram.
    Errors(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    img: Option<String>,
    #[serde(default)]
    errors: Option<ErrorField>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorField {
    List(Vec<String>),
    One(String),
}

impl ErrorField {
    fn into_messages(self) -> Vec<String> {
        let messages = match self {
            Self::List(list) => list,
            Self::One(message) => vec![message],
        };
        messages
            .into_iter()
            .filter(|m| !m.trim().is_empty())
            .collect()
    }
}

/// Decode a render response body.
///
/// # Errors
///
/// Returns [`ClientError::Protocol`] if the body is neither an object literal
/// nor a query string, or if it carries neither `img` nor `errors`.
pub fn decode_response(body: &str) -> Result<RenderResponse, ClientError> {
    let body = body.trim();
    let raw = if body.starts_with('{') {
        json5::from_str::<RawResponse>(body)
            .map_err(|e| ClientError::Protocol(format!("malformed object literal: {e}")))?
    } else if body.contains('=') {
        decode_query_string(body)
    } else {
        return Err(ClientError::Protocol(format!(
            "unrecognized response body: {}",
            truncate(body, 120)
        )));
    };

    let messages = raw.errors.map(ErrorField::into_messages).unwrap_or_default();
    if !messages.is_empty() {
        return Ok(RenderResponse::Errors(messages));
    }

    match raw.img {
        Some(img) if !img.trim().is_empty() => Ok(RenderResponse::Image(img.trim().to_owned())),
        _ => Err(ClientError::Protocol(
            "response has neither an image location nor errors".to_owned(),
        )),
    }
}

fn decode_query_string(body: &str) -> RawResponse {
    let mut img = None;
    let mut errors = Vec::new();
    for pair in body.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = decode_component(value);
        match key {
            "img" => img = Some(value),
            "errors" | "errors[]" => errors.push(value),
            _ => {}
        }
    }
    RawResponse {
        img,
        errors: Some(ErrorField::List(errors)),
    }
}

fn decode_component(value: &str) -> String {
    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
