//! JSON/XML content negotiation: request body parsing and response rendering.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Document element used by the XML renderer and accepted by the parser,
/// mirroring the wire format of the original API.
const XML_ROOT: &str = "root";

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireFormat {
    Json,
    Xml,
}

impl WireFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            WireFormat::Json => "application/json",
            WireFormat::Xml => "application/xml",
        }
    }

    /// Format of the request body. No Content-Type means JSON; anything
    /// outside JSON/XML is 415.
    pub fn from_content_type(headers: &HeaderMap) -> Result<Self, AppError> {
        let Some(raw) = headers.get(header::CONTENT_TYPE) else {
            return Ok(WireFormat::Json);
        };
        let raw = raw.to_str().unwrap_or("");
        let mime = raw.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match mime.as_str() {
            "" | "application/json" => Ok(WireFormat::Json),
            "application/xml" | "text/xml" => Ok(WireFormat::Xml),
            other => Err(AppError::UnsupportedMediaType(other.to_string())),
        }
    }

    /// Format of the response body from the Accept header. The recognized
    /// media range with the highest quality value wins (ties go to the one
    /// listed first, `q=0` excludes); absent or fully unrecognized headers
    /// fall back to JSON.
    pub fn from_accept(headers: &HeaderMap) -> Self {
        let Some(raw) = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) else {
            return WireFormat::Json;
        };
        let mut best: Option<(f32, WireFormat)> = None;
        for range in raw.split(',') {
            let mut parts = range.split(';');
            let mime = parts.next().unwrap_or("").trim().to_ascii_lowercase();
            let format = match mime.as_str() {
                "application/json" | "application/*" | "*/*" => WireFormat::Json,
                "application/xml" | "text/xml" => WireFormat::Xml,
                _ => continue,
            };
            let q = parts
                .filter_map(|p| p.trim().strip_prefix("q="))
                .next()
                .and_then(|v| v.parse::<f32>().ok())
                .unwrap_or(1.0);
            if q <= 0.0 {
                continue;
            }
            if best.map_or(true, |(bq, _)| q > bq) {
                best = Some((q, format));
            }
        }
        best.map(|(_, f)| f).unwrap_or(WireFormat::Json)
    }
}

/// Extractor for the negotiated response format.
#[derive(Clone, Copy, Debug)]
pub struct ResponseFormat(pub WireFormat);

#[async_trait]
impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ResponseFormat(WireFormat::from_accept(&parts.headers)))
    }
}

/// Body extractor deserializing JSON or XML per the Content-Type header.
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let format = WireFormat::from_content_type(req.headers())?;
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("unreadable body: {}", e)))?;
        let value = parse_body(format, &bytes)?;
        Ok(Payload(value))
    }
}

fn parse_body<T: DeserializeOwned>(format: WireFormat, bytes: &[u8]) -> Result<T, AppError> {
    match format {
        WireFormat::Json => serde_json::from_slice(bytes)
            .map_err(|e| AppError::BadRequest(format!("malformed JSON body: {}", e))),
        WireFormat::Xml => {
            let text = std::str::from_utf8(bytes)
                .map_err(|_| AppError::BadRequest("body is not valid UTF-8".into()))?;
            quick_xml::de::from_str(text)
                .map_err(|e| AppError::BadRequest(format!("malformed XML body: {}", e)))
        }
    }
}

/// Response wrapper rendering the body in the negotiated format.
pub struct Rendered<T> {
    format: WireFormat,
    status: StatusCode,
    body: T,
}

impl<T: Serialize> Rendered<T> {
    pub fn ok(format: ResponseFormat, body: T) -> Self {
        Rendered {
            format: format.0,
            status: StatusCode::OK,
            body,
        }
    }

    pub fn created(format: ResponseFormat, body: T) -> Self {
        Rendered {
            format: format.0,
            status: StatusCode::CREATED,
            body,
        }
    }
}

impl<T: Serialize> IntoResponse for Rendered<T> {
    fn into_response(self) -> Response {
        let rendered = match self.format {
            WireFormat::Json => serde_json::to_string(&self.body).map_err(|e| e.to_string()),
            WireFormat::Xml => render_xml(&self.body),
        };
        match rendered {
            Ok(text) => (
                self.status,
                [(header::CONTENT_TYPE, self.format.content_type())],
                text,
            )
                .into_response(),
            Err(e) => {
                tracing::error!(error = %e, "response rendering failed");
                AppError::Internal(e).into_response()
            }
        }
    }
}

fn render_xml<T: Serialize>(body: &T) -> Result<String, String> {
    let doc = quick_xml::se::to_string_with_root(XML_ROOT, body).map_err(|e| e.to_string())?;
    Ok(format!("{}{}", XML_DECLARATION, doc))
}
