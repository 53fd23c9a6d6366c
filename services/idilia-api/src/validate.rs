// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Two layer response validation.
//!
//! A response is first checked at the transport layer: anything but
//! `200 OK` fails without looking at the body. A 200 body is then parsed and
//! its status document inspected for `errorMsg`, which the service uses to
//! report application errors.

use crate::constants::{ERROR_MSG_FIELD, REQUEST_ID_FIELD, STATUS_FIELD};
use crate::document::Element;
use crate::error::{ApiError, TransportFailure};
use crate::multipart::{MultipartMessage, MultipartPart};
use crate::response::ApiResponse;
use http::StatusCode;
use idilia_core::{Error, Result};
use log::debug;
use serde_json::Value;

/// A parsed response document.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A JSON document.
    Json(Value),
    /// An XML document.
    Xml(Element),
    /// A multipart response: a status document followed by result parts.
    ///
    /// Result parts are left as received, usually gzip compressed. Use
    /// [`MultipartPart::gunzip`] and [`Payload::parse`] to read them.
    Multipart {
        /// The parsed first part.
        status: Box<Payload>,
        /// Every part after the first.
        parts: Vec<MultipartPart>,
    },
}

impl Payload {
    /// Parse `body` according to `content_type`.
    ///
    /// When the content type is missing or names neither JSON, XML nor
    /// multipart, the first non blank byte picks the parser.
    pub fn parse(content_type: Option<&str>, body: &[u8]) -> Result<Self> {
        let media_type = content_type
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if media_type.starts_with("multipart/") {
            // Only reachable with a content type, which holds the boundary.
            return Self::parse_multipart(content_type.unwrap_or_default(), body);
        }
        if media_type.contains("json") {
            return Self::parse_json(body);
        }
        if media_type.contains("xml") {
            return Self::parse_xml(body);
        }

        match body.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') | Some(b'[') => Self::parse_json(body),
            Some(b'<') => Self::parse_xml(body),
            _ => Err(Error::unexpected(format!(
                "unrecognized response content of type {media_type:?}"
            ))),
        }
    }

    fn parse_json(body: &[u8]) -> Result<Self> {
        let value = serde_json::from_slice(body)
            .map_err(|e| Error::unexpected("failed to parse json").with_source(e))?;
        Ok(Payload::Json(value))
    }

    fn parse_xml(body: &[u8]) -> Result<Self> {
        Ok(Payload::Xml(Element::parse(body)?))
    }

    fn parse_multipart(content_type: &str, body: &[u8]) -> Result<Self> {
        let mut parts = MultipartMessage::decode(content_type, body)?.into_parts();
        if parts.is_empty() {
            return Err(Error::multipart_malformed(
                "multipart response has no status part",
            ));
        }

        let first = parts.remove(0);
        let status = Payload::parse(first.content_type(), first.payload())?;

        Ok(Payload::Multipart {
            status: Box::new(status),
            parts,
        })
    }

    /// The document carrying `requestId`, `status` and `errorMsg`.
    pub fn status_document(&self) -> &Payload {
        match self {
            Payload::Multipart { status, .. } => status.status_document(),
            _ => self,
        }
    }

    /// The application error reported by the status document, if any.
    pub fn error(&self) -> Option<ApiError> {
        let message = self.status_field(ERROR_MSG_FIELD)?;
        let status = self.status_field(STATUS_FIELD).unwrap_or_default();
        Some(ApiError { message, status })
    }

    /// Value of `requestId` echoed by the service.
    pub fn request_id(&self) -> Option<String> {
        self.status_field(REQUEST_ID_FIELD)
    }

    fn status_field(&self, name: &str) -> Option<String> {
        match self.status_document() {
            Payload::Json(value) => match value.get(name)? {
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            },
            Payload::Xml(root) => root.child(name).map(|e| e.text().to_string()),
            Payload::Multipart { .. } => None,
        }
    }

    /// The JSON value, when this is a JSON payload.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(v) => Some(v),
            _ => None,
        }
    }

    /// The root element, when this is an XML payload.
    pub fn as_xml(&self) -> Option<&Element> {
        match self {
            Payload::Xml(e) => Some(e),
            _ => None,
        }
    }

    /// Result parts of a multipart payload. Empty for other payloads.
    pub fn parts(&self) -> &[MultipartPart] {
        match self {
            Payload::Multipart { parts, .. } => parts,
            _ => &[],
        }
    }
}

/// Outcome of a response that passed the transport gate.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The service processed the request.
    Success(Payload),
    /// The service answered 200 but reported an error.
    Failure(ApiError),
}

impl Outcome {
    /// Returns true if the service reported no error.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Turn a failure into an [`idilia_core::ErrorKind::ApiFailed`] error.
    pub fn into_result(self) -> Result<Payload> {
        match self {
            Outcome::Success(payload) => Ok(payload),
            Outcome::Failure(err) => Err(err.into()),
        }
    }
}

/// Fail with [`TransportFailure`] unless the status is `200 OK`.
///
/// The body is carried exactly as received, without decoding or parsing.
pub fn check_transport(resp: &ApiResponse) -> Result<()> {
    if resp.status() == StatusCode::OK {
        return Ok(());
    }

    Err(TransportFailure {
        status: resp.status(),
        reason: resp.reason().to_string(),
        body: resp.raw_body().clone(),
    }
    .into())
}

/// Run both gates, returning application errors as [`Outcome::Failure`].
pub fn inspect(resp: &ApiResponse) -> Result<Outcome> {
    check_transport(resp)?;

    let payload = Payload::parse(resp.content_type(), resp.body())?;
    let outcome = match payload.error() {
        Some(err) => {
            debug!("service reported error: {err}");
            Outcome::Failure(err)
        }
        None => Outcome::Success(payload),
    };

    Ok(outcome)
}

/// Run both gates, returning application errors as errors.
pub fn validate(resp: &ApiResponse) -> Result<Payload> {
    inspect(resp)?.into_result()
}
