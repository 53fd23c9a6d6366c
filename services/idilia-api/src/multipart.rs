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

//! `multipart/mixed` encoder and decoder.
//!
//! Decoding works on raw bytes so that gzip compressed parts survive intact.
//! Payloads are never escaped: the boundary must not occur inside any part.

use crate::constants::{DEFAULT_BOUNDARY, MULTIPART_MIXED};
use crate::response::gunzip;
use bytes::{BufMut, Bytes, BytesMut};
use http::header::CONTENT_TYPE;
use idilia_core::{Error, Result};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

static BOUNDARY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"boundary="?([-\w]*)(?:$|"|;)"#).unwrap());

const CRLF: &[u8] = b"\r\n";
const HEADER_SEPARATOR: &[u8] = b"\r\n\r\n";

/// One part of a multipart message: ordered headers and a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPart {
    headers: Vec<(String, String)>,
    payload: Bytes,
}

impl MultipartPart {
    /// Create a part without headers.
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            headers: Vec::new(),
            payload: payload.into(),
        }
    }

    /// Append a header, keeping insertion order.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Headers in the order they were added or decoded.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First header matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Value of the part's `Content-Type` header.
    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE.as_str())
    }

    /// Raw payload bytes.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Consume the part, returning its payload.
    pub fn into_payload(self) -> Bytes {
        self.payload
    }

    /// Decompress a gzip payload.
    ///
    /// Result documents of multipart responses are usually sent this way.
    pub fn gunzip(&self) -> Result<Bytes> {
        gunzip(&self.payload)
    }
}

/// An ordered list of parts sharing one boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartMessage {
    boundary: String,
    parts: Vec<MultipartPart>,
}

impl Default for MultipartMessage {
    fn default() -> Self {
        Self::new(DEFAULT_BOUNDARY)
    }
}

impl MultipartMessage {
    /// Create an empty message using `boundary`.
    pub fn new(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    /// Append a part.
    pub fn with_part(mut self, part: MultipartPart) -> Self {
        self.push(part);
        self
    }

    /// Append a part in place.
    pub fn push(&mut self, part: MultipartPart) {
        self.parts.push(part);
    }

    /// The boundary token, without leading dashes.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Parts in wire order.
    pub fn parts(&self) -> &[MultipartPart] {
        &self.parts
    }

    /// Consume the message, returning its parts.
    pub fn into_parts(self) -> Vec<MultipartPart> {
        self.parts
    }

    /// `multipart/mixed; boundary={boundary}`
    pub fn content_type(&self) -> String {
        format!("{MULTIPART_MIXED}; boundary={}", self.boundary)
    }

    /// Serialize the message body.
    pub fn encode(&self) -> Bytes {
        let delimiter = format!("--{}", self.boundary);

        let mut buf = BytesMut::new();
        for part in &self.parts {
            if find_bytes(&part.payload, delimiter.as_bytes()).is_some() {
                warn!("multipart payload contains the boundary {}", self.boundary);
            }

            buf.put_slice(delimiter.as_bytes());
            buf.put_slice(CRLF);

            let headers = part
                .headers
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join("\r\n");
            buf.put_slice(headers.as_bytes());
            buf.put_slice(HEADER_SEPARATOR);
            buf.put_slice(&part.payload);
            buf.put_slice(CRLF);
        }
        if self.parts.is_empty() {
            buf.put_slice(delimiter.as_bytes());
            buf.put_slice(CRLF);
        }
        buf.put_slice(delimiter.as_bytes());
        buf.put_slice(b"--");

        buf.freeze()
    }

    /// Parse a body whose `Content-Type` is `content_type`.
    ///
    /// The prologue before the first delimiter and the epilogue after the
    /// closing one are ignored.
    pub fn decode(content_type: &str, body: &[u8]) -> Result<Self> {
        let boundary = parse_boundary(content_type)?;
        let delimiter = format!("--{boundary}");

        let segments = split_bytes(body, delimiter.as_bytes());
        if segments.len() < 2 {
            return Err(Error::multipart_malformed(format!(
                "body does not contain the delimiter {delimiter}"
            )));
        }

        let (last, interior) = segments[1..]
            .split_last()
            .ok_or_else(|| Error::multipart_malformed("body has no parts"))?;
        if !last.starts_with(b"--") {
            return Err(Error::multipart_malformed(format!(
                "body is missing the closing delimiter {delimiter}--"
            )));
        }

        let parts = interior
            .iter()
            .map(|segment| decode_part(segment))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { boundary, parts })
    }
}

/// Extract the `boundary` attribute of a multipart content type.
///
/// The value may be quoted and ends at the end of input, a quote or `;`.
pub fn parse_boundary(content_type: &str) -> Result<String> {
    let boundary = BOUNDARY_REGEX
        .captures(content_type)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or_default();

    if boundary.is_empty() {
        return Err(Error::multipart_malformed(format!(
            "no boundary in content type {content_type:?}"
        )));
    }

    Ok(boundary.to_string())
}

fn decode_part(segment: &[u8]) -> Result<MultipartPart> {
    let segment = segment.strip_prefix(CRLF).unwrap_or(segment);
    let segment = segment.strip_suffix(CRLF).unwrap_or(segment);

    let pos = find_bytes(segment, HEADER_SEPARATOR)
        .ok_or_else(|| Error::multipart_malformed("part has no header separator"))?;
    let (block, payload) = (&segment[..pos], &segment[pos + HEADER_SEPARATOR.len()..]);

    let block = std::str::from_utf8(block).map_err(|e| {
        Error::multipart_malformed("part headers are not valid utf-8").with_source(e)
    })?;

    let mut headers = Vec::new();
    if !block.is_empty() {
        for line in block.split("\r\n") {
            let (name, value) = line.split_once(": ").ok_or_else(|| {
                Error::multipart_malformed(format!("invalid part header line {line:?}"))
            })?;
            headers.push((name.to_string(), value.to_string()));
        }
    }

    Ok(MultipartPart {
        headers,
        payload: Bytes::copy_from_slice(payload),
    })
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn split_bytes<'a>(mut haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut out = Vec::new();
    while let Some(pos) = find_bytes(haystack, needle) {
        out.push(&haystack[..pos]);
        haystack = &haystack[pos + needle.len()..];
    }
    out.push(haystack);
    out
}
