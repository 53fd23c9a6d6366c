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

use crate::constants::GZIP;
use bytes::Bytes;
use flate2::read::GzDecoder;
use http::header::{CONTENT_ENCODING, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};
use idilia_core::{Error, Result};
use std::io::Read;

/// A response as read off the wire.
///
/// Only a `200 OK` body is decompressed. Any other status keeps the body as
/// received, since error pages from proxies often declare an encoding they
/// do not use.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    raw_body: Bytes,
    body: Bytes,
}

impl ApiResponse {
    /// Build from an HTTP response, gunzipping a `200 OK` body when the
    /// server declared `Content-Encoding: gzip`.
    pub fn from_http(resp: http::Response<Bytes>) -> Result<Self> {
        let (parts, raw_body) = resp.into_parts();

        let gzipped = parts.status == StatusCode::OK
            && parts
            .headers
            .get(CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim().eq_ignore_ascii_case(GZIP));
        let body = if gzipped {
            gunzip(&raw_body)?
        } else {
            raw_body.clone()
        };

        Ok(Self {
            status: parts.status,
            headers: parts.headers,
            raw_body,
            body,
        })
    }

    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Canonical reason phrase of the status code.
    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or_default()
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Value of the `Content-Type` header.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// Body bytes exactly as received.
    pub fn raw_body(&self) -> &Bytes {
        &self.raw_body
    }

    /// Body after decompression. Equal to the raw body when not gzipped or
    /// when the status is not `200 OK`.
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

/// Decompress a gzip stream.
pub fn gunzip(data: &[u8]) -> Result<Bytes> {
    let mut out = Vec::new();
    GzDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|e| Error::unexpected("failed to gunzip content").with_source(e))?;
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use idilia_core::ErrorKind;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_plain_body_is_kept() {
        let resp = http::Response::builder()
            .status(200)
            .header(CONTENT_TYPE, "application/json")
            .body(Bytes::from_static(br#"{"requestId":"mytest"}"#))
            .unwrap();

        let resp = ApiResponse::from_http(resp).unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.reason(), "OK");
        assert_eq!(resp.content_type(), Some("application/json"));
        assert_eq!(resp.body(), resp.raw_body());
    }

    #[test]
    fn test_gzip_body_is_decompressed() {
        let compressed = gzip(br#"{"requestId":"mytest"}"#);
        let resp = http::Response::builder()
            .status(200)
            .header(CONTENT_ENCODING, "gzip")
            .body(Bytes::from(compressed.clone()))
            .unwrap();

        let resp = ApiResponse::from_http(resp).unwrap();
        assert_eq!(resp.raw_body().as_ref(), compressed.as_slice());
        assert_eq!(resp.body().as_ref(), br#"{"requestId":"mytest"}"#);
    }

    #[test]
    fn test_error_status_body_is_left_raw() {
        let resp = http::Response::builder()
            .status(502)
            .header(CONTENT_ENCODING, "gzip")
            .body(Bytes::from_static(b"<html>Bad Gateway</html>"))
            .unwrap();

        let resp = ApiResponse::from_http(resp).unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(resp.body().as_ref(), b"<html>Bad Gateway</html>");
        assert_eq!(resp.body(), resp.raw_body());
    }

    #[test]
    fn test_invalid_gzip_with_ok_status_fails() {
        let resp = http::Response::builder()
            .status(200)
            .header(CONTENT_ENCODING, "gzip")
            .body(Bytes::from_static(b"plain"))
            .unwrap();

        let err = ApiResponse::from_http(resp).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn test_invalid_gzip_fails() {
        let err = gunzip(b"definitely not gzip").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }
}
