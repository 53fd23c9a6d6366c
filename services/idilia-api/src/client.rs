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

use crate::constants::{DEFAULT_BOUNDARY, GZIP};
use crate::request::ApiRequest;
use crate::response::ApiResponse;
use crate::validate::{validate, Payload};
use crate::Credential;
use bytes::Bytes;
use http::header::{ACCEPT_ENCODING, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method};
use idilia_core::{Result, Signer};
use log::debug;

/// Client sends signed requests to one service endpoint.
///
/// Requests are strictly sequential: each call writes one request and reads
/// the whole response before returning. The connection itself belongs to the
/// [`idilia_core::HttpSend`] configured on the signer's context.
#[derive(Debug, Clone)]
pub struct Client {
    signer: Signer<Credential>,
    endpoint: String,
    boundary: String,
}

impl Client {
    /// Create a client for `endpoint`, for example `http://api.idilia.com`.
    ///
    /// The credential is loaded here. A missing or empty credential fails
    /// with a configuration error before any request is made.
    pub fn new(signer: Signer<Credential>, endpoint: &str) -> Result<Self> {
        signer.preload()?;

        Ok(Self {
            signer,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            boundary: DEFAULT_BOUNDARY.to_string(),
        })
    }

    /// Set the boundary used for multipart requests.
    pub fn with_boundary(mut self, boundary: impl Into<String>) -> Self {
        self.boundary = boundary.into();
        self
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one unsigned request and read the response.
    ///
    /// `Accept-Encoding: gzip` is always set and gzip bodies are decompressed.
    /// The status code is not checked.
    pub fn send(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<ApiResponse> {
        let mut req = http::Request::builder()
            .method(method)
            .uri(format!("{}{}", self.endpoint, path))
            .body(())?
            .into_parts()
            .0;
        req.headers = headers;

        self.round_trip(req, body)
    }

    /// Sign and send a request.
    pub fn execute(&self, req: impl Into<ApiRequest>) -> Result<ApiResponse> {
        let req = req.into();
        let digest = req.signed_content()?.digest();
        let (content_type, body) = req.encode(&self.boundary);

        let mut parts = http::Request::post(format!("{}{}", self.endpoint, req.path()))
            .header(CONTENT_TYPE, content_type)
            .body(())?
            .into_parts()
            .0;
        self.signer.sign(&mut parts, &digest)?;

        self.round_trip(parts, body)
    }

    /// Sign and send a request, then validate the response.
    pub fn call(&self, req: impl Into<ApiRequest>) -> Result<Payload> {
        let resp = self.execute(req)?;
        validate(&resp)
    }

    fn round_trip(&self, mut parts: http::request::Parts, body: Bytes) -> Result<ApiResponse> {
        parts
            .headers
            .insert(ACCEPT_ENCODING, HeaderValue::from_static(GZIP));
        debug!("sending {} {} with {} bytes", parts.method, parts.uri, body.len());

        let resp = self
            .signer
            .context()
            .http_send(http::Request::from_parts(parts, body))?;

        ApiResponse::from_http(resp)
    }
}
