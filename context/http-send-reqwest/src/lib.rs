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

//! Blocking [`HttpSend`] backed by `reqwest::blocking`.
//!
//! [`ReqwestHttpSend::persistent`] builds a client that keeps at most one idle
//! HTTP/1.1 connection per host, so sequential requests to the API host reuse
//! the same socket. The client never negotiates compression on its own: the
//! caller decides which `Accept-Encoding` to send and decompresses the body.

use std::time::Duration;

use bytes::Bytes;
use idilia_core::{Error, HttpSend, Result};
use log::debug;
use reqwest::blocking::Client;

/// HttpSend implementation on top of a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl Default for ReqwestHttpSend {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::blocking::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a sender holding one persistent HTTP/1.1 connection per host.
    ///
    /// `timeout` bounds both connecting and reading a whole response. A hung
    /// peer surfaces as a transport failure once it expires.
    pub fn persistent(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .http1_only()
            .pool_max_idle_per_host(1)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config_invalid("failed to build http client").with_source(e))?;

        Ok(Self::new(client))
    }
}

impl HttpSend for ReqwestHttpSend {
    fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        debug!("sending {} {}", parts.method, parts.uri);

        let resp = self
            .client
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers)
            .body(body.to_vec())
            .send()
            .map_err(|e| Error::transport_failed("sending request failed").with_source(e))?;

        let status = resp.status();
        let version = resp.version();
        let headers = resp.headers().clone();
        let body = resp
            .bytes()
            .map_err(|e| Error::transport_failed("reading response body failed").with_source(e))?;
        debug!("received {status} with {} body bytes", body.len());

        let mut builder = http::Response::builder().status(status).version(version);
        if let Some(h) = builder.headers_mut() {
            *h = headers;
        }

        Ok(builder.body(body)?)
    }
}
