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

use crate::constants::AUTHORIZATION_SCHEME;
use crate::Credential;
use http::header::{AUTHORIZATION, DATE, HOST};
use http::HeaderValue;
use idilia_core::hash::base64_hmac_sha256;
use idilia_core::time::{format_http_date, now, DateTime};
use idilia_core::{Context, Error, Result, SignRequest};
use log::debug;

/// The four fields bound into a request signature.
///
/// Built fresh for every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext {
    /// HTTP date, the same value sent in the `Date` header.
    pub timestamp: String,
    /// Host name without port.
    pub host: String,
    /// Request path without query.
    pub path: String,
    /// Base64 MD5 of the primary content.
    pub content_digest: String,
}

impl SigningContext {
    /// Build the signing context for the given request parts.
    pub fn from_parts(
        parts: &http::request::Parts,
        time: DateTime,
        content_digest: &str,
    ) -> Result<Self> {
        let host = parts
            .uri
            .host()
            .ok_or_else(|| Error::request_invalid("request uri has no host"))?;

        Ok(Self {
            timestamp: format_http_date(time),
            host: host.to_string(),
            path: parts.uri.path().to_string(),
            content_digest: content_digest.to_string(),
        })
    }

    /// `{timestamp}-{host}-{path}-{content_digest}`
    pub fn string_to_sign(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.timestamp, self.host, self.path, self.content_digest
        )
    }

    /// Base64 HMAC-SHA256 of the string to sign, keyed by `private_key`.
    pub fn signature(&self, private_key: &str) -> String {
        base64_hmac_sha256(private_key.as_bytes(), self.string_to_sign().as_bytes())
    }
}

/// RequestSigner applies the IDILIA signature to a request.
///
/// It sets `Date`, `Host` and `Authorization`. The body is never read: the
/// caller passes the digest of the primary content.
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new request signer.
    pub fn new() -> Self {
        Self { time: None }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    fn get_time(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;

    fn sign_request(
        &self,
        _: &Context,
        req: &mut http::request::Parts,
        credential: &Self::Credential,
        content_digest: &str,
    ) -> Result<()> {
        let ctx = SigningContext::from_parts(req, self.get_time(), content_digest)?;
        let string_to_sign = ctx.string_to_sign();
        debug!("calculated string to sign: {string_to_sign}");

        let signature = ctx.signature(&credential.private_key);

        req.headers.insert(DATE, ctx.timestamp.parse()?);
        req.headers.insert(HOST, ctx.host.parse()?);

        let mut authorization: HeaderValue = format!(
            "{AUTHORIZATION_SCHEME} {}:{signature}",
            credential.access_key
        )
        .parse()?;
        authorization.set_sensitive(true);
        req.headers.insert(AUTHORIZATION, authorization);

        Ok(())
    }
}
