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

use crate::constants::*;
use idilia_core::Context;
use std::time::Duration;

/// Config carries all the configuration for the Idilia API client.
#[derive(Clone, Debug)]
pub struct Config {
    /// `access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`IDILIA_ACCESS_KEY`]
    pub access_key: Option<String>,
    /// `private_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`IDILIA_PRIVATE_KEY`]
    pub private_key: Option<String>,
    /// Base URL of the service, without a trailing slash.
    ///
    /// Default to `http://api.idilia.com`.
    pub endpoint: String,
    /// Connect and read timeout of the single persistent connection.
    pub timeout: Duration,
    /// Boundary used when encoding multipart requests.
    pub boundary: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_key: None,
            private_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            boundary: DEFAULT_BOUNDARY.to_string(),
        }
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Values already set on this config take precedence over the environment.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(IDILIA_ACCESS_KEY) {
            self.access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(IDILIA_PRIVATE_KEY) {
            self.private_key.get_or_insert(v);
        }

        self
    }

    /// Set the endpoint, dropping any trailing slash.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// Set the connect and read timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
