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

//! Idilia API support with convenience APIs
//!
//! This module re-exports the signing, multipart and validation types along
//! with a constructor for a ready to use client.

pub use idilia_api::*;

#[cfg(feature = "default-context")]
use crate::{default_context, Result, Signer};
#[cfg(feature = "default-context")]
use std::sync::Arc;

/// Default Idilia signer type.
pub type DefaultSigner = idilia_core::Signer<Credential>;

/// Create a client with standard configuration
///
/// This function creates a client with:
/// - Default context (persistent reqwest connection, OS environment)
/// - Default credential provider (keys on `config`, then env vars)
/// - The endpoint, timeout and boundary of `config`
///
/// Fails with a configuration error when no credential can be found.
///
/// # Example
///
/// ```no_run
/// # fn main() -> idilia_core::Result<()> {
/// use idilia::api::{default_client, Config};
///
/// let client = default_client(Config::default())?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "default-context")]
pub fn default_client(config: Config) -> Result<Client> {
    let ctx = default_context(config.timeout)?;
    let provider = DefaultCredentialProvider::new(Arc::new(config.clone()));
    let signer = Signer::new(ctx, provider, RequestSigner::new());

    Ok(Client::new(signer, &config.endpoint)?.with_boundary(config.boundary))
}
