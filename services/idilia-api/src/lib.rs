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

//! Idilia API signing and transport.
//!
//! This crate signs requests with the `IDILIA` scheme, encodes and decodes
//! the `multipart/mixed` bodies the service exchanges for large documents,
//! and validates responses at the transport and application layers.
//!
//! ## Quick Start
//!
//! ```no_run
//! use idilia_api::{Client, Config, DefaultCredentialProvider, FormRequest, RequestSigner};
//! use idilia_core::{Context, OsEnv, Result, Signer};
//! use idilia_http_send_reqwest::ReqwestHttpSend;
//! use std::sync::Arc;
//!
//! fn main() -> Result<()> {
//!     let config = Config::default();
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::persistent(config.timeout)?)
//!         .with_env(OsEnv);
//!
//!     let loader = DefaultCredentialProvider::new(Arc::new(config.clone()));
//!     let signer = Signer::new(ctx, loader, RequestSigner::new());
//!     let client = Client::new(signer, &config.endpoint)?;
//!
//!     let req = FormRequest::new("/1/text/match.json")
//!         .param("requestId", "mytest")
//!         .signed_param("text", "the crimson tide")
//!         .param("textMime", "text/tweet; charset=UTF-8");
//!     let payload = client.call(req)?;
//!     println!("{:?}", payload.as_json());
//!     Ok(())
//! }
//! ```
//!
//! ## Credential Sources
//!
//! ### Environment Variables
//!
//! ```bash
//! export IDILIA_ACCESS_KEY=your-access-key
//! export IDILIA_PRIVATE_KEY=your-private-key
//! ```
//!
//! ### Configuration
//!
//! Keys set on [`Config`] take precedence over the environment when using
//! [`DefaultCredentialProvider`].
//!
//! ## Multipart Requests
//!
//! ```no_run
//! # use idilia_api::MultipartRequest;
//! let req = MultipartRequest::new("/1/text/disambiguate.mpxml")
//!     .param("requestId", "mytest")
//!     .param("resultMime", "application/x-semdoc+xml+gz")
//!     .text("JFK was shot in Dallas.");
//! ```
//!
//! The signature covers the document bytes, never the envelope.

mod constants;
pub use constants::{DEFAULT_BOUNDARY, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::{RequestSigner, SigningContext};

mod error;
pub use error::{ApiError, TransportFailure};

pub mod document;
pub use document::Element;

pub mod multipart;
pub use multipart::{MultipartMessage, MultipartPart};

mod request;
pub use request::{ApiRequest, FormRequest, MultipartRequest, SignedContent};

mod response;
pub use response::{gunzip, ApiResponse};

pub mod validate;
pub use validate::{Outcome, Payload};

mod client;
pub use client::Client;
