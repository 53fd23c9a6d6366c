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

//! Failure details carried as the source of [`idilia_core::Error`].
//!
//! Recover them with [`idilia_core::Error::source_ref`].

use bytes::Bytes;
use http::StatusCode;
use idilia_core::Error;
use thiserror::Error;

/// The server answered with a status other than 200.
#[derive(Error, Debug, Clone)]
#[error("http status {status} {reason}")]
pub struct TransportFailure {
    /// HTTP status code.
    pub status: StatusCode,
    /// Reason phrase.
    pub reason: String,
    /// Decompressed response body, unparsed.
    pub body: Bytes,
}

impl From<TransportFailure> for Error {
    fn from(value: TransportFailure) -> Self {
        Error::transport_failed(value.to_string()).with_source(value)
    }
}

/// The server answered 200 but the status document carries `errorMsg`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (status {status})")]
pub struct ApiError {
    /// Content of `errorMsg`.
    pub message: String,
    /// Content of `status`, the application status code. Empty when absent.
    pub status: String,
}

impl From<ApiError> for Error {
    fn from(value: ApiError) -> Self {
        Error::api_failed(value.to_string()).with_source(value)
    }
}
