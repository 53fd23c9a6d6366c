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

use std::time::Duration;

// Env values used by the idilia api.
pub const IDILIA_ACCESS_KEY: &str = "IDILIA_ACCESS_KEY";
pub const IDILIA_PRIVATE_KEY: &str = "IDILIA_PRIVATE_KEY";

// Service defaults.
pub const DEFAULT_ENDPOINT: &str = "http://api.idilia.com";
/// Slightly above the service's own 3600s processing timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3600 + 60);
pub const DEFAULT_BOUNDARY: &str = "--------YmM9XyV7I10ncTJJSzZD";

// Authorization scheme.
pub const AUTHORIZATION_SCHEME: &str = "IDILIA";

// Content types.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=UTF-8";
pub const MULTIPART_MIXED: &str = "multipart/mixed";

// Content encodings.
pub const GZIP: &str = "gzip";

// Fields of the status document carried in every response.
pub const ERROR_MSG_FIELD: &str = "errorMsg";
pub const STATUS_FIELD: &str = "status";
pub const REQUEST_ID_FIELD: &str = "requestId";
