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

//! Time related utils.

use chrono::Utc;

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// HTTP date format, RFC 1123 with an explicit `GMT` zone: "Tue, 01 Jan 2013 00:00:00 GMT"
const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Create date time from the current time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into http date: `Tue, 01 Jan 2013 00:00:00 GMT`
///
/// The value is used verbatim both in the `Date` header and in the
/// string to sign.
pub fn format_http_date(t: DateTime) -> String {
    t.format(HTTP_DATE).to_string()
}
