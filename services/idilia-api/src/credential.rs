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

use idilia_core::utils::Redact;
use idilia_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Credential that holds the access key and the private key.
///
/// The access key travels in the `Authorization` header, the private key only
/// ever keys the HMAC.
#[derive(Default, Clone)]
pub struct Credential {
    /// Public access key identifying the project.
    pub access_key: String,
    /// Private key used to compute request signatures.
    pub private_key: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(access_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            private_key: private_key.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key", &Redact::from(&self.access_key))
            .field("private_key", &Redact::from(&self.private_key))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.access_key.is_empty() && !self.private_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid() {
        assert!(Credential::new("ak", "pk").is_valid());
        assert!(!Credential::new("", "pk").is_valid());
        assert!(!Credential::new("ak", "").is_valid());
        assert!(!Credential::default().is_valid());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let cred = Credential::new("ACCESSKEY0000001", "supersecretprivatekey");
        let s = format!("{cred:?}");
        assert!(!s.contains("supersecretprivatekey"));
        assert!(s.contains("sup***key"));
        assert!(s.contains("ACC***001"));
    }
}
