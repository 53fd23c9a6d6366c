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
use crate::Credential;
use idilia_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `IDILIA_ACCESS_KEY`: The access key
/// - `IDILIA_PRIVATE_KEY`: The private key
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let access_key = ctx.env_var(IDILIA_ACCESS_KEY);
        let private_key = ctx.env_var(IDILIA_PRIVATE_KEY);

        match (access_key, private_key) {
            (Some(ak), Some(pk)) => Ok(Some(Credential::new(ak, pk))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idilia_core::StaticEnv;
    use std::collections::HashMap;

    fn ctx_with(envs: HashMap<String, String>) -> Context {
        Context::new().with_env(StaticEnv { envs })
    }

    #[test]
    fn test_env_credential_provider() -> anyhow::Result<()> {
        let ctx = ctx_with(HashMap::from([
            (IDILIA_ACCESS_KEY.to_string(), "test_access_key".to_string()),
            (IDILIA_PRIVATE_KEY.to_string(), "test_private_key".to_string()),
        ]));

        let cred = EnvCredentialProvider::new()
            .provide_credential(&ctx)?
            .expect("credential must be loaded");
        assert_eq!(cred.access_key, "test_access_key");
        assert_eq!(cred.private_key, "test_private_key");

        Ok(())
    }

    #[test]
    fn test_env_credential_provider_partial_credentials() -> anyhow::Result<()> {
        let ctx = ctx_with(HashMap::from([(
            IDILIA_ACCESS_KEY.to_string(),
            "test_access_key".to_string(),
        )]));

        let cred = EnvCredentialProvider::new().provide_credential(&ctx)?;
        assert!(cred.is_none());

        Ok(())
    }

    #[test]
    fn test_env_credential_provider_empty_values_are_returned() -> anyhow::Result<()> {
        // Emptiness is judged by the signer, which reports it as a config error.
        let ctx = ctx_with(HashMap::from([
            (IDILIA_ACCESS_KEY.to_string(), String::new()),
            (IDILIA_PRIVATE_KEY.to_string(), String::new()),
        ]));

        let cred = EnvCredentialProvider::new().provide_credential(&ctx)?;
        assert!(cred.is_some());

        Ok(())
    }
}
