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

use crate::provide_credential::{ConfigCredentialProvider, EnvCredentialProvider};
use crate::{Config, Credential};
use idilia_core::{Context, ProvideCredential, ProvideCredentialChain, Result};
use std::sync::Arc;

/// DefaultCredentialProvider will try to load credential from different sources.
///
/// Resolution order:
///
/// 1. Keys set on the [`Config`]
/// 2. Environment variables
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new(Arc::new(Config::default()))
    }
}

impl DefaultCredentialProvider {
    /// Create a new `DefaultCredentialProvider` instance.
    pub fn new(config: Arc<Config>) -> Self {
        let chain = ProvideCredentialChain::new()
            .push(ConfigCredentialProvider::new(config))
            .push(EnvCredentialProvider::new());

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }

    /// Add a credential provider to the front of the default chain.
    ///
    /// # Example
    ///
    /// ```
    /// use idilia_api::{DefaultCredentialProvider, StaticCredentialProvider};
    ///
    /// let provider = DefaultCredentialProvider::default()
    ///     .push_front(StaticCredentialProvider::new("access_key", "private_key"));
    /// ```
    pub fn push_front(mut self, provider: impl ProvideCredential<Credential = Credential>) -> Self {
        self.chain = self.chain.push_front(provider);
        self
    }
}

impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use idilia_core::StaticEnv;
    use std::collections::HashMap;

    fn ctx_with(envs: HashMap<String, String>) -> Context {
        Context::new().with_env(StaticEnv { envs })
    }

    #[test]
    fn test_default_loader_without_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let loader = DefaultCredentialProvider::default();
        let credential = loader.provide_credential(&ctx_with(HashMap::new())).unwrap();

        assert!(credential.is_none());
    }

    #[test]
    fn test_default_loader_with_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = ctx_with(HashMap::from([
            (IDILIA_ACCESS_KEY.to_string(), "access_key".to_string()),
            (IDILIA_PRIVATE_KEY.to_string(), "private_key".to_string()),
        ]));

        let loader = DefaultCredentialProvider::default();
        let credential = loader.provide_credential(&ctx).unwrap().unwrap();

        assert_eq!("access_key", credential.access_key);
        assert_eq!("private_key", credential.private_key);
    }

    #[test]
    fn test_default_loader_prefers_config() {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = ctx_with(HashMap::from([
            (IDILIA_ACCESS_KEY.to_string(), "env_access".to_string()),
            (IDILIA_PRIVATE_KEY.to_string(), "env_private".to_string()),
        ]));
        let config = Config {
            access_key: Some("config_access".to_string()),
            private_key: Some("config_private".to_string()),
            ..Default::default()
        };

        let loader = DefaultCredentialProvider::new(Arc::new(config));
        let credential = loader.provide_credential(&ctx).unwrap().unwrap();

        assert_eq!("config_access", credential.access_key);
    }
}
