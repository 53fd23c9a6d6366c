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

use crate::{Context, Error, ProvideCredential, Result, SignRequest, SigningCredential};
use std::sync::{Arc, Mutex};

/// Signer is the main struct used to sign the request.
///
/// The credential is loaded on first use and kept for the lifetime of the
/// signer; clones share it.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// The context this signer was built with.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Load the credential now instead of on the first request.
    ///
    /// Returns a configuration error if no valid credential can be found.
    pub fn preload(&self) -> Result<()> {
        self.credential().map(|_| ())
    }

    /// Sign the request parts, binding `content_digest` into the signature.
    pub fn sign(&self, req: &mut http::request::Parts, content_digest: &str) -> Result<()> {
        let cred = self.credential()?;
        self.builder
            .sign_request(&self.ctx, req, &cred, content_digest)
    }

    /// Load credential via the configured provider, caching the first valid one.
    ///
    /// # Note
    ///
    /// This function should never be exported to avoid credential leaking by
    /// mistake.
    fn credential(&self) -> Result<K> {
        let cached = self.credential.lock().expect("lock poisoned").clone();
        if let Some(cred) = cached {
            return Ok(cred);
        }

        let loaded = self.loader.provide_credential(&self.ctx)?;
        match loaded {
            Some(cred) if cred.is_valid() => {
                *self.credential.lock().expect("lock poisoned") = Some(cred.clone());
                Ok(cred)
            }
            Some(_) => Err(Error::config_invalid(
                "credential loaded but access key or private key is empty",
            )),
            None => Err(Error::config_invalid("no credential found")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use http::header::AUTHORIZATION;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug)]
    struct Key(String);

    impl SigningCredential for Key {
        fn is_valid(&self) -> bool {
            !self.0.is_empty()
        }
    }

    #[derive(Debug)]
    struct Loader {
        key: Option<&'static str>,
        calls: Arc<AtomicUsize>,
    }

    impl ProvideCredential for Loader {
        type Credential = Key;

        fn provide_credential(&self, _: &Context) -> Result<Option<Key>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.key.map(|k| Key(k.to_string())))
        }
    }

    #[derive(Debug)]
    struct Builder;

    impl SignRequest for Builder {
        type Credential = Key;

        fn sign_request(
            &self,
            _: &Context,
            req: &mut http::request::Parts,
            cred: &Key,
            content_digest: &str,
        ) -> Result<()> {
            let value = format!("{}:{}", cred.0, content_digest);
            req.headers.insert(AUTHORIZATION, value.parse()?);
            Ok(())
        }
    }

    fn parts() -> http::request::Parts {
        http::Request::post("http://api.example.com/1/kb/query.json")
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[test]
    fn test_sign_loads_credential_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let signer = Signer::new(
            Context::new(),
            Loader {
                key: Some("ak"),
                calls: calls.clone(),
            },
            Builder,
        );

        let mut req = parts();
        signer.sign(&mut req, "digest-1").unwrap();
        assert_eq!(req.headers[AUTHORIZATION], "ak:digest-1");

        let mut req = parts();
        signer.clone().sign(&mut req, "digest-2").unwrap();
        assert_eq!(req.headers[AUTHORIZATION], "ak:digest-2");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_credential_is_config_error() {
        let signer = Signer::new(
            Context::new(),
            Loader {
                key: None,
                calls: Arc::default(),
            },
            Builder,
        );

        let err = signer.preload().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let mut req = parts();
        assert!(signer.sign(&mut req, "digest").is_err());
        assert!(req.headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_empty_credential_is_rejected() {
        let signer = Signer::new(
            Context::new(),
            Loader {
                key: Some(""),
                calls: Arc::default(),
            },
            Builder,
        );

        assert!(signer.preload().unwrap_err().is_config_error());
    }
}
