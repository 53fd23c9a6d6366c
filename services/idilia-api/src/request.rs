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

//! Request shapes accepted by the service.
//!
//! Every request names the content its signature covers. For a form request
//! that is the value of one parameter, for a multipart request the bytes of
//! its document parts. The envelope around them is never digested.

use crate::constants::{FORM_CONTENT_TYPE, TEXT_CONTENT_TYPE};
use crate::multipart::{MultipartMessage, MultipartPart};
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use idilia_core::hash::{base64_md5, base64_md5_concat};
use idilia_core::{Error, Result};

/// The content bound into a request signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignedContent {
    /// A single primary value, such as a query or the text to analyze.
    Value(Bytes),
    /// Document payloads, digested as their concatenation in part order.
    Documents(Vec<Bytes>),
}

impl SignedContent {
    /// Base64 MD5 of the signed content.
    pub fn digest(&self) -> String {
        match self {
            SignedContent::Value(v) => base64_md5(v),
            SignedContent::Documents(docs) => base64_md5_concat(docs.iter().map(|d| d.as_ref())),
        }
    }
}

/// A request sent as `application/x-www-form-urlencoded` parameters.
#[derive(Debug, Clone, Default)]
pub struct FormRequest {
    path: String,
    params: Vec<(String, String)>,
    signed: Option<usize>,
}

impl FormRequest {
    /// Create a request for `path`, such as `/1/text/match.json`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Add a parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Add the parameter whose value the signature covers.
    ///
    /// Calling this again moves the signature to the new parameter.
    pub fn signed_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.signed = Some(self.params.len());
        self.param(name, value)
    }

    /// Request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parameters in insertion order.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// The signed parameter's value.
    pub fn signed_content(&self) -> Result<SignedContent> {
        let (_, value) = self
            .signed
            .and_then(|idx| self.params.get(idx))
            .ok_or_else(|| Error::request_invalid("form request has no signed parameter"))?;

        Ok(SignedContent::Value(Bytes::copy_from_slice(value.as_bytes())))
    }

    /// URL encoded parameters.
    pub fn encode(&self) -> Bytes {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
            .into()
    }
}

/// A request sent as `multipart/mixed`.
///
/// The first part holds the URL encoded parameters, the following parts the
/// documents. Large documents travel without URL encoding this way.
#[derive(Debug, Clone, Default)]
pub struct MultipartRequest {
    path: String,
    params: Vec<(String, String)>,
    documents: Vec<MultipartPart>,
    boundary: Option<String>,
}

impl MultipartRequest {
    /// Create a request for `path`, such as `/1/text/disambiguate.mpxml`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Add a metadata parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Add a document part with the given content type.
    pub fn document(self, content_type: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        self.part(MultipartPart::new(payload).with_header(CONTENT_TYPE.as_str(), content_type))
    }

    /// Add a `text/plain; charset=UTF-8` document.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.document(TEXT_CONTENT_TYPE, text.into())
    }

    /// Add a document part as is, for example one taken from a previous
    /// multipart response.
    pub fn part(mut self, part: MultipartPart) -> Self {
        self.documents.push(part);
        self
    }

    /// Use `boundary` instead of the client's.
    pub fn with_boundary(mut self, boundary: impl Into<String>) -> Self {
        self.boundary = Some(boundary.into());
        self
    }

    /// Request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Document parts in order.
    pub fn documents(&self) -> &[MultipartPart] {
        &self.documents
    }

    /// Payloads of every document part.
    pub fn signed_content(&self) -> Result<SignedContent> {
        if self.documents.is_empty() {
            return Err(Error::request_invalid(
                "multipart request has no document part",
            ));
        }

        Ok(SignedContent::Documents(
            self.documents.iter().map(|p| p.payload().clone()).collect(),
        ))
    }

    /// Build the message, using `default_boundary` unless one was set.
    pub fn message(&self, default_boundary: &str) -> MultipartMessage {
        let boundary = self.boundary.as_deref().unwrap_or(default_boundary);

        let params: String = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish();
        let mut msg = MultipartMessage::new(boundary)
            .with_part(MultipartPart::new(params).with_header(CONTENT_TYPE.as_str(), FORM_CONTENT_TYPE));
        for doc in &self.documents {
            msg.push(doc.clone());
        }

        msg
    }
}

/// Any request the client can send.
#[derive(Debug, Clone)]
pub enum ApiRequest {
    /// URL encoded form.
    Form(FormRequest),
    /// Multipart document submission.
    Multipart(MultipartRequest),
}

impl From<FormRequest> for ApiRequest {
    fn from(value: FormRequest) -> Self {
        ApiRequest::Form(value)
    }
}

impl From<MultipartRequest> for ApiRequest {
    fn from(value: MultipartRequest) -> Self {
        ApiRequest::Multipart(value)
    }
}

impl ApiRequest {
    /// Request path.
    pub fn path(&self) -> &str {
        match self {
            ApiRequest::Form(r) => r.path(),
            ApiRequest::Multipart(r) => r.path(),
        }
    }

    /// The content bound into the signature.
    pub fn signed_content(&self) -> Result<SignedContent> {
        match self {
            ApiRequest::Form(r) => r.signed_content(),
            ApiRequest::Multipart(r) => r.signed_content(),
        }
    }

    /// Content type and body to send.
    pub fn encode(&self, default_boundary: &str) -> (String, Bytes) {
        match self {
            ApiRequest::Form(r) => (FORM_CONTENT_TYPE.to_string(), r.encode()),
            ApiRequest::Multipart(r) => {
                let msg = r.message(default_boundary);
                (msg.content_type(), msg.encode())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idilia_core::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_form_digest_covers_signed_value_only() {
        let req = FormRequest::new("/1/text/match.json")
            .param("requestId", "mytest")
            .signed_param("text", "hello")
            .param("textMime", "text/tweet; charset=UTF-8");

        assert_eq!(req.signed_content().unwrap().digest(), "XUFAKrxLKna5cZ2REBfFkg==");
    }

    #[test]
    fn test_form_encode() {
        let req = FormRequest::new("/1/kb/query.json")
            .param("requestId", "mytest")
            .signed_param("query", r#"[{"lemma":"kiss"}]"#);

        assert_eq!(
            req.encode().as_ref(),
            b"requestId=mytest&query=%5B%7B%22lemma%22%3A%22kiss%22%7D%5D"
        );
    }

    #[test]
    fn test_form_without_signed_param() {
        let err = FormRequest::new("/1/text/match.json")
            .param("text", "hello")
            .signed_content()
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_multipart_digest_covers_document() {
        let req = MultipartRequest::new("/1/text/disambiguate.mpxml")
            .param("requestId", "mytest")
            .text("JFK was shot in Dallas.");

        assert_eq!(req.signed_content().unwrap().digest(), "ByH7CA3pZcKvc/hZvmBZRw==");
    }

    #[test]
    fn test_multipart_digest_concatenates_documents() {
        let req = MultipartRequest::new("/1/text/disambiguate.mpxml")
            .text("hello")
            .text("world");

        assert_eq!(req.signed_content().unwrap().digest(), "/F4DjTilcDIIVEHn/nAQsA==");
    }

    #[test]
    fn test_multipart_without_documents() {
        let err = MultipartRequest::new("/1/kb/tagging_menu.json")
            .param("filters", "noDynamic")
            .signed_content()
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_multipart_message_layout() {
        let req = MultipartRequest::new("/1/text/disambiguate.mpxml")
            .param("resultMime", "application/x-semdoc+xml+gz")
            .text("JFK");

        let msg = req.message("B");
        assert_eq!(msg.parts().len(), 2);
        assert_eq!(msg.parts()[0].content_type(), Some(FORM_CONTENT_TYPE));
        assert_eq!(
            msg.parts()[0].payload().as_ref(),
            b"resultMime=application%2Fx-semdoc%2Bxml%2Bgz"
        );
        assert_eq!(msg.parts()[1].content_type(), Some(TEXT_CONTENT_TYPE));

        let (content_type, _) = ApiRequest::from(req.with_boundary("X")).encode("B");
        assert_eq!(content_type, "multipart/mixed; boundary=X");
    }
}
