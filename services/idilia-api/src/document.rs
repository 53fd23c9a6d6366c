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

//! A small element tree for XML responses.

use idilia_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// An XML element with its attributes, text and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Parse a document and return its root element.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event().map_err(xml_error)? {
                Event::Start(e) => stack.push(Element::from_start(&e)?),
                Event::Empty(e) => {
                    let elem = Element::from_start(&e)?;
                    attach(&mut stack, &mut root, elem)?;
                }
                Event::End(_) => {
                    let elem = stack
                        .pop()
                        .ok_or_else(|| Error::unexpected("xml end tag without start tag"))?;
                    attach(&mut stack, &mut root, elem)?;
                }
                Event::Text(e) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&e.unescape().map_err(xml_error)?);
                    }
                }
                Event::CData(e) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(Error::unexpected("xml document has unclosed elements"));
        }
        root.ok_or_else(|| Error::unexpected("xml document has no root element"))
    }

    fn from_start(e: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(xml_error)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(xml_error)?.into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            ..Default::default()
        })
    }

    /// Tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Text content directly inside this element, trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Direct children.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First direct child named `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Follow a `/` separated path of child names.
    pub fn find(&self, path: &str) -> Option<&Element> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(self, |elem, name| elem.child(name))
    }

    /// Every element below this one named `name`, in document order.
    pub fn descendants(&self, name: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_descendants(name, &mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, name: &str, out: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.name == name {
                out.push(child);
            }
            child.collect_descendants(name, out);
        }
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, elem: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(elem),
        None if root.is_none() => *root = Some(elem),
        None => return Err(Error::unexpected("xml document has more than one root")),
    }
    Ok(())
}

fn xml_error(e: impl std::error::Error + Send + Sync + 'static) -> Error {
    Error::unexpected("failed to parse xml").with_source(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SEMDOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<semdoc version="1">
  <s>
    <w><fs sk="JFK/N1" /></w>
    <w><fs sk="shoot/V3"/></w>
  </s>
  <fs sk="Dallas/N1">Dallas &amp; Fort Worth</fs>
</semdoc>"#;

    #[test]
    fn test_parse_tree() {
        let root = Element::parse(SEMDOC.as_bytes()).unwrap();
        assert_eq!(root.name(), "semdoc");
        assert_eq!(root.attr("version"), Some("1"));
        assert_eq!(root.children().len(), 2);

        let fs = root.find("s/w/fs").unwrap();
        assert_eq!(fs.attr("sk"), Some("JFK/N1"));
    }

    #[test]
    fn test_descendants_in_document_order() {
        let root = Element::parse(SEMDOC.as_bytes()).unwrap();
        let senses: Vec<_> = root
            .descendants("fs")
            .into_iter()
            .filter_map(|e| e.attr("sk"))
            .collect();

        assert_eq!(senses, vec!["JFK/N1", "shoot/V3", "Dallas/N1"]);
    }

    #[test]
    fn test_text_is_unescaped() {
        let root = Element::parse(SEMDOC.as_bytes()).unwrap();
        assert_eq!(root.child("fs").unwrap().text(), "Dallas & Fort Worth");
    }

    #[test]
    fn test_status_document() {
        let root = Element::parse(
            b"<response><status>401</status><errorMsg>Invalid signature</errorMsg></response>",
        )
        .unwrap();

        assert_eq!(root.child("errorMsg").unwrap().text(), "Invalid signature");
        assert_eq!(root.find("status").unwrap().text(), "401");
        assert!(root.child("requestId").is_none());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Element::parse(b"").is_err());
        assert!(Element::parse(b"<a><b></a>").is_err());
        assert!(Element::parse(b"<a>").is_err());
    }
}
