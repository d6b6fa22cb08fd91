// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `About/About.xml` extraction.
//!
//! Only the direct children of the root element are read:
//!
//! ```text
//! <ModMetaData>
//!   <packageId>..</packageId>          package_id (required)
//!   <name>..</name>                    name
//!   <author>..</author>                author
//!   <authors><li>..</li></authors>     author (joined with ", ")
//!   <loadBefore> / <forceLoadBefore>   before
//!   <loadAfter>  / <forceLoadAfter>    after
//!   <incompatibleWith>                 incompatible
//!   <supportedVersions>                versions
//! </ModMetaData>
//! ```
//!
//! CDATA sections are read as escaped text, so markup inside a description
//! never counts as a tag.

use regex::{Captures, Regex};

use crate::error::ScanError;

/// Metadata read from one About.xml.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AboutMetadata {
    pub package_id: String,
    pub name: Option<String>,
    pub author: Option<String>,
    pub before: Vec<String>,
    pub after: Vec<String>,
    pub incompatible: Vec<String>,
    pub versions: Vec<String>,
}

/// Compiled patterns for About.xml extraction; build once per scan.
#[derive(Debug, Clone)]
pub struct AboutParser {
    cdata: Regex,
    comment: Regex,
    tag: Regex,
    item: Regex,
}

impl AboutParser {
    /// Compiles the tag scanner.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Pattern`] if a pattern fails to compile.
    pub fn new() -> Result<Self, ScanError> {
        Ok(Self {
            cdata: Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>")?,
            comment: Regex::new(r"(?s)<!--.*?-->")?,
            tag: Regex::new(r"<(/?)([A-Za-z_][\w.\-:]*)[^>]*?(/?)>")?,
            item: Regex::new(r"(?s)<li(?:\s[^>]*)?>(.*?)</li>")?,
        })
    }

    /// Extracts metadata from About.xml text.
    ///
    /// # Errors
    ///
    /// Returns a message describing the problem when the document has no root
    /// element, has unbalanced tags, or lacks a `packageId`.
    pub fn parse(&self, xml: &str) -> Result<AboutMetadata, String> {
        let xml = self.cdata.replace_all(xml, |caps: &Captures<'_>| {
            escape(caps.get(1).map_or("", |m| m.as_str()))
        });
        let xml = self.comment.replace_all(&xml, "");
        let mut about = AboutMetadata::default();
        let mut package_id = None;
        let mut authors = Vec::new();

        for (name, content) in self.children(&xml)? {
            match name {
                "packageId" => package_id = non_empty(content),
                "name" => about.name = non_empty(content),
                "author" => {
                    if let Some(author) = non_empty(content) {
                        authors.push(author);
                    }
                }
                "authors" => authors.extend(self.items(content)),
                "loadBefore" | "forceLoadBefore" => {
                    extend_unique(&mut about.before, self.items(content));
                }
                "loadAfter" | "forceLoadAfter" => {
                    extend_unique(&mut about.after, self.items(content));
                }
                "incompatibleWith" => extend_unique(&mut about.incompatible, self.items(content)),
                "supportedVersions" => extend_unique(&mut about.versions, self.items(content)),
                _ => {}
            }
        }

        about.package_id = package_id.ok_or_else(|| "missing packageId".to_string())?;
        if !authors.is_empty() {
            about.author = Some(authors.join(", "));
        }
        Ok(about)
    }

    /// Returns `(name, inner text)` for every direct child of the root.
    fn children<'x>(&self, xml: &'x str) -> Result<Vec<(&'x str, &'x str)>, String> {
        let mut stack: Vec<&str> = Vec::new();
        let mut open_at = 0;
        let mut saw_root = false;
        let mut children = Vec::new();

        for caps in self.tag.captures_iter(xml) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(2)) else {
                continue;
            };
            let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            let self_closing = caps.get(3).is_some_and(|m| !m.as_str().is_empty());

            if closing {
                match stack.pop() {
                    Some(open) if open == name.as_str() => {}
                    Some(open) => {
                        return Err(format!(
                            "mismatched closing tag </{}> for <{open}>",
                            name.as_str()
                        ));
                    }
                    None => return Err(format!("unexpected closing tag </{}>", name.as_str())),
                }
                if stack.len() == 1 {
                    children.push((name.as_str(), &xml[open_at..whole.start()]));
                }
            } else if self_closing {
                if stack.len() == 1 {
                    children.push((name.as_str(), ""));
                } else if stack.is_empty() {
                    saw_root = true;
                }
            } else {
                if stack.is_empty() {
                    if saw_root {
                        return Err("more than one root element".to_string());
                    }
                    saw_root = true;
                }
                stack.push(name.as_str());
                if stack.len() == 2 {
                    open_at = whole.end();
                }
            }
        }

        if !saw_root {
            return Err("no root element".to_string());
        }
        if let Some(open) = stack.last() {
            return Err(format!("unclosed tag <{open}>"));
        }
        Ok(children)
    }

    fn items(&self, content: &str) -> Vec<String> {
        self.item
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| non_empty(m.as_str()))
            .collect()
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let text = unescape(raw.trim());
    (!text.is_empty()).then_some(text)
}

fn extend_unique(target: &mut Vec<String>, items: Vec<String>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Decodes the five predefined XML entities.
pub(crate) fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
