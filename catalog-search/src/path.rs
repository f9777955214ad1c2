// SPDX-License-Identifier: GPL-3.0-only

//! Key-path access into semi-structured catalog payloads
//!
//! Paths use `.` between segments and brackets for segments that contain
//! spaces, dots or slashes:
//!
//! - `Controllers[0]`
//! - `[Response Data][Scheduled Tasks].OEMID`
//! - `Response Data[PDs for VD 0]`
//!
//! A segment indexes an array when the current value is an array and the
//! segment is a number; otherwise it is an object key. JSON `null` is absent.

use serde_json::Value;

/// Pre-split key path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Split a path string into segments.
    pub fn parse(path: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut in_brackets = false;

        for ch in path.chars() {
            match ch {
                '[' if !in_brackets => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                    in_brackets = true;
                }
                ']' if in_brackets => {
                    segments.push(unquote(&std::mem::take(&mut current)));
                    in_brackets = false;
                }
                '.' if !in_brackets => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
                _ => current.push(ch),
            }
        }

        if !current.is_empty() {
            segments.push(current);
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

fn unquote(token: &str) -> String {
    let trimmed = token.trim();
    for quote in ['\'', '"'] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.to_string();
        }
    }
    token.to_string()
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<&String> for KeyPath {
    fn from(path: &String) -> Self {
        Self::parse(path)
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

impl From<&[&str]> for KeyPath {
    fn from(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(|segment| segment.to_string()).collect(),
        }
    }
}

impl<const N: usize> From<[&str; N]> for KeyPath {
    fn from(segments: [&str; N]) -> Self {
        Self::from(&segments[..])
    }
}

/// Walk `path` through `container`, returning `None` as soon as a step is missing.
pub fn resolve<'a>(container: &'a Value, path: impl Into<KeyPath>) -> Option<&'a Value> {
    let path = path.into();
    let mut current = container;

    for segment in path.segments() {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.trim().parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    if current.is_null() { None } else { Some(current) }
}
