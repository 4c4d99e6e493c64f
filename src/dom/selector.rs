//! CSS-style selectors over a flat document
//!
//! Supports comma-separated lists of compound selectors built from a tag name
//! (or `*`), `#id`, `.class`, `[attr]` and `[attr=value]` parts. Combinators
//! are rejected since documents have no nesting.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use crate::utils::errors::{LocalizationError, Result};

/// Parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Compound>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    ids: Vec<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeMatcher>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeMatcher {
    name: String,
    value: Option<String>,
}

impl Selector {
    /// Parse a selector list
    pub fn parse(source: &str) -> Result<Self> {
        let invalid = |reason: &str| LocalizationError::InvalidSelector {
            selector: source.to_string(),
            reason: reason.to_string(),
        };

        let mut alternatives = Vec::new();
        for part in source.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(invalid("empty selector"));
            }
            alternatives.push(parse_compound(part).map_err(|reason| invalid(&reason))?);
        }

        Ok(Self {
            source: source.trim().to_string(),
            alternatives,
        })
    }

    /// Selector matching every element that carries `name`
    pub fn attribute(name: &str) -> Self {
        Self {
            source: format!("[{}]", name),
            alternatives: vec![Compound {
                attributes: vec![AttributeMatcher {
                    name: name.to_string(),
                    value: None,
                }],
                ..Compound::default()
            }],
        }
    }

    /// Source text of the selector
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub(crate) fn matches(&self, tag: &str, attributes: &BTreeMap<String, String>) -> bool {
        self.alternatives
            .iter()
            .any(|compound| compound.matches(tag, attributes))
    }
}

impl Compound {
    fn matches(&self, tag: &str, attributes: &BTreeMap<String, String>) -> bool {
        if let Some(expected) = &self.tag {
            if !expected.eq_ignore_ascii_case(tag) {
                return false;
            }
        }

        let id = attributes.get("id").map(String::as_str);
        if !self.ids.iter().all(|expected| id == Some(expected.as_str())) {
            return false;
        }

        let classes = attributes.get("class").map(String::as_str).unwrap_or("");
        if !self
            .classes
            .iter()
            .all(|expected| classes.split_whitespace().any(|c| c == expected))
        {
            return false;
        }

        self.attributes.iter().all(|matcher| {
            match (attributes.get(&matcher.name), &matcher.value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            }
        })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(input: &str) -> (&str, &str) {
    let end = input
        .char_indices()
        .find(|(_, c)| !is_ident_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    input.split_at(end)
}

fn parse_compound(input: &str) -> std::result::Result<Compound, String> {
    let mut compound = Compound::default();
    let mut rest = input;

    if let Some(stripped) = rest.strip_prefix('*') {
        rest = stripped;
    } else {
        let (tag, remainder) = take_ident(rest);
        if !tag.is_empty() {
            compound.tag = Some(tag.to_ascii_lowercase());
            rest = remainder;
        }
    }

    while let Some(c) = rest.chars().next() {
        match c {
            '#' | '.' => {
                let (ident, remainder) = take_ident(&rest[1..]);
                if ident.is_empty() {
                    return Err(format!("expected a name after '{}'", c));
                }
                if c == '#' {
                    compound.ids.push(ident.to_string());
                } else {
                    compound.classes.push(ident.to_string());
                }
                rest = remainder;
            }
            '[' => {
                let close = rest
                    .find(']')
                    .ok_or_else(|| "unterminated attribute selector".to_string())?;
                compound.attributes.push(parse_attribute(&rest[1..close])?);
                rest = &rest[close + 1..];
            }
            c if c.is_whitespace() || c == '>' || c == '+' || c == '~' => {
                return Err("combinators are not supported".to_string());
            }
            other => return Err(format!("unexpected character '{}'", other)),
        }
    }

    Ok(compound)
}

fn parse_attribute(body: &str) -> std::result::Result<AttributeMatcher, String> {
    let (name, value) = match body.split_once('=') {
        Some((name, value)) => {
            let value = value.trim();
            let unquoted = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (name.trim(), Some(unquoted.to_string()))
        }
        None => (body.trim(), None),
    };

    if name.is_empty() || !name.chars().all(is_ident_char) {
        return Err(format!("invalid attribute name '{}'", name));
    }

    Ok(AttributeMatcher {
        name: name.to_string(),
        value,
    })
}

impl FromStr for Selector {
    type Err = LocalizationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
