//! Per-field validation failures

use std::fmt;

/// Failing fields, in schema order, each with its messages in rule order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    entries: Vec<(String, Vec<String>)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record messages for a field. Empty message lists are ignored and
    /// messages for an already recorded field are appended.
    pub fn insert(&mut self, field: impl Into<String>, messages: Vec<String>) {
        if messages.is_empty() {
            return;
        }
        let field = field.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => existing.extend(messages),
            None => self.entries.push((field, messages)),
        }
    }

    pub fn remove(&mut self, field: &str) {
        self.entries.retain(|(name, _)| name != field);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of failing fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    /// The message shown inline next to a field
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// Names of failing fields
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, messages)| (name.as_str(), messages.as_slice()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (_, messages)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", messages.join(" "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
