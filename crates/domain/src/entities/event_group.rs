//! Events grouped by title
//!
//! Titles keep the order in which they were first seen and each group keeps
//! its events in insertion order, so the published JSON object reflects
//! feed-merge order end to end.

use std::collections::HashMap;

use serde::{Serialize, Serializer, ser::SerializeMap};

use super::event::LocalizedEvent;

/// Mapping from title to the ordered events sharing that title
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventGroup {
    groups: Vec<(String, Vec<LocalizedEvent>)>,
    index: HashMap<String, usize>,
}

impl EventGroup {
    /// Create an empty group
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event to the group of its title, creating the group if needed
    pub fn push(&mut self, event: LocalizedEvent) {
        if let Some(&position) = self.index.get(event.title()) {
            self.groups[position].1.push(event);
        } else {
            let title = event.title().to_string();
            self.index.insert(title.clone(), self.groups.len());
            self.groups.push((title, vec![event]));
        }
    }

    /// Events for `title`, in insertion order
    #[must_use]
    pub fn get(&self, title: &str) -> Option<&[LocalizedEvent]> {
        self.index
            .get(title)
            .map(|&position| self.groups[position].1.as_slice())
    }

    /// Titles in first-appearance order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(title, _)| title.as_str())
    }

    /// `(title, events)` pairs in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[LocalizedEvent])> {
        self.groups
            .iter()
            .map(|(title, events)| (title.as_str(), events.as_slice()))
    }

    /// Number of distinct titles
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of events across all groups
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.groups.iter().map(|(_, events)| events.len()).sum()
    }
}

impl FromIterator<LocalizedEvent> for EventGroup {
    fn from_iter<I: IntoIterator<Item = LocalizedEvent>>(iter: I) -> Self {
        let mut group = Self::new();
        for event in iter {
            group.push(event);
        }
        group
    }
}

impl Serialize for EventGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (title, events) in self.iter() {
            map.serialize_entry(title, events)?;
        }
        map.end()
    }
}
