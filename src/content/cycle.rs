//! Round-robin content selection

use std::fmt;

/// Identifier of a piece of placeable content (a texture name)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ContentId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Finite, non-empty sequence of content with a wrapping cursor.
///
/// The cursor always stays in `[0, len)`. It only moves forward, one step per
/// [`ContentCycle::advance`]; nothing rewinds it.
#[derive(Debug, Clone)]
pub struct ContentCycle {
    items: Vec<ContentId>,
    cursor: usize,
}

impl ContentCycle {
    /// Build a cycle starting at the first item.
    ///
    /// Returns `None` if `items` is empty.
    pub fn new<I>(items: I) -> Option<Self>
    where
        I: IntoIterator,
        I::Item: Into<ContentId>,
    {
        let items: Vec<ContentId> = items.into_iter().map(Into::into).collect();
        if items.is_empty() {
            return None;
        }
        Some(Self { items, cursor: 0 })
    }

    /// Content the next placement will use
    #[must_use]
    pub fn current(&self) -> &ContentId {
        &self.items[self.cursor]
    }

    /// Move to the next item, wrapping to the first after the last
    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.items.len();
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cycle has no items. A constructed cycle always has at least one.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in cycle order, starting from the first
    pub fn iter(&self) -> impl Iterator<Item = &ContentId> {
        self.items.iter()
    }
}
