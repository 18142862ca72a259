use serde::Serialize;

/// `index` of `count`, zero-based, for "3 / 12" style labels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    pub index: usize,
    pub count: usize,
}

/// An ordered list of items with a single focused entry.
///
/// Cursor contract:
/// - Empty list: no selection.
/// - Non-empty list: the index is always in `[0, len)`.
/// - `replace` resets the cursor to 0.
/// - Navigation wraps in both directions and is unavailable for `len <= 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBrowser<T> {
    items: Vec<T>,
    index: Option<usize>,
}

impl<T> Default for ContentBrowser<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: None,
        }
    }
}

impl<T> ContentBrowser<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in a fresh list atomically.
    pub fn replace(&mut self, items: Vec<T>) {
        self.index = if items.is_empty() { None } else { Some(0) };
        self.items = items;
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn current(&self) -> Option<&T> {
        self.index.and_then(|i| self.items.get(i))
    }

    pub fn position(&self) -> Option<Position> {
        self.index.map(|index| Position {
            index,
            count: self.items.len(),
        })
    }

    pub fn can_navigate(&self) -> bool {
        self.items.len() > 1
    }

    /// Advances with wraparound. Returns the index after the move.
    pub fn next(&mut self) -> Option<usize> {
        if self.can_navigate() {
            let len = self.items.len();
            self.index = self.index.map(|i| (i + 1) % len);
        }
        self.index
    }

    /// Steps back with wraparound. Returns the index after the move.
    pub fn previous(&mut self) -> Option<usize> {
        if self.can_navigate() {
            let len = self.items.len();
            self.index = self.index.map(|i| (i + len - 1) % len);
        }
        self.index
    }

    /// Focuses `index` directly, e.g. when its map marker is selected.
    ///
    /// Returns `false` and leaves the cursor alone when out of range.
    pub fn focus(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.index = Some(index);
        true
    }
}
