/// Anything that can sit in a [`WorkList`].
pub trait Weighted {
    fn weight(&self) -> usize;
}

/// Nodes ordered by weight, heaviest first, so the two lightest entries are
/// always at the back and can be popped off cheaply.
#[derive(Debug, Clone)]
pub struct WorkList<T> {
    pub elements: Vec<T>,
}

impl<T> WorkList<T> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Consume the list, returning the last remaining element.
    pub fn into_last(mut self) -> Option<T> {
        self.elements.pop()
    }
}

impl<T: Weighted> WorkList<T> {
    /// Stable sort by descending weight: entries with equal weight keep the
    /// order they arrived in.
    pub fn build(mut source: Vec<T>) -> Self {
        source.sort_by(|a, b| b.weight().cmp(&a.weight()));
        WorkList { elements: source }
    }

    pub fn valid_order(&self) -> bool {
        self.elements
            .windows(2)
            .all(|pair| pair[0].weight() >= pair[1].weight())
    }

    /// Insert in front of the first entry that is strictly lighter, or at the
    /// back if there is none.
    pub fn insert(&mut self, value: T) {
        let weight = value.weight();
        let pos = self
            .elements
            .iter()
            .position(|e| e.weight() < weight)
            .unwrap_or(self.elements.len());
        self.elements.insert(pos, value);
        debug_assert!(self.valid_order());
    }

    pub fn extract_min(&mut self) -> Option<T> {
        self.elements.pop()
    }
}
