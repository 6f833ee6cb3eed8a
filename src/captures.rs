use std::collections::BTreeMap;

/// Text captured by groups during one match attempt, keyed by group index.
///
/// A fresh table is used for every start offset the scan tries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures {
    groups: BTreeMap<usize, String>,
}

impl Captures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `text` as the latest capture of group `index`.
    pub fn record(&mut self, index: usize, text: String) {
        self.groups.insert(index, text);
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.groups.get(&index).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Captures in ascending group order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.groups.iter().map(|(index, text)| (*index, text.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_latest_capture_per_group() {
        let mut captures = Captures::new();
        captures.record(2, "dog".to_string());
        captures.record(1, "cat".to_string());
        captures.record(1, "cow".to_string());

        assert_eq!(Some("cow"), captures.get(1));
        assert_eq!(None, captures.get(3));
        assert_eq!(vec![(1, "cow"), (2, "dog")], captures.iter().collect::<Vec<_>>());

        captures.clear();
        assert!(captures.is_empty());
    }
}
