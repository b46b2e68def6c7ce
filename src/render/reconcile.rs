use std::hash::Hash;

use indexmap::IndexSet;

/// Keyed three-way diff between two consecutive renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneDiff<K> {
    /// Keys present only in the new render.
    pub enter: Vec<K>,
    /// Keys present in both renders, in new-render order.
    pub update: Vec<K>,
    /// Keys present only in the old render.
    pub exit: Vec<K>,
}

impl<K> Default for SceneDiff<K> {
    fn default() -> Self {
        Self {
            enter: Vec::new(),
            update: Vec::new(),
            exit: Vec::new(),
        }
    }
}

impl<K> SceneDiff<K> {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.enter.is_empty() && self.exit.is_empty()
    }
}

/// Splits `new_keys` against `old_keys` into enter/update/exit sets.
///
/// Duplicate keys collapse to their first occurrence.
pub fn reconcile<K>(old_keys: &[K], new_keys: &[K]) -> SceneDiff<K>
where
    K: Clone + Eq + Hash,
{
    let old: IndexSet<&K> = old_keys.iter().collect();
    let new: IndexSet<&K> = new_keys.iter().collect();

    let mut diff = SceneDiff::default();
    for key in &new {
        if old.contains(key) {
            diff.update.push((*key).clone());
        } else {
            diff.enter.push((*key).clone());
        }
    }
    diff.exit = old
        .iter()
        .filter(|key| !new.contains(*key))
        .map(|key| (*key).clone())
        .collect();
    diff
}

#[cfg(test)]
mod tests {
    use super::reconcile;

    #[test]
    fn splits_keys_into_enter_update_exit() {
        let diff = reconcile(&["a", "b", "c"], &["c", "d", "a"]);
        assert_eq!(diff.enter, vec!["d"]);
        assert_eq!(diff.update, vec!["c", "a"]);
        assert_eq!(diff.exit, vec!["b"]);
        assert!(!diff.is_noop());
    }

    #[test]
    fn identical_keys_are_noop() {
        let diff = reconcile(&[1, 2, 2], &[1, 2]);
        assert!(diff.is_noop());
        assert_eq!(diff.update, vec![1, 2]);
    }
}
