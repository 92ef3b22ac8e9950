//! Ordered style attributes.
//!
//! [`Attributes`] is the key/value map attached to graphs, subgraphs, nodes
//! and edges. Insertion order is preserved so the printed description is
//! deterministic.
//!
//! An attribute whose value is the empty string counts as unset. The graph
//! sink drops such entries before they reach the output, see
//! [`Attributes::trimmed`].

use indexmap::IndexMap;

/// Insertion-ordered map of style attributes.
///
/// # Examples
///
/// ```
/// use netdiagram_core::attributes::Attributes;
///
/// let mut attrs = Attributes::new();
/// attrs.set("color", "#7B8894");
/// attrs.set("label", "");
///
/// let trimmed = attrs.trimmed();
/// assert_eq!(trimmed.get("color"), Some("#7B8894"));
/// assert!(!trimmed.contains_key("label"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, keeping the original position of an existing key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Builder-style variant of [`Attributes::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    /// Returns the value of `key`, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns `true` if `key` is present, even with an empty value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns a copy without the entries whose value is empty.
    pub fn trimmed(&self) -> Self {
        self.0
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V> Extend<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    /// Later entries win on conflicting keys.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.0.insert(k.into(), v.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_set_preserves_position() {
        let mut attrs = Attributes::new();
        attrs.set("a", "1").set("b", "2").set("a", "3");

        let entries: Vec<_> = attrs.iter().collect();
        assert_eq!(entries, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_extend_later_wins() {
        let mut attrs = Attributes::new().with("color", "red").with("style", "dashed");
        let extra = Attributes::new().with("color", "blue").with("weight", "2");
        attrs.extend(extra.iter());

        assert_eq!(attrs.get("color"), Some("blue"));
        assert_eq!(attrs.get("style"), Some("dashed"));
        assert_eq!(attrs.get("weight"), Some("2"));
        assert_eq!(attrs.len(), 3);
    }

    #[test]
    fn test_remove() {
        let mut attrs = Attributes::new().with("a", "1").with("b", "2");
        assert_eq!(attrs.remove("a"), Some("1".to_string()));
        assert_eq!(attrs.remove("a"), None);
        assert_eq!(attrs.iter().collect::<Vec<_>>(), vec![("b", "2")]);
    }

    #[test]
    fn test_trimmed_keeps_order() {
        let attrs: Attributes = [("x", "1"), ("label", ""), ("y", "2")].into_iter().collect();
        let trimmed = attrs.trimmed();
        assert_eq!(trimmed.iter().collect::<Vec<_>>(), vec![("x", "1"), ("y", "2")]);
    }

    proptest! {
        #[test]
        fn prop_trimmed_drops_exactly_empty_values(
            entries in proptest::collection::vec(("[a-z]{1,6}", "[a-z]{0,3}"), 0..16)
        ) {
            let attrs: Attributes = entries.iter().cloned().collect();
            let trimmed = attrs.trimmed();

            prop_assert!(trimmed.iter().all(|(_, v)| !v.is_empty()));
            for (key, value) in attrs.iter() {
                prop_assert_eq!(trimmed.contains_key(key), !value.is_empty());
            }
        }
    }
}
