//! Static field tables.
//!
//! Each transaction variant describes its wire fields once, as a list of
//! `(wire key, getter, setter)` entries. The table for a variant is the
//! envelope entries followed by the variant's own entries, and is built a
//! single time behind a `LazyLock` by the variant itself.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use tracing::warn;

use super::FieldMap;
use crate::error::FieldError;

/// Reads a field's current wire value. `None` means "absent", and the key
/// is left out of the encoded document and the canonical string.
pub type Getter<T> = fn(&T) -> Option<Value>;

/// Applies a wire value to a field.
pub type Setter<T> = fn(&mut T, &Value) -> Result<(), FieldError>;

/// One wire field of a transaction type.
pub struct FieldSpec<T> {
    /// JSON key used on the wire.
    pub key: &'static str,
    /// Accessor used when encoding and computing checksums.
    pub get: Getter<T>,
    /// Mutator used when decoding.
    pub set: Setter<T>,
}

impl<T> FieldSpec<T> {
    /// Creates a new field entry.
    pub const fn new(key: &'static str, get: Getter<T>, set: Setter<T>) -> Self {
        Self { key, get, set }
    }
}

// Manual impls: deriving would demand `T: Clone`, but only fn pointers are stored.
impl<T> Clone for FieldSpec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldSpec<T> {}

impl<T> fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec").field("key", &self.key).finish()
    }
}

/// The complete, ordered field set of one transaction type.
pub struct FieldTable<T> {
    fields: Vec<FieldSpec<T>>,
    index: HashMap<&'static str, usize>,
}

impl<T> FieldTable<T> {
    /// Concatenates field groups (envelope first, then the variant's own
    /// fields) into a lookup table.
    ///
    /// # Panics
    ///
    /// If two entries share a wire key. Tables are static, so this is a
    /// programming error caught the first time the table is touched.
    pub fn compose(groups: impl IntoIterator<Item = Vec<FieldSpec<T>>>) -> Self {
        let fields: Vec<FieldSpec<T>> = groups.into_iter().flatten().collect();
        let mut index = HashMap::with_capacity(fields.len());
        for (position, spec) in fields.iter().enumerate() {
            let previous = index.insert(spec.key, position);
            assert!(previous.is_none(), "duplicate wire key `{}`", spec.key);
        }
        Self { fields, index }
    }

    /// Looks up the entry registered for `key`.
    pub fn get(&self, key: &str) -> Option<&FieldSpec<T>> {
        self.index.get(key).map(|&position| &self.fields[position])
    }

    /// Iterates entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec<T>> {
        self.fields.iter()
    }

    /// Wire keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.iter().map(|spec| spec.key)
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Collects every field with a present value into a map.
    pub fn collect(&self, target: &T) -> FieldMap {
        self.iter()
            .filter_map(|spec| (spec.get)(target).map(|value| (spec.key.to_string(), value)))
            .collect()
    }

    /// Applies every entry of `map` to `target`.
    ///
    /// Unknown keys and values that fail to apply are logged and skipped;
    /// the affected field keeps whatever value it had. Returns the number
    /// of keys that were skipped.
    pub fn apply(&self, target: &mut T, map: &FieldMap) -> usize {
        let mut skipped = 0;
        for (key, value) in map {
            let Some(spec) = self.get(key) else {
                warn!(key = %key, "unknown transaction key skipped");
                skipped += 1;
                continue;
            };
            if let Err(err) = (spec.set)(target, value) {
                warn!(key = %key, error = %err, "failed to set field from JSON");
                skipped += 1;
            }
        }
        skipped
    }
}

impl<T> fmt::Debug for FieldTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{optional_string, set_optional_string};

    #[derive(Default)]
    struct Probe {
        name: Option<String>,
        label: Option<String>,
    }

    fn probe_table() -> FieldTable<Probe> {
        FieldTable::compose([
            vec![FieldSpec::new(
                "name",
                |p: &Probe| optional_string(&p.name),
                |p: &mut Probe, v| set_optional_string("name", &mut p.name, v),
            )],
            vec![FieldSpec::new(
                "label",
                |p: &Probe| optional_string(&p.label),
                |p: &mut Probe, v| set_optional_string("label", &mut p.label, v),
            )],
        ])
    }

    #[test]
    fn compose_keeps_group_order() {
        let table = probe_table();
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["name", "label"]);
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
    }

    #[test]
    #[should_panic(expected = "duplicate wire key")]
    fn duplicate_keys_panic() {
        let spec = FieldSpec::new(
            "name",
            |p: &Probe| optional_string(&p.name),
            |p: &mut Probe, v| set_optional_string("name", &mut p.name, v),
        );
        let _ = FieldTable::compose([vec![spec], vec![spec]]);
    }

    #[test]
    fn collect_omits_absent_values() {
        let table = probe_table();
        let probe = Probe {
            name: Some("n".into()),
            label: None,
        };
        let map = table.collect(&probe);
        assert_eq!(map.len(), 1);
        assert_eq!(map["name"], Value::String("n".into()));
    }

    #[test]
    fn apply_skips_unknown_and_mistyped_keys() {
        let table = probe_table();
        let mut probe = Probe {
            name: Some("before".into()),
            label: None,
        };
        let map: FieldMap = serde_json::from_str(r#"{"name": 7, "label": "x", "extra": 1}"#)
            .unwrap();

        let skipped = table.apply(&mut probe, &map);
        assert_eq!(skipped, 2);
        assert_eq!(probe.name.as_deref(), Some("before"));
        assert_eq!(probe.label.as_deref(), Some("x"));
    }

    #[test]
    fn debug_lists_keys() {
        assert_eq!(format!("{:?}", probe_table()), r#"["name", "label"]"#);
    }
}
