// Canonical serialization for hashing

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

mod sealed {
    pub trait Sealed {}

    impl Sealed for serde_json::Value {}
    impl Sealed for crate::core::Block {}
    impl Sealed for crate::core::Transaction {}
}

/// Trait for values with a canonical, order-independent text form.
///
/// The canonical form is compact JSON with object keys sorted
/// lexicographically at every level. `serde_json::Value` keeps its
/// objects in a `BTreeMap`, so going through it sorts the keys.
///
/// Sealed: only types whose JSON form always exists implement it.
pub trait Canonical: Serialize + sealed::Sealed {
    fn canonical_string(&self) -> String {
        canonical_json(self)
    }

    fn from_canonical(data: &str) -> Result<Self, String>
    where
        Self: Sized + DeserializeOwned,
    {
        serde_json::from_str(data).map_err(|e| format!("Invalid canonical form: {}", e))
    }
}

impl Canonical for Value {}

/// Render any serializable value in canonical form
/// Fails for values JSON cannot represent, such as maps with non-string keys.
pub fn try_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_value(value)
        .map(|v| v.to_string())
        .map_err(|e| format!("No canonical form: {}", e))
}

/// Canonical form of a `Canonical` implementor
pub(crate) fn canonical_json<T: Serialize + ?Sized>(value: &T) -> String {
    try_canonical_json(value)
        .expect("Canonical is only implemented for strings, integers, sequences and structs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::{BTreeMap, HashMap};

    #[derive(Serialize)]
    struct Unsorted {
        zeta: u32,
        alpha: &'static str,
        middle: Vec<u8>,
    }

    #[test]
    fn test_struct_fields_sorted() {
        let value = Unsorted { zeta: 1, alpha: "a", middle: vec![1, 2] };
        assert_eq!(canonical_json(&value), r#"{"alpha":"a","middle":[1,2],"zeta":1}"#);
    }

    #[test]
    fn test_nested_maps_sorted() {
        let value = json!({ "outer": { "y": 1, "x": 2 }, "a": [ { "d": 0, "c": 1 } ] });
        assert_eq!(
            value.canonical_string(),
            r#"{"a":[{"c":1,"d":0}],"outer":{"x":2,"y":1}}"#
        );
    }

    #[test]
    fn test_insertion_order_irrelevant() {
        let mut first = HashMap::new();
        first.insert("recipient", "b");
        first.insert("sender", "a");

        let mut second = HashMap::new();
        second.insert("sender", "a");
        second.insert("recipient", "b");

        assert_eq!(canonical_json(&first), canonical_json(&second));
    }

    #[test]
    fn test_non_string_map_keys_have_no_canonical_form() {
        let mut map = BTreeMap::new();
        map.insert((1u8, 2u8), 3u8);
        assert!(try_canonical_json(&map).is_err());
    }

    #[test]
    fn test_try_canonical_matches_canonical() {
        let value = json!({ "b": [1, 2], "a": "x" });
        assert_eq!(try_canonical_json(&value).unwrap(), value.canonical_string());
    }

    #[test]
    fn test_from_canonical_rejects_garbage() {
        assert!(Value::from_canonical("{not json").is_err());
    }
}
