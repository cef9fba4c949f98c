use std::borrow::Borrow;

use crate::Value;

/// Returns the first value that is not [`Value::Null`].
///
/// Works over owned values or references: `coalesce(&values)` yields `Option<&Value>`.
pub fn coalesce<I>(values: I) -> Option<I::Item>
where
    I: IntoIterator,
    I::Item: Borrow<Value>,
{
    values.into_iter().find(|v| !v.borrow().is_null())
}

/// Maps every item through `coercer`, keeping the first occurrence of each
/// distinct result in input order. `None` results are dropped.
pub fn map_distinct<I, U, F>(items: I, coercer: F) -> Vec<U>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Option<U>,
    U: PartialEq,
{
    let mut out = Vec::new();
    for mapped in items.into_iter().filter_map(coercer) {
        if !out.contains(&mapped) {
            out.push(mapped);
        }
    }
    out
}

/// [`map_distinct`] without a coercer: drops `Null` and repeated values.
pub fn distinct(values: &[Value]) -> Vec<Value> {
    map_distinct(values, |v| (!v.is_null()).then(|| v.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{coerce_to_int, coerce_to_string};

    fn values(items: &[i32]) -> Vec<Value> {
        items.iter().copied().map(Value::from).collect()
    }

    #[test]
    fn test_coalesce_first_present() {
        let vals = [Value::Null, Value::from(0), Value::from(1)];
        assert_eq!(coalesce(&vals), Some(&Value::from(0)));

        let owned = vec![Value::Null, Value::from("a")];
        assert_eq!(coalesce(owned), Some(Value::from("a")));
    }

    #[test]
    fn test_coalesce_keeps_falsy() {
        assert_eq!(
            coalesce([Value::Null, Value::from(false)]),
            Some(Value::from(false))
        );
        assert_eq!(coalesce([Value::from(""), Value::from(1)]), Some(Value::from("")));
    }

    #[test]
    fn test_coalesce_all_absent() {
        assert_eq!(coalesce([Value::Null, Value::Null]), None);
        assert_eq!(coalesce(Vec::<Value>::new()), None);
    }

    #[test]
    fn test_distinct() {
        let items = values(&[1, 2, 3, 4, 4, 5, 1]);
        assert_eq!(distinct(&items), values(&[1, 2, 3, 4, 5]));
        // input untouched
        assert_eq!(items.len(), 7);
    }

    #[test]
    fn test_distinct_drops_null() {
        let items = vec![Value::Null, Value::from(1), Value::Null, Value::from(1)];
        assert_eq!(distinct(&items), values(&[1]));
    }

    #[test]
    fn test_map_distinct_with_coercer() {
        let items = values(&[1, 2, 3, 4, 4, 5, 1]);
        assert_eq!(
            map_distinct(&items, |v| coerce_to_string(v, None)),
            vec!["1", "2", "3", "4", "5"]
        );
    }

    #[test]
    fn test_map_distinct_merges_after_mapping() {
        let items = vec![Value::from("1.2"), Value::from(1), Value::from("x"), Value::from(2.9)];
        let ints = map_distinct(&items, |v| coerce_to_int(v, None).ok().flatten());
        assert_eq!(ints, vec![1, 2]);
    }

    #[test]
    fn test_map_distinct_plain_types() {
        let words = ["b", "a", "b", "c", "a"];
        assert_eq!(map_distinct(words, Some), vec!["b", "a", "c"]);
        assert!(map_distinct(Vec::<i32>::new(), Some).is_empty());
    }
}
