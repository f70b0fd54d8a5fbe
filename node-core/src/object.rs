//! Generic list wrapper.
use crate::metadata::ListMeta;
use serde::{Deserialize, Serialize};

/// A generic object list
///
/// This is used instead of a dedicated `InstanceDeploymentList` struct,
/// since every list on the API shares the same `metadata` + `items` shape.
///
/// It is produced by list calls and can be iterated directly.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ObjectList<T>
where
    T: Clone,
{
    /// ListMeta - only really used for its `resourceVersion` and `continue` token
    #[serde(default)]
    pub metadata: ListMeta,

    /// The items we are actually interested in.
    #[serde(bound(deserialize = "Vec<T>: Deserialize<'de>"))]
    pub items: Vec<T>,
}

impl<T: Clone> ObjectList<T> {
    /// `iter` returns an Iterator over the elements of this ObjectList
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// `iter_mut` returns an Iterator of mutable references to the elements of this ObjectList
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    /// The continue token to pass into the next paginated list call, if the server has more items
    pub fn continue_token(&self) -> Option<&str> {
        self.metadata.continue_.as_deref().filter(|t| !t.is_empty())
    }
}

impl<T: Clone> IntoIterator for ObjectList<T> {
    type IntoIter = ::std::vec::IntoIter<Self::Item>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T: Clone> IntoIterator for &'a ObjectList<T> {
    type IntoIter = ::std::slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T: Clone> IntoIterator for &'a mut ObjectList<T> {
    type IntoIter = ::std::slice::IterMut<'a, T>;
    type Item = &'a mut T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

#[cfg(test)]
mod test {
    use super::ObjectList;

    #[test]
    fn list_deserializes_and_iterates() {
        let list: ObjectList<serde_json::Value> = serde_json::from_value(serde_json::json!({
            "apiVersion": "node.sapcloud.io/v1alpha1",
            "kind": "InstanceDeploymentList",
            "metadata": { "resourceVersion": "42", "continue": "abc" },
            "items": [{ "a": 1 }, { "a": 2 }]
        }))
        .unwrap();
        assert_eq!(list.metadata.resource_version.as_deref(), Some("42"));
        assert_eq!(list.continue_token(), Some("abc"));
        let sum: i64 = list.iter().map(|v| v["a"].as_i64().unwrap()).sum();
        assert_eq!(sum, 3);
        assert_eq!(list.into_iter().count(), 2);
    }

    #[test]
    fn empty_continue_token_is_none() {
        let list: ObjectList<serde_json::Value> = serde_json::from_value(serde_json::json!({
            "metadata": { "continue": "" },
            "items": []
        }))
        .unwrap();
        assert_eq!(list.continue_token(), None);
    }
}
