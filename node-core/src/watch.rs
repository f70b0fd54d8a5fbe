//! Types for the watch api
//!
//! See <https://kubernetes.io/docs/reference/using-api/api-concepts/#efficient-detection-of-changes>

use crate::{error::ErrorResponse, metadata::TypeMeta};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A raw event returned from a watch query
///
/// Note that a watch query returns many of these as newline separated JSON.
#[derive(Deserialize, Serialize, Clone)]
#[serde(tag = "type", content = "object", rename_all = "UPPERCASE")]
pub enum WatchEvent<K> {
    /// Resource was added
    Added(K),
    /// Resource was modified
    Modified(K),
    /// Resource was deleted
    Deleted(K),
    /// Resource bookmark. `Bookmark` is a slimmed down `K`.
    ///
    /// From [Watch bookmarks](https://kubernetes.io/docs/reference/using-api/api-concepts/#watch-bookmarks).
    Bookmark(Bookmark),
    /// There was some kind of error
    Error(ErrorResponse),
}

impl<K> WatchEvent<K> {
    /// The object carried by an `Added`, `Modified` or `Deleted` event
    pub fn object(&self) -> Option<&K> {
        match self {
            WatchEvent::Added(obj) | WatchEvent::Modified(obj) | WatchEvent::Deleted(obj) => Some(obj),
            WatchEvent::Bookmark(_) | WatchEvent::Error(_) => None,
        }
    }
}

impl<K> Debug for WatchEvent<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self {
            WatchEvent::Added(_) => write!(f, "Added event"),
            WatchEvent::Modified(_) => write!(f, "Modified event"),
            WatchEvent::Deleted(_) => write!(f, "Deleted event"),
            WatchEvent::Bookmark(_) => write!(f, "Bookmark event"),
            WatchEvent::Error(e) => write!(f, "Error event: {e:?}"),
        }
    }
}

/// Slimmed down K for [`WatchEvent::Bookmark`].
///
/// Can only be relied upon to have metadata with resource version.
/// Bookmarks contain apiVersion + kind + basically empty metadata.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Bookmark {
    /// apiVersion + kind
    #[serde(flatten)]
    pub types: TypeMeta,

    /// Basically empty metadata
    pub metadata: BookmarkMeta,
}

/// Slimmed down Metadata for WatchEvent::Bookmark
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkMeta {
    /// The only field we need from a Bookmark event.
    pub resource_version: String,
}

#[cfg(test)]
mod test {
    use super::WatchEvent;

    #[test]
    fn decodes_event_types() {
        let added: WatchEvent<serde_json::Value> =
            serde_json::from_str(r#"{"type":"ADDED","object":{"metadata":{"name":"a"}}}"#).unwrap();
        assert_eq!(added.object().unwrap()["metadata"]["name"], "a");

        let bookmark: WatchEvent<serde_json::Value> = serde_json::from_str(
            r#"{"type":"BOOKMARK","object":{"apiVersion":"node.sapcloud.io/v1alpha1","kind":"InstanceDeployment","metadata":{"resourceVersion":"12"}}}"#,
        )
        .unwrap();
        match bookmark {
            WatchEvent::Bookmark(b) => {
                assert_eq!(b.metadata.resource_version, "12");
                assert_eq!(b.types.kind, "InstanceDeployment");
            }
            other => panic!("unexpected {other:?}"),
        }

        let error: WatchEvent<serde_json::Value> = serde_json::from_str(
            r#"{"type":"ERROR","object":{"status":"Failure","message":"too old resource version","reason":"Expired","code":410}}"#,
        )
        .unwrap();
        assert!(error.object().is_none());
        assert!(matches!(error, WatchEvent::Error(e) if e.code == 410));
    }
}
