use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// The `scale` subresource of an [`InstanceDeployment`](super::InstanceDeployment)
///
/// Serializes with `apiVersion: node.sapcloud.io/v1alpha1` and `kind: Scale`.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Scale {
    /// Metadata of the scaled object. `resourceVersion` guards concurrent updates.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Desired scale
    #[serde(default)]
    pub spec: ScaleSpec,
    /// Current scale, read only
    #[serde(default)]
    pub status: Option<ScaleStatus>,
}

impl Scale {
    /// The desired replica count, 0 when unset
    pub fn replicas(&self) -> i32 {
        self.spec.replicas.unwrap_or_default()
    }
}

impl Serialize for Scale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = 4 + usize::from(self.status.is_some());
        let mut obj = serializer.serialize_struct("Scale", fields)?;
        obj.serialize_field("apiVersion", super::API_VERSION)?;
        obj.serialize_field("kind", "Scale")?;
        obj.serialize_field("metadata", &self.metadata)?;
        obj.serialize_field("spec", &self.spec)?;
        if let Some(status) = &self.status {
            obj.serialize_field("status", status)?;
        }
        obj.end()
    }
}

/// Desired scale
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScaleSpec {
    /// Desired number of instances
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
}

/// Observed scale
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScaleStatus {
    /// Actual number of observed instances
    #[serde(default)]
    pub replicas: i32,
    /// Label query over instances that should match the replica count
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selector: BTreeMap<String, String>,
    /// Serialized label selector, in the same format as a `labelSelector` query parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_selector: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    #[test]
    fn serializes_with_type_meta() {
        let scale = Scale {
            metadata: ObjectMeta {
                name: Some("web".into()),
                resource_version: Some("7".into()),
                ..ObjectMeta::default()
            },
            spec: ScaleSpec { replicas: Some(5) },
            status: None,
        };
        assert_json_eq!(
            serde_json::to_value(&scale).unwrap(),
            json!({
                "apiVersion": "node.sapcloud.io/v1alpha1",
                "kind": "Scale",
                "metadata": { "name": "web", "resourceVersion": "7" },
                "spec": { "replicas": 5 }
            })
        );
    }

    #[test]
    fn deserializes_status() {
        let scale: Scale = serde_json::from_value(json!({
            "kind": "Scale",
            "apiVersion": "node.sapcloud.io/v1alpha1",
            "metadata": { "name": "web" },
            "spec": { "replicas": 2 },
            "status": { "replicas": 1, "selector": { "pool": "web" }, "targetSelector": "pool=web" }
        }))
        .unwrap();
        assert_eq!(scale.replicas(), 2);
        let status = scale.status.unwrap();
        assert_eq!(status.replicas, 1);
        assert_eq!(status.selector.get("pool").map(String::as_str), Some("web"));
        assert_eq!(status.target_selector.as_deref(), Some("pool=web"));
    }

    #[test]
    fn missing_replicas_reads_as_zero() {
        let scale: Scale = serde_json::from_value(json!({ "metadata": {}, "spec": {} })).unwrap();
        assert_eq!(scale.replicas(), 0);
        assert!(scale.status.is_none());
    }
}
