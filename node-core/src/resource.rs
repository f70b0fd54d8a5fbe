pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// An accessor trait for a top level API resource.
///
/// Implementors know their group, version, kind and plural at compile time,
/// which is enough to build the collection url for [`Request`](crate::Request).
///
/// These types SHOULD all have:
/// - `.metadata`
/// - `.metadata.name` once persisted
pub trait Resource {
    /// The api group, e.g. `node.sapcloud.io`
    const GROUP: &'static str;
    /// The api version within the group, e.g. `v1alpha1`
    const VERSION: &'static str;
    /// The kind, e.g. `InstanceDeployment`
    const KIND: &'static str;
    /// The plural name of the kind
    ///
    /// This is known as the resource in apimachinery.
    const PLURAL: &'static str;

    /// Returns apiVersion of this object
    fn api_version() -> String {
        if Self::GROUP.is_empty() {
            return Self::VERSION.to_string();
        }
        format!("{}/{}", Self::GROUP, Self::VERSION)
    }

    /// Creates a url path for http requests for this resource
    ///
    /// Pass `None` for cluster scoped resources.
    fn url_path(namespace: Option<&str>) -> String {
        let n = if let Some(ns) = namespace {
            format!("namespaces/{ns}/")
        } else {
            "".into()
        };
        format!(
            "/{group}/{api_version}/{namespaces}{plural}",
            group = if Self::GROUP.is_empty() { "api" } else { "apis" },
            api_version = Self::api_version(),
            namespaces = n,
            plural = Self::PLURAL,
        )
    }

    /// Metadata that all persisted resources must have
    fn meta(&self) -> &ObjectMeta;
    /// Metadata that all persisted resources must have
    fn meta_mut(&mut self) -> &mut ObjectMeta;

    /// The name of the object, if it has been set
    fn name(&self) -> Option<&str> {
        self.meta().name.as_deref()
    }

    /// The resourceVersion of the object, if it has been persisted
    fn resource_version(&self) -> Option<&str> {
        self.meta().resource_version.as_deref()
    }
}

#[cfg(test)]
mod test {
    use super::{ObjectMeta, Resource};

    struct Widget(ObjectMeta);
    impl Resource for Widget {
        const GROUP: &'static str = "example.io";
        const KIND: &'static str = "Widget";
        const PLURAL: &'static str = "widgets";
        const VERSION: &'static str = "v1";

        fn meta(&self) -> &ObjectMeta {
            &self.0
        }

        fn meta_mut(&mut self) -> &mut ObjectMeta {
            &mut self.0
        }
    }

    struct Thing(ObjectMeta);
    impl Resource for Thing {
        const GROUP: &'static str = "";
        const KIND: &'static str = "Thing";
        const PLURAL: &'static str = "things";
        const VERSION: &'static str = "v1";

        fn meta(&self) -> &ObjectMeta {
            &self.0
        }

        fn meta_mut(&mut self) -> &mut ObjectMeta {
            &mut self.0
        }
    }

    #[test]
    fn grouped_paths() {
        assert_eq!(Widget::api_version(), "example.io/v1");
        assert_eq!(Widget::url_path(None), "/apis/example.io/v1/widgets");
        assert_eq!(Widget::url_path(Some("ns")), "/apis/example.io/v1/namespaces/ns/widgets");
    }

    #[test]
    fn core_group_paths() {
        assert_eq!(Thing::api_version(), "v1");
        assert_eq!(Thing::url_path(None), "/api/v1/things");
    }

    #[test]
    fn accessors() {
        let mut w = Widget(ObjectMeta::default());
        assert_eq!(w.name(), None);
        w.meta_mut().name = Some("w1".into());
        w.meta_mut().resource_version = Some("7".into());
        assert_eq!(w.name(), Some("w1"));
        assert_eq!(w.resource_version(), Some("7"));
    }
}
