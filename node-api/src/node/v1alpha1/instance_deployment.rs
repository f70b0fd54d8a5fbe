use k8s_openapi::apimachinery::pkg::{
    apis::meta::v1::{LabelSelector, ObjectMeta, Time},
    util::intstr::IntOrString,
};
use node_core::{ObjectList, Resource};
use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};

/// A set of instances kept at a desired replica count, rolled out like a `Deployment`
///
/// Cluster scoped. Serializes with `apiVersion: node.sapcloud.io/v1alpha1` and
/// `kind: InstanceDeployment` regardless of what was deserialized.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct InstanceDeployment {
    /// Standard object metadata
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Desired state
    #[serde(default)]
    pub spec: InstanceDeploymentSpec,
    /// Most recently observed state, written by the controller
    #[serde(default)]
    pub status: Option<InstanceDeploymentStatus>,
}

/// A list of [`InstanceDeployment`] as returned by list calls
pub type InstanceDeploymentList = ObjectList<InstanceDeployment>;

impl InstanceDeployment {
    /// A named object with the given spec and no status
    pub fn new(name: &str, spec: InstanceDeploymentSpec) -> Self {
        Self {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..ObjectMeta::default()
            },
            spec,
            status: None,
        }
    }
}

impl Resource for InstanceDeployment {
    const GROUP: &'static str = super::super::GROUP;
    const KIND: &'static str = "InstanceDeployment";
    const PLURAL: &'static str = "instancedeployments";
    const VERSION: &'static str = super::VERSION;

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

impl Serialize for InstanceDeployment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = 4 + usize::from(self.status.is_some());
        let mut obj = serializer.serialize_struct("InstanceDeployment", fields)?;
        obj.serialize_field("apiVersion", super::API_VERSION)?;
        obj.serialize_field("kind", <Self as Resource>::KIND)?;
        obj.serialize_field("metadata", &self.metadata)?;
        obj.serialize_field("spec", &self.spec)?;
        if let Some(status) = &self.status {
            obj.serialize_field("status", status)?;
        }
        obj.end()
    }
}

/// Desired state of an [`InstanceDeployment`]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstanceDeploymentSpec {
    /// Number of desired instances. Defaults to 1 on the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    /// Label selector for instances. Must match the labels of the template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,

    /// Template for the instances that will be created.
    #[serde(default)]
    pub template: InstanceTemplateSpec,

    /// How to replace existing instances with new ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<InstanceDeploymentStrategy>,

    /// Seconds a new instance must be ready without crashing to count as available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_ready_seconds: Option<i32>,

    /// Number of old instance sets to retain for rollback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_history_limit: Option<i32>,

    /// Pauses the rollout.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub paused: bool,

    /// The config this deployment is rolling back to. Cleared once the rollback is done.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollback_to: Option<RollbackConfig>,

    /// Seconds a rollout may make no progress before it is reported as failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_deadline_seconds: Option<i32>,
}

/// Template from which instances are created
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct InstanceTemplateSpec {
    /// Metadata copied onto every instance, labels in particular
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Spec of every instance
    #[serde(default)]
    pub spec: InstanceSpec,
}

/// Specification of a single instance
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstanceSpec {
    /// Reference to the provider specific instance class
    #[serde(default)]
    pub class: ClassSpec,
    /// Identifier of the backing machine at the provider, once known
    #[serde(rename = "providerID", default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
}

/// Reference to a provider specific class object
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassSpec {
    /// Api group of the class, e.g. `node.sapcloud.io`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_group: String,
    /// Kind of the class, e.g. `AWSInstanceClass`
    #[serde(default)]
    pub kind: String,
    /// Name of the class object
    #[serde(default)]
    pub name: String,
}

/// How an [`InstanceDeployment`] replaces old instances
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstanceDeploymentStrategy {
    /// Type of strategy. Defaults to `RollingUpdate` on the server.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<InstanceDeploymentStrategyType>,
    /// Rolling update parameters, only honoured with `RollingUpdate`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolling_update: Option<RollingUpdateInstanceDeployment>,
}

/// Strategy type of an [`InstanceDeploymentStrategy`]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum InstanceDeploymentStrategyType {
    /// Kill all existing instances before creating new ones
    Recreate,
    /// Replace the old instance set by new one gradually
    RollingUpdate,
}

/// Rolling update parameters
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RollingUpdateInstanceDeployment {
    /// Maximum number (or percentage) of instances that can be unavailable during the update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_unavailable: Option<IntOrString>,
    /// Maximum number (or percentage) of instances created above the desired count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_surge: Option<IntOrString>,
}

/// Revision to roll back to
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RollbackConfig {
    /// The revision to rollback to. 0 means the last revision.
    #[serde(default)]
    pub revision: i64,
}

/// Most recently observed state of an [`InstanceDeployment`]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstanceDeploymentStatus {
    /// The generation observed by the controller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
    /// Total number of non-terminated instances targeted by this deployment
    #[serde(default)]
    pub replicas: i32,
    /// Instances that have the desired template spec
    #[serde(default)]
    pub updated_replicas: i32,
    /// Instances that are ready
    #[serde(default)]
    pub ready_replicas: i32,
    /// Instances that have been ready for at least `minReadySeconds`
    #[serde(default)]
    pub available_replicas: i32,
    /// Instances still required for the deployment to have full capacity
    #[serde(default)]
    pub unavailable_replicas: i32,
    /// Latest available observations of the deployment's state
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<InstanceDeploymentCondition>,
    /// Count of hash collisions, used to build a unique name for the newest instance set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collision_count: Option<i32>,
}

impl InstanceDeploymentStatus {
    /// Looks up a condition by its type, e.g. `Available`
    pub fn condition(&self, type_: &str) -> Option<&InstanceDeploymentCondition> {
        self.conditions.iter().find(|c| c.type_ == type_)
    }
}

/// State of an [`InstanceDeployment`] at a certain point
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstanceDeploymentCondition {
    /// Type of the condition: `Available`, `Progressing` or `ReplicaFailure`
    #[serde(rename = "type")]
    pub type_: String,
    /// `True`, `False` or `Unknown`
    pub status: String,
    /// The last time this condition was updated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_time: Option<Time>,
    /// Last time the condition transitioned from one status to another
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<Time>,
    /// The reason for the condition's last transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// A human readable message with details about the transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
