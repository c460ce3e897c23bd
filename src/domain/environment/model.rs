use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// A deployment of the system, identified by the branch it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
    pub is_trunk: bool,
    pub retain_data_on_destroy: bool,
}

/// What happens to a stateful resource when its environment is torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalPolicy {
    Retain,
    Destroy,
}

impl fmt::Display for RemovalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemovalPolicy::Retain => write!(f, "retain"),
            RemovalPolicy::Destroy => write!(f, "destroy"),
        }
    }
}

impl Environment {
    pub fn removal_policy(&self) -> RemovalPolicy {
        if self.retain_data_on_destroy {
            RemovalPolicy::Retain
        } else {
            RemovalPolicy::Destroy
        }
    }

    /// Branch-qualified name for a resource owned by this environment,
    /// e.g. `PhraseSynthesiser-feature-x`.
    pub fn resource_name(&self, base: &str) -> String {
        format!("{}-{}", base, sanitize(&self.id))
    }

    /// Key prefix under which this environment's synthesis output is stored,
    /// e.g. `feature-x/`. Trailing slash included so no environment's prefix
    /// is a prefix of another's.
    pub fn output_prefix(&self) -> String {
        format!("{}/", sanitize(&self.id))
    }

    /// Name of the stack holding this environment's stateful resources.
    pub fn stateful_stack_name(&self) -> String {
        format!("{}-GenSpeechStatefulStack", sanitize(&self.id))
    }

    /// Name of the stack holding this environment's stateless resources.
    pub fn stateless_stack_name(&self) -> String {
        format!("{}-GenSpeechStatelessStack", sanitize(&self.id))
    }

    /// Tags applied to every resource of this environment.
    pub fn tags(&self) -> Vec<(&'static str, String)> {
        vec![("Branch", self.id.clone())]
    }
}

static UNSAFE_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").unwrap());

fn sanitize(branch: &str) -> String {
    UNSAFE_NAME_CHARS.replace_all(branch, "-").into_owned()
}

/// Whether the shared notification sink was created by this environment or
/// imported from the trunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkOwnership {
    Owned,
    Imported,
}

/// Reference to the shared notification sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkRef {
    pub arn: String,
    pub ownership: SinkOwnership,
}
