pub mod error;
pub mod lifecycle;
pub mod model;
pub mod provisioning;
pub mod registry;

pub use error::EnvironmentError;
pub use lifecycle::{
    LifecycleService, LifecycleServiceApi, PurgedResource, StatefulResource, TeardownReport,
};
pub use model::{Environment, RemovalPolicy, SinkOwnership, SinkRef};
pub use provisioning::{ProvisioningService, ProvisioningServiceApi};
pub use registry::EnvironmentRegistry;
