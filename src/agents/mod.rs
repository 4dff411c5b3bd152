pub mod registry;

pub use registry::{
    invoke, validate_registry, CapabilityDefinition, CapabilityKind, CapabilityName, ToolOutcome,
    CAPABILITY_REGISTRY,
};
