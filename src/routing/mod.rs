//! Routing module
//!
//! Descriptor extraction from context declarations and the per-verb
//! route registry built from them at startup.

mod descriptor;
mod registry;

// Re-export public types
pub use descriptor::{
    extract_operations, ContextSpec, HandlerFn, OperationDescriptor, OperationSpec, ParamSpec,
    ParamType, ParameterDescriptor, ScalarType, Verb,
};
pub use registry::RouteRegistry;
