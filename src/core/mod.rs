//! Shared descriptor types used across the routing pipeline.
//!
//! - `operation`: operation descriptors and argument schemas

pub mod operation;

pub use operation::{ArgumentSchema, OperationDescriptor, ParamSpec, ParamType};
