//! Pure security evaluation of Kubernetes workloads (no IO).
//!
//! Input: a generic JSON tree holding a Kubernetes object.
//! Output: a complete [`kubewhy_types::SecurityDecision`].

#![forbid(unsafe_code)]

pub mod pod_spec;
pub mod resource;

mod engine;
pub mod checks;

pub use engine::{Evaluator, evaluate};
pub use pod_spec::{PodSpec, PodSpecShape, extract_pod_spec};
pub use resource::Node;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;
