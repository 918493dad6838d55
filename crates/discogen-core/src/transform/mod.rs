pub mod discovery_to_ir;
pub mod naming;
pub mod schema_transformer;
pub mod service_transformer;
pub mod type_mapper;

pub use discovery_to_ir::transform;
pub use schema_transformer::{Scope, TransformContext};
pub use service_transformer::ServiceOutput;
