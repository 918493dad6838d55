pub mod declaration;
pub mod models;
pub mod properties;
pub mod service;
pub mod types;

pub use declaration::*;
pub use models::*;
pub use properties::*;
pub use service::*;
pub use types::{IrInfo, IrSpec, TargetType, TransformKind};
