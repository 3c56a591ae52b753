//! Type definitions

pub mod duty;
pub mod log;
pub mod messages;
pub mod plan;
pub mod route;
pub mod stop;

pub use duty::*;
pub use log::*;
pub use messages::*;
pub use plan::*;
pub use route::*;
pub use stop::*;
