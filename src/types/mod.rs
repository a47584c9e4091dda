pub mod deployment;
pub mod instance;
pub mod task;

pub use deployment::*;
pub use instance::*;
pub use task::*;
