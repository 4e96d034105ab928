pub mod account;
pub mod common;
pub(crate) mod decimal_serde;
pub mod heartbeat;
pub mod identity;
pub mod market;
pub mod order;
pub mod race;

// Re-export commonly used types for convenience
pub use account::*;
pub use common::*;
pub use heartbeat::*;
pub use identity::*;
pub use market::*;
pub use order::*;
pub use race::*;
