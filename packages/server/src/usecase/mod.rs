//! UseCase layer
//!
//! The relay hub and the actor that serializes every connection event
//! through it.

mod error;
mod hub_actor;
mod relay_hub;

pub use error::HubError;
pub use hub_actor::{HubHandle, spawn_hub};
pub use relay_hub::{HubCommand, HubStats, RelayHub};
