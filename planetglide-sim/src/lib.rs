//! Planetglide Sim Crate
//!
//! The per-tick coordinator any runner drives: feed it [`ControlEvent`]s,
//! call [`Game::tick`] at a fixed rate, then read a [`RenderSnapshot`] and
//! drain [`planetglide_core::GameEvent`]s from the channel.

pub mod control;
pub mod error;
pub mod game;
pub mod snapshot;
pub mod world_config;

pub use control::{ControlEvent, ControlState};
pub use error::SimError;
pub use game::Game;
pub use snapshot::RenderSnapshot;
pub use world_config::WorldConfig;
