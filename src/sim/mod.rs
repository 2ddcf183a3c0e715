//! Picture ball simulation module
//!
//! All ball behaviour lives here. This module must stay platform free:
//! - One call to `BallSim::frame` per display refresh
//! - Timestamps are passed in, never read
//! - No rendering or browser dependencies

pub mod ball_sim;
pub mod collision;
pub mod pointer;
pub mod state;
pub mod tick;

pub use ball_sim::BallSim;
pub use collision::{Contacts, resolve_walls};
pub use pointer::{DragState, PointerTracker, PressOutcome};
pub use state::{BallState, ContainerSize};
pub use tick::{PhysicsParams, tick};
