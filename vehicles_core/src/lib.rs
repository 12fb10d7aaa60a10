// vehicles_core/src/lib.rs

//! Vehicle dynamics on matrix Lie groups.
//!
//! A vehicle is a law (commands to velocity, or commands to force) wrapped in one of
//! two generic integrators. The integrators advance a pose on a subgroup of SE(3)
//! by composing it with the exponential of the velocity over the time step.

pub mod commands;
pub mod error;
pub mod manifold;
pub mod models;
pub mod prelude;
pub mod types;
