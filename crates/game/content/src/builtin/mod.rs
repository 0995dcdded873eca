//! Content shipped with the game.
//!
//! The numbers here are the production tuning: two stages of three floors
//! each, eight enemy templates, the four default skills, and the shared
//! question pool. External RON files loaded through [`crate::loaders`] can
//! replace any of it.

mod enemies;
mod questions;
mod skills;
mod stages;

pub(crate) use enemies::enemies;
pub(crate) use questions::common_questions;
pub(crate) use skills::{skills, unlock_table};
pub(crate) use stages::stages;
