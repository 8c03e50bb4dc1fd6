//! Damage resolution - offense computation and the mitigation pipeline

mod context;
mod resolver;

pub use context::DamageContext;
pub use resolver::{DamageResolver, DefenseState};
