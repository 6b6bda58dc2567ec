//! Pure pod security evaluation (no IO).
//!
//! Input: a pod manifest deserialized elsewhere, a level/version and options.
//! Output: one aggregate allow/forbid decision with reasons, details and
//! optional field errors.

#![forbid(unsafe_code)]

pub mod checks;
pub mod model;
pub mod policy;
pub mod registry;

mod engine;

pub use engine::evaluate;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;
