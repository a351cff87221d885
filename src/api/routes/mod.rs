//! API route modules.

pub mod meeting;
pub mod qa;
