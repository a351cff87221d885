//! Meeting block and Q&A list formatting, with an HTTP API around both.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod global;
pub mod meeting;
pub mod qa;
