//! HTTP request handlers

pub mod events;
pub mod health;
pub mod root;
pub mod status;
