//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod actors;
pub mod admin;
pub mod health;
pub mod insights;
pub mod reactions;
