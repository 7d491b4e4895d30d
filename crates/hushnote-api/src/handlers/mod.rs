//! HTTP handler modules for hushnote-api.

pub mod images;
pub mod notes;
pub mod pin;
pub mod profile;
