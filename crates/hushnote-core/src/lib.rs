//! # hushnote-core
//!
//! Core types, traits, and engines for hushnote.
//!
//! This crate provides the domain model of a personal note-taking system
//! with a PIN-gated hidden partition: the note filter/facet engine, the
//! image layout normalizer, the PIN gate, and the visibility controller
//! that composes them, along with the repository abstractions that the
//! storage and HTTP crates implement.

pub mod defaults;
pub mod engine;
pub mod error;
pub mod filter;
pub mod layout;
pub mod logging;
pub mod memory;
pub mod models;
pub mod pin;
pub mod traits;
pub mod visibility;

// Re-export commonly used types at crate root
pub use engine::{FilteredNotes, NoteFilterEngine};
pub use error::{Error, Result};
pub use filter::NoteFilter;
pub use layout::{normalize, scaled_height, ImageLayout, NoteLayout};
pub use memory::{
    MemoryNoteImageRepository, MemoryNoteRepository, MemoryProfileRepository, MemorySessionStore,
};
pub use models::*;
pub use pin::{validate_pin, PinGate};
pub use traits::*;
pub use visibility::{AnnotatedImage, AnnotatedNote, NoteListing, NoteVisibilityController};
