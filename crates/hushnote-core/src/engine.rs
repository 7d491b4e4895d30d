//! The note filter engine.
//!
//! Given an owner, a hidden/visible partition, and filter criteria, the
//! engine produces the matching notes together with the two facet lists
//! describing what further filters are available inside the current
//! partition.
//!
//! Facets are deliberately asymmetric: the color facet is computed with the
//! *tag* constraint applied (and vice versa), and the search term is never
//! applied to either. A dropdown therefore reflects the other axis's
//! selection without filtering itself into a single remaining option.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::filter::NoteFilter;
use crate::models::Note;
use crate::traits::{NoteQuery, NoteRepository};

/// A filtered result set plus its facet lists.
///
/// The facet lists are always drawn from the same owner+hidden partition as
/// the notes; values from the other partition or another owner never appear.
#[derive(Debug, Clone, Default)]
pub struct FilteredNotes {
    /// Matching notes, most recently updated first.
    pub notes: Vec<Note>,
    /// Distinct non-empty tags available within the partition
    /// (color constraint applied when present).
    pub all_tags: Vec<String>,
    /// Distinct non-empty colors available within the partition
    /// (tag constraint applied when present).
    pub all_colors: Vec<String>,
}

/// Query-shaping engine over a note repository.
pub struct NoteFilterEngine {
    notes: Arc<dyn NoteRepository>,
}

impl NoteFilterEngine {
    /// Create an engine over the given note repository.
    pub fn new(notes: Arc<dyn NoteRepository>) -> Self {
        Self { notes }
    }

    /// Run the query and compute both facet lists.
    ///
    /// An empty result set is a valid outcome; the facet lists may still be
    /// non-empty since the search term does not constrain them.
    pub async fn run(
        &self,
        owner: Uuid,
        hidden: bool,
        filter: &NoteFilter,
    ) -> Result<FilteredNotes> {
        let query = NoteQuery {
            owner,
            hidden,
            filter: filter.clone().normalized(),
        };

        let notes = self.notes.list(&query).await?;
        let all_colors = self
            .notes
            .distinct_colors(owner, hidden, query.filter.tag.as_deref())
            .await?;
        let all_tags = self
            .notes
            .distinct_tags(owner, hidden, query.filter.color.as_deref())
            .await?;

        debug!(
            subsystem = "core",
            component = "filter_engine",
            op = "run",
            user_id = %owner,
            hidden,
            result_count = notes.len(),
            "Filtered notes"
        );

        Ok(FilteredNotes {
            notes,
            all_tags,
            all_colors,
        })
    }
}
