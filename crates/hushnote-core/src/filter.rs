//! Filter criteria for note queries.
//!
//! `NoteFilter` is an explicit, immutable criteria struct: each field is an
//! `Option` where `None` means "no constraint". Sentinel values (the literal
//! `"all"` accepted by the HTTP query surface) are translated to `None` at
//! the boundary and never reach this type.
//!
//! This module also defines the reference matching semantics
//! ([`NoteFilter::matches`]). Every repository implementation must agree
//! with them: the in-memory repository applies them directly, the Postgres
//! repository mirrors them in SQL.

use serde::{Deserialize, Serialize};

use crate::models::Note;

/// Filter criteria over one owner+hidden partition of notes.
///
/// # Example
///
/// ```
/// use hushnote_core::NoteFilter;
///
/// let filter = NoteFilter::new().with_tag("home").with_search("milk");
/// assert!(!filter.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFilter {
    /// Case-insensitive exact match against the note tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Case-insensitive exact match against the note color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Case-insensitive substring match against title OR description OR tag.
    /// Ignored when blank after trimming.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl NoteFilter {
    /// Create a new empty filter (no constraints).
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain to notes with this tag (case-insensitive exact match).
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Constrain to notes with this color (case-insensitive exact match).
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Constrain to notes matching this search term.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Check if the filter is empty (no constraints).
    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.color.is_none() && !self.has_search()
    }

    /// Whether an effective (non-blank) search term is present.
    pub fn has_search(&self) -> bool {
        self.search
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }

    /// Drop a search term that is blank after trimming.
    ///
    /// The surviving term is kept verbatim; matching trims nothing.
    pub fn normalized(mut self) -> Self {
        if !self.has_search() {
            self.search = None;
        }
        self
    }

    /// Reference matching semantics for a single note.
    ///
    /// Applies only the criteria in this struct; partition scoping (owner,
    /// hidden, deleted) is the repository's base query and is not repeated
    /// here.
    pub fn matches(&self, note: &Note) -> bool {
        if let Some(tag) = &self.tag {
            if !note.tag.as_deref().is_some_and(|t| eq_ignore_case(t, tag)) {
                return false;
            }
        }
        if let Some(color) = &self.color {
            if !note
                .color
                .as_deref()
                .is_some_and(|c| eq_ignore_case(c, color))
            {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !search.trim().is_empty() {
                let hit = contains_ignore_case(&note.title, search)
                    || contains_ignore_case(&note.description, search)
                    || note
                        .tag
                        .as_deref()
                        .is_some_and(|t| contains_ignore_case(t, search));
                if !hit {
                    return false;
                }
            }
        }
        true
    }
}

/// Case-insensitive string equality.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Case-insensitive substring containment.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn note(title: &str, description: &str, tag: Option<&str>, color: Option<&str>) -> Note {
        Note {
            id: Uuid::new_v4(),
            owner: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            tag: tag.map(String::from),
            color: color.map(String::from),
            is_hidden: false,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = NoteFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&note("Groceries", "milk and eggs", None, None)));
    }

    #[test]
    fn test_tag_match_is_case_insensitive_exact() {
        let filter = NoteFilter::new().with_tag("Home");
        assert!(filter.matches(&note("a", "b", Some("home"), None)));
        assert!(filter.matches(&note("a", "b", Some("HOME"), None)));
        assert!(!filter.matches(&note("a", "b", Some("homework"), None)));
        assert!(!filter.matches(&note("a", "b", None, None)));
    }

    #[test]
    fn test_color_match_is_case_insensitive_exact() {
        let filter = NoteFilter::new().with_color("#FF0000");
        assert!(filter.matches(&note("a", "b", None, Some("#ff0000"))));
        assert!(!filter.matches(&note("a", "b", None, Some("#00ff00"))));
    }

    #[test]
    fn test_search_is_or_across_fields() {
        let filter = NoteFilter::new().with_search("work");
        assert!(filter.matches(&note("Work log", "x", None, None)));
        assert!(filter.matches(&note("x", "homework due", None, None)));
        assert!(filter.matches(&note("x", "y", Some("workout"), None)));
        assert!(!filter.matches(&note("x", "y", Some("home"), None)));
    }

    #[test]
    fn test_search_matching_only_tag_still_matches() {
        let filter = NoteFilter::new().with_search("errand");
        assert!(filter.matches(&note("Groceries", "milk", Some("errands"), None)));
    }

    #[test]
    fn test_search_is_anded_with_tag_constraint() {
        let filter = NoteFilter::new().with_tag("home").with_search("milk");
        assert!(filter.matches(&note("Groceries", "milk and eggs", Some("home"), None)));
        assert!(!filter.matches(&note("Groceries", "milk and eggs", Some("work"), None)));
        assert!(!filter.matches(&note("Todo", "mow lawn", Some("home"), None)));
    }

    #[test]
    fn test_blank_search_is_no_constraint() {
        let filter = NoteFilter::new().with_search("   ").normalized();
        assert!(filter.search.is_none());
        assert!(filter.is_empty());
        assert!(filter.matches(&note("a", "b", None, None)));
    }

    #[test]
    fn test_blank_search_ignored_even_without_normalization() {
        let filter = NoteFilter::new().with_search("  ");
        assert!(!filter.has_search());
        assert!(filter.matches(&note("a", "b", None, None)));
    }

    #[test]
    fn test_normalized_keeps_real_search_verbatim() {
        let filter = NoteFilter::new().with_search(" milk ").normalized();
        assert_eq!(filter.search.as_deref(), Some(" milk "));
    }

    #[test]
    fn test_builder_pattern() {
        let filter = NoteFilter::new()
            .with_tag("home")
            .with_color("#ff0000")
            .with_search("milk");
        assert_eq!(filter.tag.as_deref(), Some("home"));
        assert_eq!(filter.color.as_deref(), Some("#ff0000"));
        assert_eq!(filter.search.as_deref(), Some("milk"));
    }
}
