//! Query parameter decoding for list endpoints.
//!
//! The external surface accepts the literal `"all"` (and blank values) to
//! mean "no constraint", a convention the UI's dropdowns rely on. That
//! sentinel is translated to `None` here, at the boundary, and never
//! reaches the filter engine.

use serde::Deserialize;

use hushnote_core::NoteFilter;

/// Raw query parameters of a list-notes request.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    pub tag: Option<String>,
    pub color: Option<String>,
    pub search: Option<String>,
}

impl ListQuery {
    /// Decode into core filter criteria, resolving the `"all"` sentinel.
    pub fn into_filter(self) -> NoteFilter {
        NoteFilter {
            tag: constraint(self.tag),
            color: constraint(self.color),
            search: self.search.filter(|s| !s.trim().is_empty()),
        }
    }
}

/// Echo value for a dropdown: the applied constraint, or `"all"`.
pub fn selected(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "all".to_string())
}

fn constraint(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty() && v != "all")
}
