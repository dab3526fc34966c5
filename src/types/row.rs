use crate::icons::RowIcon;
use crate::types::geo::LatLon;
use crate::types::result::ResultItem;

/// Placeholder secondary line for rows whose result has no description.
pub const EMPTY_MARKER: &str = " ";

/// The secondary line of a row: description text plus an optional trailing
/// distance badge.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionLine {
    /// [`EMPTY_MARKER`] or a bullet-prefixed description.
    pub text: String,
    /// Formatted distance badge; absent when no reference location or no
    /// result location was available.
    pub distance: Option<String>,
}

impl DescriptionLine {
    /// Build the line from an optional description and an optional badge.
    #[must_use]
    pub fn new(description: Option<&str>, distance: Option<String>) -> Self {
        let text = match description {
            Some(text) if !text.is_empty() => format!("• {text}"),
            _ => EMPTY_MARKER.to_string(),
        };
        Self { text, distance }
    }

    /// Single-string rendering for hosts without badge spans.
    #[must_use]
    pub fn display(&self) -> String {
        match &self.distance {
            Some(badge) if self.text == EMPTY_MARKER => format!("{EMPTY_MARKER}{badge}"),
            Some(badge) => format!("{} · {badge}", self.text),
            None => self.text.clone(),
        }
    }
}

/// One immutable, clickable row of the place list.
///
/// Rows are created fresh on every successful search completion and replaced
/// wholesale; they are never mutated in place.
#[derive(Debug, Clone)]
pub struct DisplayRow {
    pub title: String,
    pub icon: RowIcon,
    pub description: DescriptionLine,
    /// Location the host may pin on its map surface.
    pub place: Option<LatLon>,
    item: ResultItem,
}

impl DisplayRow {
    /// Assemble a row bound to the result it was built from.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        icon: RowIcon,
        description: DescriptionLine,
        item: ResultItem,
    ) -> Self {
        let place = item.location();
        Self {
            title: title.into(),
            icon,
            description,
            place,
            item,
        }
    }

    /// The originating result this row selects.
    #[must_use]
    pub fn item(&self) -> &ResultItem {
        &self.item
    }
}

/// Ordered rows of the populated state.
#[derive(Debug, Clone, Default)]
pub struct RowList {
    rows: Vec<DisplayRow>,
    truncated: bool,
}

impl RowList {
    /// Wrap built rows, recording whether the capacity rule dropped a suffix.
    #[must_use]
    pub fn new(rows: Vec<DisplayRow>, truncated: bool) -> Self {
        Self { rows, truncated }
    }

    /// All rows in display order.
    #[must_use]
    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    /// Row at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DisplayRow> {
        self.rows.get(index)
    }

    /// Number of rows shown.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows are shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether more results existed than the display capacity allowed.
    #[must_use]
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}
