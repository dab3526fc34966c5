use crate::types::RowList;

/// Opaque host-level action handle, passed through the template unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAction {
    label: String,
}

impl HostAction {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Label the host renders for this action.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Opaque handle to the host's map-surface renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(u64);

impl SurfaceHandle {
    #[must_use]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// An action slot in the template header or action strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateAction {
    /// Host-rendered back affordance.
    Back,
    /// Host-supplied action carried through unmodified.
    Host(HostAction),
}

/// Body of the place list: a loading indicator, a no-items message, or rows.
#[derive(Debug, Clone)]
pub enum TemplateBody {
    Loading,
    NoItems { message: String },
    Rows(RowList),
}

/// Declarative description of the screen handed to the host for rendering.
///
/// Produced on demand by a pure state read; the host decides when to ask.
#[derive(Debug, Clone)]
pub struct PlaceListTemplate {
    pub title: String,
    pub header_action: TemplateAction,
    pub actions: Vec<TemplateAction>,
    pub body: TemplateBody,
}

impl PlaceListTemplate {
    /// Whether the body is the loading indicator.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.body, TemplateBody::Loading)
    }

    /// Rows when populated, `None` for the loading and no-items bodies.
    #[must_use]
    pub fn rows(&self) -> Option<&RowList> {
        match &self.body {
            TemplateBody::Rows(rows) => Some(rows),
            _ => None,
        }
    }
}
