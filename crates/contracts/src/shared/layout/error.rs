use thiserror::Error;

/// Validation failures of layout insert operations.
///
/// The `Display` text is shown to the user as-is next to the form that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("Name must not be empty")]
    EmptyName,

    #[error("Link must not be empty")]
    EmptyHref,

    #[error("Select a parent item for the submenu entry")]
    MissingParent,

    #[error("Parent item not found: {0}")]
    ParentNotFound(String),

    #[error("Add at least one button with both a label and a link")]
    NoValidButtons,
}
