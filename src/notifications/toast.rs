//! Toast Data Model
//!
//! Defines the toast entity held by the store, the content a caller supplies
//! when raising one, and the partial changes accepted by an update.
//! Display payload (title, description, action, variant) is never interpreted
//! by the store, only stored and forwarded to render surfaces.

use std::fmt;
use std::sync::Arc;
use serde::{Deserialize, Serialize};

/// Unique toast identifier, assigned by the store at creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(String);

impl ToastId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ToastId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for ToastId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ToastId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Visual treatment requested for a toast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// Optional action button rendered alongside a toast (e.g. "Undo")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastActionButton {
    pub label: String,
    /// Accessible description of what the action does
    pub alt_text: String,
}

impl ToastActionButton {
    pub fn new(label: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            alt_text: alt_text.into(),
        }
    }
}

/// Content supplied by a caller when raising a toast
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastContent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub action: Option<ToastActionButton>,
    #[serde(default)]
    pub variant: ToastVariant,
}

impl ToastContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for the common title-only toast
    pub fn titled(title: impl Into<String>) -> Self {
        Self::new().with_title(title)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_action(mut self, action: ToastActionButton) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_variant(mut self, variant: ToastVariant) -> Self {
        self.variant = variant;
        self
    }
}

/// Partial changes applied to an existing toast
///
/// Fields left as `None` keep their current value. Visibility is not part of
/// an update: closing goes through dismissal and a closed toast never reopens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub action: Option<ToastActionButton>,
    pub variant: Option<ToastVariant>,
}

impl ToastUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_action(mut self, action: ToastActionButton) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_variant(mut self, variant: ToastVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.action.is_none()
            && self.variant.is_none()
    }
}

/// A `Default` variant in content carries no change; resetting a destructive
/// toast needs an explicit [`ToastUpdate::with_variant`].
impl From<ToastContent> for ToastUpdate {
    fn from(content: ToastContent) -> Self {
        Self {
            title: content.title,
            description: content.description,
            action: content.action,
            variant: (content.variant != ToastVariant::Default).then_some(content.variant),
        }
    }
}

/// Callback a render surface invokes when a toast's visibility changes
/// outside the store (for example, the user clicked its close button)
#[derive(Clone)]
pub struct OpenChangeHandler(Arc<dyn Fn(bool) + Send + Sync>);

impl OpenChangeHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        Self(Arc::new(handler))
    }

    pub fn call(&self, open: bool) {
        (self.0)(open)
    }
}

impl fmt::Debug for OpenChangeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OpenChangeHandler")
    }
}

/// A toast tracked by the store
#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub id: ToastId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ToastActionButton>,
    pub variant: ToastVariant,
    pub open: bool,
    #[serde(skip)]
    on_open_change: Option<OpenChangeHandler>,
}

impl Toast {
    /// Build an open toast from caller content
    pub fn new(id: ToastId, content: ToastContent) -> Self {
        Self {
            id,
            title: content.title,
            description: content.description,
            action: content.action,
            variant: content.variant,
            open: true,
            on_open_change: None,
        }
    }

    pub fn with_open_change(mut self, handler: OpenChangeHandler) -> Self {
        self.on_open_change = Some(handler);
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Report a visibility change from the render surface
    pub fn on_open_change(&self, open: bool) {
        if let Some(handler) = &self.on_open_change {
            handler.call(open);
        }
    }

    /// Shallow-merge the provided fields into this toast
    pub(crate) fn merge(&mut self, changes: &ToastUpdate) {
        if let Some(title) = &changes.title {
            self.title = Some(title.clone());
        }
        if let Some(description) = &changes.description {
            self.description = Some(description.clone());
        }
        if let Some(action) = &changes.action {
            self.action = Some(action.clone());
        }
        if let Some(variant) = changes.variant {
            self.variant = variant;
        }
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
    }
}

// The open-change callback is identity-less wiring, not state.
impl PartialEq for Toast {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.description == other.description
            && self.action == other.action
            && self.variant == other.variant
            && self.open == other.open
    }
}

impl Eq for Toast {}

/// Ordered snapshot of active toasts, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
}

impl ToastState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn get(&self, id: &ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|toast| &toast.id == id)
    }

    pub fn contains(&self, id: &ToastId) -> bool {
        self.get(id).is_some()
    }

    /// Newest toast, if any
    pub fn front(&self) -> Option<&Toast> {
        self.toasts.first()
    }

    pub fn ids(&self) -> Vec<ToastId> {
        self.toasts.iter().map(|toast| toast.id.clone()).collect()
    }

    pub fn open_count(&self) -> usize {
        self.toasts.iter().filter(|toast| toast.open).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_toast_from_content() {
        let content = ToastContent::titled("Uploaded")
            .with_description("report.pdf processed")
            .with_action(ToastActionButton::new("Undo", "Undo upload"));
        let toast = Toast::new(ToastId::from(7), content);

        assert_eq!(toast.id.as_str(), "7");
        assert_eq!(toast.title.as_deref(), Some("Uploaded"));
        assert_eq!(toast.description.as_deref(), Some("report.pdf processed"));
        assert_eq!(toast.action.as_ref().map(|a| a.label.as_str()), Some("Undo"));
        assert_eq!(toast.variant, ToastVariant::Default);
        assert!(toast.is_open());
    }

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let mut toast = Toast::new(
            ToastId::from(1),
            ToastContent::titled("A").with_description("first"),
        );
        toast.merge(&ToastUpdate::new().with_title("B"));

        assert_eq!(toast.title.as_deref(), Some("B"));
        assert_eq!(toast.description.as_deref(), Some("first"));
        assert!(toast.open);
    }

    #[test]
    fn test_update_from_content() {
        let update = ToastUpdate::from(
            ToastContent::titled("Failed").with_variant(ToastVariant::Destructive),
        );
        assert_eq!(update.title.as_deref(), Some("Failed"));
        assert_eq!(update.variant, Some(ToastVariant::Destructive));
        assert!(update.description.is_none());
        assert!(!update.is_empty());
        assert!(ToastUpdate::new().is_empty());

        let update = ToastUpdate::from(ToastContent::new().with_description("retry later"));
        assert!(update.variant.is_none());
    }

    #[test]
    fn test_open_change_handler_invoked() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&called);
        let toast = Toast::new(ToastId::from(1), ToastContent::titled("A"))
            .with_open_change(OpenChangeHandler::new(move |open| {
                if !open {
                    flag.store(true, Ordering::SeqCst);
                }
            }));

        toast.on_open_change(true);
        assert!(!called.load(Ordering::SeqCst));
        toast.on_open_change(false);
        assert!(called.load(Ordering::SeqCst));
    }

    #[test]
    fn test_equality_ignores_handler() {
        let plain = Toast::new(ToastId::from(1), ToastContent::titled("A"));
        let wired = plain.clone().with_open_change(OpenChangeHandler::new(|_| {}));
        assert_eq!(plain, wired);
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let toast = Toast::new(ToastId::from(3), ToastContent::titled("Saved"));
        let json = serde_json::to_string(&toast).unwrap();

        assert!(json.contains(r#""id":"3""#));
        assert!(json.contains(r#""title":"Saved""#));
        assert!(json.contains(r#""variant":"default""#));
        assert!(json.contains(r#""open":true"#));
        assert!(!json.contains("description"));
        assert!(!json.contains("on_open_change"));
    }

    #[test]
    fn test_state_lookup() {
        let state = ToastState {
            toasts: vec![
                Toast::new(ToastId::from(2), ToastContent::titled("B")),
                Toast::new(ToastId::from(1), ToastContent::titled("A")),
            ],
        };

        assert_eq!(state.len(), 2);
        assert_eq!(state.front().map(|t| t.id.as_str()), Some("2"));
        assert!(state.contains(&ToastId::from(1)));
        assert!(!state.contains(&ToastId::from(3)));
        assert_eq!(state.ids(), vec![ToastId::from(2), ToastId::from(1)]);
        assert_eq!(state.open_count(), 2);
    }
}
