//! Modal stack for managing overlays
//!
//! Overlays (confirmations, record detail, help) live on a stack; only the
//! top one receives input.

use super::ui::RecordRef;

/// Represents a modal overlay that can be displayed on top of the main UI
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Delete confirmation for one record
    ConfirmDelete(RecordRef),
    /// Field-by-field view of one record
    RecordDetail(RecordRef),
    /// Help dialog showing all keyboard shortcuts
    Help,
}

/// A stack of modal overlays
///
/// Modals are rendered from bottom to top, with only the top modal
/// receiving input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    /// Get a reference to the top modal without removing it
    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Drop every overlay that refers to `record`
    pub fn forget(&mut self, record: &RecordRef) {
        self.stack.retain(|modal| match modal {
            Modal::ConfirmDelete(r) | Modal::RecordDetail(r) => {
                r.page != record.page || r.key != record.key
            }
            _ => true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ui::Page;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::QuitConfirm);
        stack.push(Modal::Help);

        assert_eq!(stack.pop(), Some(Modal::Help));
        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_forget_removes_overlays_for_record() {
        let target = RecordRef::new(Page::Campaigns, "7", "Spring");
        let other = RecordRef::new(Page::Contacts, "7", "Ada");

        let mut stack = ModalStack::new();
        stack.push(Modal::RecordDetail(target.clone()));
        stack.push(Modal::RecordDetail(other.clone()));
        stack.push(Modal::ConfirmDelete(target.clone()));

        stack.forget(&target);

        assert_eq!(stack.top(), Some(&Modal::RecordDetail(other)));
        stack.pop();
        assert!(stack.is_empty());
    }
}
