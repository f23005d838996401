//! Overlay presentation state for the add/edit form.

/// Holds the modal content while it is open. Opening again replaces the
/// content; modals do not stack.
#[derive(Debug, Clone)]
pub struct Modal<T> {
    content: Option<T>,
}

impl<T> Default for Modal<T> {
    fn default() -> Self {
        Self { content: None }
    }
}

impl<T> Modal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, content: T) {
        self.content = Some(content);
    }

    /// Close the modal, handing back its content.
    pub fn close(&mut self) -> Option<T> {
        self.content.take()
    }

    pub fn is_open(&self) -> bool {
        self.content.is_some()
    }

    /// While open, the page behind renders blurred.
    pub fn backdrop_blurred(&self) -> bool {
        self.is_open()
    }

    pub fn content(&self) -> Option<&T> {
        self.content.as_ref()
    }

    pub fn content_mut(&mut self) -> Option<&mut T> {
        self.content.as_mut()
    }
}
