/// iced-side collaborators of the synchronization controller

use crate::sync::controller::SearchInput;
use crate::ui::projector::{Frame, Surface};

/// Backing value of the search text input
#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    value: String,
}

impl SearchBox {
    /// Mirror what the user typed
    pub fn type_text(&mut self, value: String) {
        self.value = value;
    }
}

impl SearchInput for SearchBox {
    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }
}

/// Keeps the most recent frame for `view` to draw
#[derive(Debug, Clone, Default)]
pub struct LatestFrame {
    frame: Option<Frame>,
}

impl LatestFrame {
    /// Nothing is painted until the controller starts
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }
}

impl Surface for LatestFrame {
    fn paint(&mut self, frame: &Frame) {
        self.frame = Some(frame.clone());
    }
}
