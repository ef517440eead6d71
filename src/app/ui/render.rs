//! Draw targets
//!
//! The registry decides what is drawn and in which order; a [`Canvas`]
//! decides how it becomes pixels.

use super::element::Align;
use crate::app::geometry::Rect;

/// Surface the render sweep draws onto
pub trait Canvas {
    /// Debug outline of a bare container
    fn outline(&mut self, element: &str, rect: Rect);

    /// Filled background, brighter when highlighted
    fn fill(&mut self, element: &str, rect: Rect, highlighted: bool);

    /// Single line of text placed inside `rect`
    fn text(&mut self, element: &str, rect: Rect, text: &str, align: Align);
}

/// One recorded canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Outline {
        element: String,
        rect: Rect,
    },
    Fill {
        element: String,
        rect: Rect,
        highlighted: bool,
    },
    Text {
        element: String,
        rect: Rect,
        text: String,
        align: Align,
    },
}

impl DrawCommand {
    pub fn element(&self) -> &str {
        match self {
            Self::Outline { element, .. } | Self::Fill { element, .. } | Self::Text { element, .. } => {
                element
            }
        }
    }
}

/// Canvas that records commands instead of drawing
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Element names in draw order, without consecutive duplicates
    pub fn element_order(&self) -> Vec<&str> {
        let mut order: Vec<&str> = Vec::new();
        for command in &self.commands {
            if order.last() != Some(&command.element()) {
                order.push(command.element());
            }
        }
        order
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for DrawList {
    fn outline(&mut self, element: &str, rect: Rect) {
        self.commands.push(DrawCommand::Outline {
            element: element.to_string(),
            rect,
        });
    }

    fn fill(&mut self, element: &str, rect: Rect, highlighted: bool) {
        self.commands.push(DrawCommand::Fill {
            element: element.to_string(),
            rect,
            highlighted,
        });
    }

    fn text(&mut self, element: &str, rect: Rect, text: &str, align: Align) {
        self.commands.push(DrawCommand::Text {
            element: element.to_string(),
            rect,
            text: text.to_string(),
            align,
        });
    }
}
