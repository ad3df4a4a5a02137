//! Event targets and the text-entry heuristic.
//!
//! Hotkeys stay quiet while the user is typing. The dispatcher asks the
//! event's target (and, failing that, its ancestors) whether it is a
//! text-entry element; the nearest editable element decides.

/// The `type` of an input element, as far as hotkey suppression cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    /// Free text, including password, search, email and similar fields.
    Text,
    /// Numeric entry.
    Number,
    /// A checkbox or toggle switch.
    Checkbox,
    /// A radio button.
    Radio,
}

/// What kind of element an event target is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// A single-line input.
    Input {
        /// The input's type.
        input_type: InputType,
        /// Read-only inputs never suppress hotkeys.
        read_only: bool,
    },
    /// A multi-line text area.
    TextArea {
        /// Read-only text areas never suppress hotkeys.
        read_only: bool,
    },
    /// Any other element, optionally marked content-editable.
    Generic {
        /// Whether the element accepts free-form text editing.
        content_editable: bool,
    },
}

impl ElementKind {
    fn is_editable(&self) -> bool {
        match self {
            ElementKind::Input { .. } | ElementKind::TextArea { .. } => true,
            ElementKind::Generic { content_editable } => *content_editable,
        }
    }

    fn accepts_text(&self) -> bool {
        match self {
            ElementKind::Input {
                input_type: InputType::Checkbox | InputType::Radio,
                ..
            } => false,
            ElementKind::Input { read_only, .. } | ElementKind::TextArea { read_only } => {
                !read_only
            }
            ElementKind::Generic { content_editable } => *content_editable,
        }
    }
}

/// Something a key event can be aimed at.
///
/// Widget trees implement this for whatever represents their focused node.
pub trait EventTarget {
    /// Describe this element. Returning `None` means the target cannot
    /// describe itself; such targets never suppress hotkeys.
    fn kind(&self) -> Option<ElementKind>;

    /// The enclosing element, if any.
    fn parent(&self) -> Option<&dyn EventTarget> {
        None
    }
}

/// Return whether key events aimed at `target` belong to a text-entry field.
///
/// Walks from the target outwards to the nearest editable element (input,
/// text area, or content-editable node). Checkboxes, radio buttons, and
/// read-only fields do not count.
pub fn is_text_input(target: Option<&dyn EventTarget>) -> bool {
    let Some(target) = target else {
        return false;
    };
    if target.kind().is_none() {
        return false;
    }

    let mut current: Option<&dyn EventTarget> = Some(target);
    while let Some(node) = current {
        if let Some(kind) = node.kind().filter(ElementKind::is_editable) {
            return kind.accepts_text();
        }
        current = node.parent();
    }
    false
}

/// A plain owned element tree node, handy for widgets that don't have their
/// own target type and for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    kind: ElementKind,
    parent: Option<Box<Element>>,
}

impl Element {
    /// Create an element of the given kind with no parent.
    pub fn new(kind: ElementKind) -> Self {
        Self { kind, parent: None }
    }

    /// A free-text input.
    pub fn text_input() -> Self {
        Self::input(InputType::Text)
    }

    /// An input of the given type.
    pub fn input(input_type: InputType) -> Self {
        Self::new(ElementKind::Input {
            input_type,
            read_only: false,
        })
    }

    /// A checkbox input.
    pub fn checkbox() -> Self {
        Self::input(InputType::Checkbox)
    }

    /// A radio input.
    pub fn radio() -> Self {
        Self::input(InputType::Radio)
    }

    /// A multi-line text area.
    pub fn textarea() -> Self {
        Self::new(ElementKind::TextArea { read_only: false })
    }

    /// A non-editable container.
    pub fn container() -> Self {
        Self::new(ElementKind::Generic {
            content_editable: false,
        })
    }

    /// A content-editable container.
    pub fn content_editable() -> Self {
        Self::new(ElementKind::Generic {
            content_editable: true,
        })
    }

    /// Mark an input or text area read-only. No effect on other kinds.
    pub fn read_only(mut self) -> Self {
        match &mut self.kind {
            ElementKind::Input { read_only, .. } | ElementKind::TextArea { read_only } => {
                *read_only = true;
            }
            ElementKind::Generic { .. } => {}
        }
        self
    }

    /// Nest this element inside `parent`.
    pub fn inside(mut self, parent: Element) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }
}

impl EventTarget for Element {
    fn kind(&self) -> Option<ElementKind> {
        Some(self.kind)
    }

    fn parent(&self) -> Option<&dyn EventTarget> {
        self.parent.as_deref().map(|p| p as &dyn EventTarget)
    }
}
