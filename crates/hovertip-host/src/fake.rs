#![forbid(unsafe_code)]

//! Deterministic in-memory host for tests.
//!
//! [`FakeElement`] records attributes and attached listener sets so
//! tests can assert ARIA sync and attach/detach symmetry; containment
//! is modeled with parent links. [`FakeWindow`] is a settable viewport.
//!
//! Single-threaded by design (`Rc`/`RefCell`), matching the host model:
//! everything runs on the UI thread.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use hovertip_core::geometry::{Rect, Viewport};

use crate::{ElementHandle, HostWindow, Listener};

#[derive(Debug, Default)]
struct ElementInner {
    rect: Rect,
    attributes: BTreeMap<String, String>,
    listeners: Listener,
    parent: Option<FakeElement>,
}

/// A fake host element with shared interior state.
///
/// Clones are handles to the same element, like DOM element references.
#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    inner: Rc<RefCell<ElementInner>>,
}

impl FakeElement {
    /// Create an element with the given bounding rectangle.
    pub fn new(rect: Rect) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ElementInner {
                rect,
                ..ElementInner::default()
            })),
        }
    }

    /// Move/resize the element.
    pub fn set_rect(&self, rect: Rect) {
        self.inner.borrow_mut().rect = rect;
    }

    /// Read back an attribute, if set.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.inner.borrow().attributes.get(name).cloned()
    }

    /// The currently attached listener set.
    pub fn listeners(&self) -> Listener {
        self.inner.borrow().listeners
    }

    /// Whether any listener is still attached.
    pub fn has_listeners(&self) -> bool {
        !self.inner.borrow().listeners.is_empty()
    }

    /// Create a child element contained in this one's subtree.
    pub fn spawn_child(&self, rect: Rect) -> FakeElement {
        let child = FakeElement::new(rect);
        child.inner.borrow_mut().parent = Some(self.clone());
        child
    }
}

impl ElementHandle for FakeElement {
    fn rect(&self) -> Rect {
        self.inner.borrow().rect
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.inner
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, name: &str) {
        self.inner.borrow_mut().attributes.remove(name);
    }

    fn contains(&self, other: &Self) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if self.ptr_eq(&node) {
                return true;
            }
            current = node.inner.borrow().parent.clone();
        }
        false
    }

    fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn add_listeners(&self, listeners: Listener) {
        self.inner.borrow_mut().listeners |= listeners;
    }

    fn remove_listeners(&self, listeners: Listener) {
        self.inner.borrow_mut().listeners &= !listeners;
    }
}

/// A fake window with a settable viewport.
#[derive(Debug, Clone)]
pub struct FakeWindow {
    viewport: Rc<RefCell<Viewport>>,
}

impl FakeWindow {
    /// Create a window with the given viewport metrics.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport: Rc::new(RefCell::new(viewport)),
        }
    }

    /// Replace the viewport metrics (resize or scroll).
    pub fn set_viewport(&self, viewport: Viewport) {
        *self.viewport.borrow_mut() = viewport;
    }
}

impl HostWindow for FakeWindow {
    fn viewport(&self) -> Viewport {
        *self.viewport.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let el = FakeElement::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        let other = el.clone();
        el.set_attribute("aria-describedby", "tip-1");
        assert_eq!(other.attribute("aria-describedby").as_deref(), Some("tip-1"));
        assert!(el.ptr_eq(&other));
    }

    #[test]
    fn attribute_removal() {
        let el = FakeElement::new(Rect::default());
        el.set_attribute("aria-expanded", "true");
        el.remove_attribute("aria-expanded");
        assert_eq!(el.attribute("aria-expanded"), None);
    }

    #[test]
    fn listener_bookkeeping_is_symmetric() {
        let el = FakeElement::new(Rect::default());
        el.add_listeners(Listener::POINTER_ENTER | Listener::KEY_DOWN);
        assert!(el.has_listeners());
        el.remove_listeners(Listener::POINTER_ENTER | Listener::KEY_DOWN);
        assert!(!el.has_listeners());
    }

    #[test]
    fn containment_walks_parent_chain() {
        let root = FakeElement::new(Rect::default());
        let child = root.spawn_child(Rect::default());
        let grandchild = child.spawn_child(Rect::default());
        let stranger = FakeElement::new(Rect::default());

        assert!(root.contains(&root));
        assert!(root.contains(&child));
        assert!(root.contains(&grandchild));
        assert!(child.contains(&grandchild));
        assert!(!child.contains(&root));
        assert!(!root.contains(&stranger));
    }

    #[test]
    fn window_viewport_is_settable() {
        let window = FakeWindow::new(Viewport::new(800.0, 600.0));
        window.set_viewport(Viewport::new(1024.0, 768.0).scrolled(0.0, 50.0));
        assert_eq!(window.viewport().height, 768.0);
        assert_eq!(window.viewport().scroll_y, 50.0);
    }
}
