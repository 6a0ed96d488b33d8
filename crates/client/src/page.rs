//! Page wrapper.
//!
//! The host renders every page through [`PageWrapper`]. It holds exactly one
//! child and hands it back untouched; it exists so the host has a fixed seam
//! to wrap page content at.

use std::fmt;

/// Identity container around a page's content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PageWrapper<C> {
    children: C,
}

impl<C> PageWrapper<C> {
    pub fn new(children: C) -> Self {
        Self { children }
    }

    pub fn children(&self) -> &C {
        &self.children
    }

    /// Render the page: the child, unchanged.
    pub fn render(self) -> C {
        self.children
    }
}

impl<C: fmt::Display> fmt::Display for PageWrapper<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.children.fmt(f)
    }
}

/// Render `children` through a [`PageWrapper`].
pub fn render_page<C>(children: C) -> C {
    PageWrapper::new(children).render()
}
