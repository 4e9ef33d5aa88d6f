//! Detail modal state: the image carousel, the close paths, and the page
//! scroll suspension.
//!
//! The carousel index belongs to one modal instance; opening a modal for a
//! different project means constructing a new instance, which is what
//! resets the index to 0. Scroll restoration rides on `Drop` so every exit
//! path — explicit close, backdrop click, Escape, or abrupt teardown —
//! releases the page.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::project::Project;

/// How the modal was dismissed. All variants converge on the same close
/// behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    CloseButton,
    Backdrop,
    Escape,
}

/// Image carousel over a fixed-length image list.
#[derive(Debug, Clone, Copy)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Advance to the next image, wrapping. No-op with one image or none.
    pub fn next(&mut self) {
        if self.len > 1 {
            self.index = (self.index + 1) % self.len;
        }
    }

    /// Step back to the previous image, wrapping. No-op with one image or
    /// none.
    pub fn prev(&mut self) {
        if self.len > 1 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    /// Jump straight to an image (the indicator dots). Out-of-range input
    /// is ignored.
    pub fn set(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }
}

/// Shared page-scroll state. Suspension is counted so nested guards (or a
/// guard outliving a re-open) cannot unfreeze the page early.
#[derive(Debug, Clone, Default)]
pub struct PageScroll {
    suspended: Arc<AtomicUsize>,
}

impl PageScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::SeqCst) > 0
    }

    /// Suspend scrolling until the returned guard is dropped.
    pub fn suspend(&self) -> ScrollGuard {
        self.suspended.fetch_add(1, Ordering::SeqCst);
        ScrollGuard {
            suspended: Arc::clone(&self.suspended),
        }
    }
}

/// Restores page scroll when dropped.
#[derive(Debug)]
pub struct ScrollGuard {
    suspended: Arc<AtomicUsize>,
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        self.suspended.fetch_sub(1, Ordering::SeqCst);
    }
}

/// An open detail modal for one project.
#[derive(Debug)]
pub struct DetailModal {
    project: Project,
    carousel: Carousel,
    _scroll: ScrollGuard,
}

impl DetailModal {
    /// Open the modal: captures the project, starts the carousel at 0, and
    /// suspends page scroll for the modal's lifetime.
    pub fn open(project: Project, scroll: &PageScroll) -> Self {
        let carousel = Carousel::new(project.images.len());
        Self {
            project,
            carousel,
            _scroll: scroll.suspend(),
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    /// Close the modal, returning the project so the caller can clear its
    /// grid selection. Scroll restoration happens on drop regardless of
    /// the reason.
    pub fn close(self, reason: CloseReason) -> Project {
        let _ = reason;
        self.project
    }
}
