//! The page-wide dimming backdrop.
//!
//! One overlay element exists per page and every controller shares it. A
//! controller must hold the overlay's lease for the whole of its
//! open → closed round trip, so two panels can never be attached to it at
//! once.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Identifies one controller sharing an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModalId(u32);

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "modal#{}", self.0)
    }
}

struct OverlayState<N> {
    node: N,
    holder: Cell<Option<ModalId>>,
    next_id: Cell<u32>,
}

/// Shared handle to the overlay element and its lease.
pub struct SharedOverlay<N> {
    state: Rc<OverlayState<N>>,
}

impl<N> Clone for SharedOverlay<N> {
    fn clone(&self) -> Self {
        Self { state: Rc::clone(&self.state) }
    }
}

impl<N: fmt::Debug> fmt::Debug for SharedOverlay<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedOverlay")
            .field("node", &self.state.node)
            .field("holder", &self.state.holder.get())
            .finish()
    }
}

impl<N> SharedOverlay<N> {
    pub fn new(node: N) -> Self {
        Self {
            state: Rc::new(OverlayState {
                node,
                holder: Cell::new(None),
                next_id: Cell::new(0),
            }),
        }
    }

    pub fn node(&self) -> &N {
        &self.state.node
    }

    /// Allocate an id for a new controller sharing this overlay.
    pub fn register(&self) -> ModalId {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        ModalId(id)
    }

    pub fn holder(&self) -> Option<ModalId> {
        self.state.holder.get()
    }

    /// Take the lease for `id`. Succeeds if the overlay is free or already held by `id`.
    pub fn acquire(&self, id: ModalId) -> bool {
        match self.state.holder.get() {
            None => {
                self.state.holder.set(Some(id));
                true
            }
            Some(holder) => holder == id,
        }
    }

    /// Give the lease back. A release by anyone but the holder is ignored.
    pub fn release(&self, id: ModalId) {
        if self.state.holder.get() == Some(id) {
            self.state.holder.set(None);
        }
    }
}
