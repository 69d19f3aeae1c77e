//! Application layer for HCMS.
//!
//! Page controllers coordinate the session store, the backend ports and
//! the view renderers. Every controller is host-independent: it renders a
//! [`view::ViewNode`] tree and reaches the outside world only through the
//! capabilities in its [`PageContext`].

pub mod booking;
pub mod context;
pub mod pages;
pub mod sequencer;
pub mod view;

pub use booking::BookingForm;
pub use context::PageContext;
pub use pages::{Field, Form, PageController, UiEvent, mount};
pub use sequencer::RequestSequencer;
