//! Headless overlay runtime: modal lifecycle, focus management, and portal layering.
//!
//! State transitions live in [`reduce_modal`], which only emits [`ModalEffect`] intents. The
//! [`ModalCoordinator`] executes those intents against an [`OverlayHost`] through scoped guards,
//! so every scroll lock, inert marking, and portal mount is released exactly once on close or
//! drop. `overlay_host_web` provides the browser host; [`MemoryOverlayHost`] backs tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod coordinator;
pub mod focus;
pub mod guards;
pub mod host;
pub mod memory;
pub mod model;
pub mod portal;
pub mod reducer;

pub use coordinator::{DispatchOutcome, ModalCoordinator};
pub use focus::{cycle_focus, initial_focus_target};
pub use guards::{InertGuard, PortalLease, ScrollLockGuard};
pub use host::OverlayHost;
pub use memory::{MemoryOverlayHost, NodeId};
pub use model::{CloseReason, ModalIds, ModalOptions, ModalState};
pub use portal::{PortalLayer, PortalManager, PORTAL_BASE_Z_INDEX};
pub use reducer::{reduce_modal, ModalAction, ModalEffect, ModalError};
