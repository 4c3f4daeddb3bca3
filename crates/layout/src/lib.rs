//! # MapPress Layout
//!
//! Print-layout composition for MapPress.
//!
//! This crate provides:
//! - `LayoutHost`: the contract with the GIS application's
//!   print-composition subsystem (templates, items, rasters, layer tree)
//! - `LayoutComposer`: feeds filename classifications into a host
//! - `LayoutSnapshot`: flat capture/restore of scale, extent and
//!   scale-bar formatting across batch-generated layouts
//!
//! The host's object graph is never touched directly; a plugin binding
//! implements [`LayoutHost`] against the real application.

pub mod composer;
pub mod host;
pub mod snapshot;

pub use composer::{default_exception_layers, ItemIds, LayoutComposer, DEFAULT_CLIENT_LOCATION};
pub use host::{ItemProperty, LayoutHost, PropertyValue};
pub use snapshot::LayoutSnapshot;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::composer::{ItemIds, LayoutComposer};
    pub use crate::host::{ItemProperty, LayoutHost, PropertyValue};
    pub use crate::snapshot::LayoutSnapshot;
    pub use mappress_core::prelude::*;
}
