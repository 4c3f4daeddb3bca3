//! Layout host interface
//!
//! The GIS application owns the print-composition object graph: layout
//! manager, layout items, raster layers and the layer tree. MapPress
//! never manipulates those objects directly; everything goes through
//! [`LayoutHost`], which a plugin binding implements against the real
//! application and tests implement in memory.

use mappress_core::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Properties captured and restored across batch layout generation.
///
/// This is the complete captured set: the map item's view state plus
/// the scale bar's formatting. Hosts report `None` from
/// [`LayoutHost::item_property`] for anything the layout doesn't carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemProperty {
    MapScale,
    MapExtent,
    MapRotation,
    ScaleBarSegments,
    ScaleBarUnitsPerSegment,
    ScaleBarUnitLabel,
}

/// A captured property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Number(f64),
    Integer(i64),
    Text(String),
    Extent {
        xmin: f64,
        ymin: f64,
        xmax: f64,
        ymax: f64,
    },
}

/// Contract with the GIS application's print-composition subsystem.
///
/// Handle types are opaque to MapPress; the binding decides what a
/// layout, item or raster actually is. All mutating operations are
/// fallible with the shared [`mappress_core::Error`] variants and every
/// failure is recoverable (retry under another name, skip the item).
pub trait LayoutHost {
    /// A print layout registered with the host's layout manager.
    type Layout;
    /// An item placed on a layout (map frame, label, picture, scale bar).
    type Item;
    /// A raster layer loaded in the host project.
    type Raster;

    /// Instantiate a layout from a template file and register it under
    /// `name`. Fails with `LayoutNameExists`, `TemplateNotFound` or
    /// `InvalidTemplate`.
    fn create_layout_from_template(&mut self, template: &Path, name: &str)
        -> Result<Self::Layout>;

    /// Clone an existing layout, preserving all item state. Fails with
    /// `LayoutNameExists`.
    fn duplicate_layout(&mut self, source: &Self::Layout, new_name: &str)
        -> Result<Self::Layout>;

    /// Look up a layout item by its template-assigned id.
    fn item_by_id(&self, layout: &Self::Layout, id: &str) -> Option<Self::Item>;

    /// Point a map item at a raster layer. Fails with `InvalidRaster`
    /// if the layer is broken. `zoom_to_extent` recenters the map on
    /// the raster; leave it off when the view state comes from a
    /// snapshot instead.
    fn set_map_raster(
        &mut self,
        item: &Self::Item,
        raster: &Self::Raster,
        zoom_to_extent: bool,
    ) -> Result<()>;

    /// Replace the text of a label item.
    fn set_label_text(&mut self, item: &Self::Item, text: &str) -> Result<()>;

    /// Point a picture item at an image file. Fails with
    /// `PictureNotFound` if the file does not exist.
    fn set_picture_path(&mut self, item: &Self::Item, path: &Path) -> Result<()>;

    /// Display name of a raster layer, for logging and the layer tree.
    fn raster_name(&self, raster: &Self::Raster) -> String;

    /// Apply a saved style file (e.g. a transparency QML) to a raster
    /// layer. Fails with `StyleNotFound` or `StyleRejected`.
    fn apply_layer_style(&mut self, raster: &Self::Raster, style: &Path) -> Result<()>;

    /// Walk the layer tree making `keep` visible and everything else
    /// hidden, except layers whose names are in `exceptions`.
    fn show_only_layer(&mut self, keep: &Self::Raster, exceptions: &BTreeSet<String>)
        -> Result<()>;

    /// Read a property from the item with the given id, or `None` when
    /// the item or property is absent on this layout.
    fn item_property(
        &self,
        layout: &Self::Layout,
        item_id: &str,
        property: ItemProperty,
    ) -> Option<PropertyValue>;

    /// Write a property back to the item with the given id. Fails with
    /// `Property` when the host refuses the write.
    fn set_item_property(
        &mut self,
        layout: &mut Self::Layout,
        item_id: &str,
        property: ItemProperty,
        value: &PropertyValue,
    ) -> Result<()>;
}
