//! Layout state capture and restore
//!
//! Batch generation duplicates one hand-tuned layout per raster, and
//! the operator's adjustments (scale, extent, rotation, scale-bar
//! formatting) must survive onto every copy. A [`LayoutSnapshot`] is a
//! flat record of those properties: `capture` reads whatever the
//! layout carries, `apply` writes every captured value back. No
//! interpretation happens in between, so capture-then-apply always
//! round-trips.

use crate::composer::ItemIds;
use crate::host::{ItemProperty, LayoutHost, PropertyValue};
use mappress_core::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The fixed property set recorded per layout: the map frame's view
/// state and the scale bar's formatting, each tagged with the item it
/// is read from.
const CAPTURED: &[(Target, ItemProperty)] = &[
    (Target::Map, ItemProperty::MapScale),
    (Target::Map, ItemProperty::MapExtent),
    (Target::Map, ItemProperty::MapRotation),
    (Target::ScaleBar, ItemProperty::ScaleBarSegments),
    (Target::ScaleBar, ItemProperty::ScaleBarUnitsPerSegment),
    (Target::ScaleBar, ItemProperty::ScaleBarUnitLabel),
];

/// Which configured item a property belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum Target {
    Map,
    ScaleBar,
}

impl Target {
    fn item_id<'a>(&self, ids: &'a ItemIds) -> &'a str {
        match self {
            Target::Map => &ids.map,
            Target::ScaleBar => &ids.scale_bar,
        }
    }
}

/// One captured property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SnapshotEntry {
    target: Target,
    property: ItemProperty,
    value: PropertyValue,
}

/// A captured set of layout item properties.
///
/// Serializable, so a batch run can persist the operator's adjustments
/// between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    entries: Vec<SnapshotEntry>,
}

impl LayoutSnapshot {
    /// Record every property of the fixed set the layout carries.
    /// Properties the host reports as absent are simply not captured.
    pub fn capture<H: LayoutHost>(host: &H, layout: &H::Layout, ids: &ItemIds) -> Self {
        let mut entries = Vec::new();
        for &(target, property) in CAPTURED {
            if let Some(value) = host.item_property(layout, target.item_id(ids), property) {
                entries.push(SnapshotEntry {
                    target,
                    property,
                    value,
                });
            }
        }
        debug!(captured = entries.len(), "captured layout state");
        Self { entries }
    }

    /// Write every captured value back onto `layout`. Properties that
    /// were absent at capture time are not written.
    pub fn apply<H: LayoutHost>(
        &self,
        host: &mut H,
        layout: &mut H::Layout,
        ids: &ItemIds,
    ) -> Result<()> {
        for entry in &self.entries {
            host.set_item_property(
                layout,
                entry.target.item_id(ids),
                entry.property,
                &entry.value,
            )?;
        }
        debug!(applied = self.entries.len(), "applied layout state");
        Ok(())
    }

    /// Whether anything was captured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of captured properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
