//! Print-layout composition
//!
//! Wires a [`Classification`] into a layout held by the host: creates
//! the layout from the template (or clones an existing one for batch
//! runs), points the map frame at the raster and fills the
//! title/description/units/legend placeholder items.

use crate::host::LayoutHost;
use mappress_core::{Classification, Classifier, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Client banner shown on every layout unless overridden.
pub const DEFAULT_CLIENT_LOCATION: &str = "Axiom Exploration\nRio de Janeiro, Brazil";

/// Layers that stay visible when a layout isolates its raster.
pub fn default_exception_layers() -> BTreeSet<String> {
    [
        "Esri World Imagery (Clarity) Beta",
        "Google Satellite Hybrid",
        "property AOI",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Template-assigned ids of the placeholder items a layout template
/// must carry. Items missing from a template are skipped with a
/// warning, so stripped-down templates (e.g. without a legend frame)
/// still compose.
#[derive(Debug, Clone)]
pub struct ItemIds {
    pub map: String,
    pub title: String,
    pub description: String,
    pub units: String,
    pub legend: String,
    pub client: String,
    pub scale_bar: String,
}

impl Default for ItemIds {
    fn default() -> Self {
        Self {
            map: "SatMap".to_string(),
            title: "Title".to_string(),
            description: "Description".to_string(),
            units: "Units".to_string(),
            legend: "Legend".to_string(),
            client: "ClientLocation".to_string(),
            scale_bar: "ScaleBar".to_string(),
        }
    }
}

/// Produces finished print layouts from classified rasters.
pub struct LayoutComposer {
    classifier: Classifier,
    template: PathBuf,
    /// Directory holding the legend images referenced by the rule table.
    assets_dir: PathBuf,
    item_ids: ItemIds,
    client_location: String,
    transparency_style: Option<PathBuf>,
    /// Never hidden by [`LayoutComposer::isolate`]. Caller-mutable.
    pub exception_layers: BTreeSet<String>,
}

impl LayoutComposer {
    /// Create a composer for a template and its assets directory, with
    /// the default rule table, item ids and exception layers.
    pub fn new(template: impl Into<PathBuf>, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            classifier: Classifier::default(),
            template: template.into(),
            assets_dir: assets_dir.into(),
            item_ids: ItemIds::default(),
            client_location: DEFAULT_CLIENT_LOCATION.to_string(),
            transparency_style: None,
            exception_layers: default_exception_layers(),
        }
    }

    /// Use a customized classifier (e.g. an adopter-supplied rule table).
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Override the placeholder item ids.
    pub fn with_item_ids(mut self, ids: ItemIds) -> Self {
        self.item_ids = ids;
        self
    }

    /// Apply this style file to rasters during [`LayoutComposer::isolate`].
    pub fn with_transparency_style(mut self, style: impl Into<PathBuf>) -> Self {
        self.transparency_style = Some(style.into());
        self
    }

    /// Update the client banner text.
    pub fn set_client_location(&mut self, client_location: impl Into<String>) {
        self.client_location = client_location.into();
    }

    /// Classify a filename with this composer's rule table.
    pub fn classify(&self, filename: &str) -> Classification {
        self.classifier.classify(filename)
    }

    /// Absolute path of the legend image for a classification, if the
    /// product has one.
    pub fn legend_path(&self, classification: &Classification) -> Option<PathBuf> {
        classification
            .legend
            .as_ref()
            .map(|name| self.assets_dir.join(name))
    }

    /// Create a layout from the template and populate it from the
    /// raster's filename.
    ///
    /// The map is zoomed to the raster extent; batch runs that restore
    /// a snapshot afterwards should use
    /// [`LayoutComposer::compose_duplicate`] instead.
    pub fn compose<H: LayoutHost>(
        &self,
        host: &mut H,
        raster: &H::Raster,
        source_filename: &str,
        layout_name: &str,
    ) -> Result<H::Layout> {
        let layout = host.create_layout_from_template(&self.template, layout_name)?;
        info!(layout = layout_name, "created layout from template");
        self.populate(host, &layout, raster, source_filename, true)?;
        Ok(layout)
    }

    /// Clone an existing layout under a new name and repopulate it,
    /// keeping the source layout's scale and extent.
    pub fn compose_duplicate<H: LayoutHost>(
        &self,
        host: &mut H,
        source: &H::Layout,
        raster: &H::Raster,
        source_filename: &str,
        new_name: &str,
    ) -> Result<H::Layout> {
        let layout = host.duplicate_layout(source, new_name)?;
        info!(layout = new_name, "duplicated layout");
        self.populate(host, &layout, raster, source_filename, false)?;
        Ok(layout)
    }

    /// Apply the transparency style to the raster and hide every other
    /// layer except the exception set.
    pub fn isolate<H: LayoutHost>(&self, host: &mut H, raster: &H::Raster) -> Result<()> {
        if let Some(style) = &self.transparency_style {
            host.apply_layer_style(raster, style)?;
            debug!(layer = %host.raster_name(raster), "applied transparency style");
        }
        host.show_only_layer(raster, &self.exception_layers)?;
        info!(
            layer = %host.raster_name(raster),
            exceptions = self.exception_layers.len(),
            "hid other layers"
        );
        Ok(())
    }

    fn populate<H: LayoutHost>(
        &self,
        host: &mut H,
        layout: &H::Layout,
        raster: &H::Raster,
        source_filename: &str,
        zoom_to_extent: bool,
    ) -> Result<()> {
        let classification = self.classifier.classify(source_filename);
        debug!(
            file = source_filename,
            title = %classification.title,
            "classified raster"
        );

        match host.item_by_id(layout, &self.item_ids.map) {
            Some(item) => host.set_map_raster(&item, raster, zoom_to_extent)?,
            None => warn!(id = %self.item_ids.map, "map item missing, skipped"),
        }

        self.set_label(host, layout, &self.item_ids.title, &classification.title)?;
        self.set_label(
            host,
            layout,
            &self.item_ids.description,
            &classification.description,
        )?;
        self.set_label(host, layout, &self.item_ids.units, &classification.units)?;
        self.set_label(host, layout, &self.item_ids.client, &self.client_location)?;

        if let Some(legend) = self.legend_path(&classification) {
            match host.item_by_id(layout, &self.item_ids.legend) {
                Some(item) => host.set_picture_path(&item, &legend)?,
                None => warn!(id = %self.item_ids.legend, "legend item missing, skipped"),
            }
        }

        Ok(())
    }

    /// Write a label if the text is non-empty; empty classification
    /// fields leave the template's placeholder text alone.
    fn set_label<H: LayoutHost>(
        &self,
        host: &mut H,
        layout: &H::Layout,
        id: &str,
        text: &str,
    ) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        match host.item_by_id(layout, id) {
            Some(item) => host.set_label_text(&item, text),
            None => {
                warn!(id, "label item missing, skipped");
                Ok(())
            }
        }
    }

    /// The placeholder ids this composer targets.
    pub fn item_ids(&self) -> &ItemIds {
        &self.item_ids
    }
}
