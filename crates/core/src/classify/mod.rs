//! Filename classification
//!
//! Infers print-layout metadata (title, description, units, legend
//! image) from a map-product filename. Survey deliverables follow the
//! naming convention `[<datum> ]<site title><product code>.<ext>`, e.g.
//! `WGS84 Block3_TMI_RTP_VD1.tif`, and classification is a pure lookup
//! against the product-code [`RuleSet`]: parametric depth-slice rules
//! first, then fixed codes longest-first. Unknown products degrade to a
//! title-only result; classification never fails.

mod rules;

pub use rules::{FixedRule, ParametricRule, RuleSet};

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Leading geodetic-datum token, dropped before any rule is tried.
static DATUM_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(?:WGS84|NAD83)\s+").expect("datum prefix pattern"));

/// Metadata inferred from a single filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Site/block title: the filename stem up to the product code.
    pub title: String,
    /// Description text; may span two lines for depth slices and
    /// time-channel products. Empty when the product is unknown.
    pub description: String,
    /// Units text. Empty when the product is unknown or unitless.
    pub units: String,
    /// Legend image filename, relative to the template assets
    /// directory. `None` when no legend exists for the product.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub legend: Option<String>,
}

impl Classification {
    /// A no-match result: the whole working name as title, nothing else.
    fn unmatched(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            units: String::new(),
            legend: None,
        }
    }
}

/// A parametric rule with its anchored suffix pattern compiled.
#[derive(Debug, Clone)]
struct CompiledParametric {
    regex: Regex,
    rule: ParametricRule,
}

/// Filename classifier over a compiled, immutable rule set.
///
/// Construction compiles the parametric patterns and sorts the fixed
/// rules by descending code length; after that the classifier is
/// read-only and safe to share across threads.
///
/// # Example
/// ```
/// use mappress_core::classify::Classifier;
///
/// let classifier = Classifier::default();
/// let c = classifier.classify("WGS84 Block3_DTM.tif");
/// assert_eq!(c.title, "Block3");
/// assert_eq!(c.description, "Digital Terrain Model");
/// ```
#[derive(Debug, Clone)]
pub struct Classifier {
    parametric: Vec<CompiledParametric>,
    fixed: Vec<FixedRule>,
}

impl Classifier {
    /// Compile a rule set into a classifier.
    ///
    /// Fails only if a parametric token pattern is not valid regex
    /// syntax (possible with caller-supplied tables).
    pub fn new(rules: RuleSet) -> Result<Self> {
        let parametric = rules
            .parametric
            .into_iter()
            .map(|rule| {
                let flags = if rule.case_insensitive { "(?i)" } else { "" };
                let pattern = format!(r"{}(?:{})\s*(\d+)m$", flags, rule.token);
                let regex = Regex::new(&pattern).map_err(|e| Error::Pattern {
                    pattern: rule.token.clone(),
                    reason: e.to_string(),
                })?;
                Ok(CompiledParametric { regex, rule })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut fixed = rules.fixed;
        // Longest code first; equal lengths keep table order.
        fixed.sort_by_key(|r| std::cmp::Reverse(r.code.len()));

        Ok(Self { parametric, fixed })
    }

    /// Classify a filename or path.
    ///
    /// Only the base name matters; directories and the extension are
    /// stripped first. This is a total function: an unrecognized
    /// product yields the whole working name as the title with empty
    /// description/units and no legend, never an error.
    pub fn classify(&self, filename: &str) -> Classification {
        let stem = Path::new(filename)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let working = match DATUM_PREFIX.find(&stem) {
            Some(m) => stem[m.end()..].trim().to_string(),
            None => stem.trim().to_string(),
        };

        for compiled in &self.parametric {
            if let Some(caps) = compiled.regex.captures(&working) {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                let depth = caps.get(1).map_or("", |m| m.as_str());
                let title = tidy_title(&working[..working.len() - whole.len()]);
                return Classification {
                    title,
                    description: format!("{}\n{} m", compiled.rule.description, depth),
                    units: compiled.rule.units.clone(),
                    legend: compiled.rule.legend.clone(),
                };
            }
        }

        for rule in &self.fixed {
            if working.ends_with(&rule.code) {
                let title = tidy_title(&working[..working.len() - rule.code.len()]);
                let mut description = rule.description.clone();
                if rule.time_channel {
                    description = split_time_channel(&description);
                }
                return Classification {
                    title,
                    description,
                    units: rule.units.clone(),
                    legend: rule.legend.clone(),
                };
            }
        }

        Classification::unmatched(&working)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        // The built-in table only contains literal tokens and one
        // optional group, all valid patterns.
        Self::new(RuleSet::default()).expect("built-in rule table compiles")
    }
}

/// Trim the separator left behind where the product code was removed
/// (`Site1_TMI` titles as `Site1`, not `Site1_`).
fn tidy_title(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .to_string()
}

/// Move the `after ...` clause of a time-channel description onto its
/// own line so it fits the description label.
fn split_time_channel(description: &str) -> String {
    match description.find(" after ") {
        Some(idx) => format!("{}\n{}", &description[..idx], &description[idx + 1..]),
        None => description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::default()
    }

    #[test]
    fn test_fixed_code_lookup() {
        let c = classifier().classify("Block3_DTM.tif");
        assert_eq!(c.title, "Block3");
        assert_eq!(c.description, "Digital Terrain Model");
        assert_eq!(c.units, "Digital Terrain Model (m)");
        assert_eq!(c.legend.as_deref(), Some("DTM.png"));
    }

    #[test]
    fn test_longest_code_wins() {
        let c = classifier().classify("Site1_TMI_RTP_VD1.tif");
        assert_eq!(c.title, "Site1");
        assert_eq!(c.description, "First Vertical Derivative");
        assert_eq!(c.legend.as_deref(), Some("TMI_RTP_VD1.png"));

        // The bare code still matches on its own.
        let c = classifier().classify("Site1_TMI.tif");
        assert_eq!(c.description, "Total Magnetic Intensity");
    }

    #[test]
    fn test_conductivity_depth_slice() {
        let c = classifier().classify("Area_Conductivity25m.tif");
        assert_eq!(c.title, "Area");
        assert_eq!(c.description, "Conductivity Depth Slice\n25 m");
        assert_eq!(c.units, "Conductivity (mS/m)");
        assert_eq!(c.legend.as_deref(), Some("Conductivity.png"));
    }

    #[test]
    fn test_depth_slice_long_spelling_matches_short() {
        let cls = classifier();
        let long = cls.classify("Area_ConductivityDepthSlice25m.tif");
        let short = cls.classify("Area_Conductivity25m.tif");
        assert_eq!(long, short);
    }

    #[test]
    fn test_susceptibility_depth_slice() {
        let c = classifier().classify("Grid_SusceptibilityDepthSlice 150m.tif");
        assert_eq!(c.title, "Grid");
        assert_eq!(c.description, "Susceptibility Depth Slice\n150 m");
        assert_eq!(c.units, "Relative Susceptibility (SI)");
    }

    #[test]
    fn test_filtered_depths_match_any_case() {
        let c = classifier().classify("North_totalfieldmagneticsrtpRESIDUAL 200m.tif");
        assert_eq!(c.title, "North");
        assert_eq!(c.description, "Residual Filtered\n200 m");
        assert_eq!(c.legend.as_deref(), Some("TotalFieldMagneticsRTPResidual.png"));

        let c = classifier().classify("North_TotalFieldMagneticsRTPregional400m.tif");
        assert_eq!(c.description, "Regional Filtered\n400 m");
    }

    #[test]
    fn test_depth_slice_spelling_is_case_sensitive() {
        // Unlike the filtered products, depth slices must keep the
        // canonical capitalization.
        let c = classifier().classify("Area_conductivity25m.tif");
        assert_eq!(c.description, "");
        assert_eq!(c.title, "Area_conductivity25m");
    }

    #[test]
    fn test_datum_prefix_stripped() {
        let cls = classifier();
        let with = cls.classify("WGS84 Block3_DTM.tif");
        let without = cls.classify("Block3_DTM.tif");
        assert_eq!(with, without);
        assert_eq!(with.title, "Block3");

        let nad = cls.classify("nad83 Block3_DTM.tif");
        assert_eq!(nad, without);
    }

    #[test]
    fn test_time_channel_description_split() {
        let c = classifier().classify("X_dBdtZch10.tif");
        assert_eq!(
            c.description,
            "dB/dt z component 0.014 ms\nafter turnoff"
        );
    }

    #[test]
    fn test_no_match_falls_back_to_title() {
        let c = classifier().classify("UnknownProduct123.tif");
        assert_eq!(c.title, "UnknownProduct123");
        assert_eq!(c.description, "");
        assert_eq!(c.units, "");
        assert!(c.legend.is_none());
    }

    #[test]
    fn test_degenerate_inputs() {
        let cls = classifier();
        assert_eq!(cls.classify("").title, "");
        assert_eq!(cls.classify("noextension").title, "noextension");
        assert_eq!(cls.classify(".tif").title, ".tif");
    }

    #[test]
    fn test_path_and_extension_ignored() {
        let c = classifier().classify("/data/survey/WGS84 Block3_TMI_RTP.tif");
        assert_eq!(c.title, "Block3");
        assert_eq!(c.description, "TMI Reduced to Pole");
    }

    #[test]
    fn test_flight_path_has_no_legend() {
        let c = classifier().classify("Block3_FlightPath.tif");
        assert_eq!(c.description, "Flight Path");
        assert!(c.legend.is_none());
    }

    #[test]
    fn test_classify_is_pure() {
        let cls = classifier();
        let a = cls.classify("Site1_TMI_RTP_VD1.tif");
        let b = cls.classify("Site1_TMI_RTP_VD1.tif");
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_custom_pattern_is_rejected() {
        let mut rules = RuleSet::default();
        rules.parametric.push(ParametricRule::new(
            "Broken(",
            "Broken",
            "",
            "broken.png",
        ));
        assert!(matches!(
            Classifier::new(rules),
            Err(Error::Pattern { .. })
        ));
    }
}
