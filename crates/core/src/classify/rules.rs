//! Classification rule tables
//!
//! Two rule kinds map product codes found at the end of a filename to
//! display metadata: fixed-suffix rules (a literal code, e.g. `TMI_RTP_VD1`)
//! and parametric rules (a token followed by a depth such as
//! `Conductivity25m`, where the depth is folded into the description).
//!
//! Exact label wording is adopter configuration, not behavior: the
//! built-in table ships the survey products we produce today, and
//! [`RuleSet::from_json`] swaps in a customized table with the same shape.

use serde::{Deserialize, Serialize};

/// A literal product-code suffix mapped to fixed display metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedRule {
    /// Product code matched as a literal suffix of the working name.
    pub code: String,
    /// Description text for the layout's description label.
    pub description: String,
    /// Units text for the layout's units label.
    pub units: String,
    /// Legend image filename, relative to the template assets directory.
    /// `None` for products with no legend (e.g. flight path).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub legend: Option<String>,
    /// Time-channel products get their description split onto two lines
    /// at the `" after "` separator.
    #[serde(default)]
    pub time_channel: bool,
}

impl FixedRule {
    /// Create a fixed rule with a legend image.
    pub fn new(code: &str, description: &str, units: &str, legend: &str) -> Self {
        Self {
            code: code.to_string(),
            description: description.to_string(),
            units: units.to_string(),
            legend: Some(legend.to_string()),
            time_channel: false,
        }
    }

    /// Create a fixed rule for a product without a legend image.
    pub fn without_legend(code: &str, description: &str, units: &str) -> Self {
        Self {
            code: code.to_string(),
            description: description.to_string(),
            units: units.to_string(),
            legend: None,
            time_channel: false,
        }
    }

    /// Mark this rule as a time-channel product.
    pub fn time_channel(mut self) -> Self {
        self.time_channel = true;
        self
    }
}

/// A product token followed by a numeric depth with an `m` suffix,
/// matched at the end of the working name (`<token>\s*(\d+)m`).
///
/// The captured depth is appended to the description as a second line:
/// `"<description>\n<depth> m"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParametricRule {
    /// Regex fragment for the product token, e.g.
    /// `Conductivity(?:DepthSlice)?`.
    pub token: String,
    /// Match the token case-insensitively.
    #[serde(default)]
    pub case_insensitive: bool,
    /// Description label; the depth line is appended on classification.
    pub description: String,
    /// Units text for the layout's units label.
    pub units: String,
    /// Legend image filename.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub legend: Option<String>,
}

impl ParametricRule {
    /// Create a parametric rule.
    pub fn new(token: &str, description: &str, units: &str, legend: &str) -> Self {
        Self {
            token: token.to_string(),
            case_insensitive: false,
            description: description.to_string(),
            units: units.to_string(),
            legend: Some(legend.to_string()),
        }
    }

    /// Match the token case-insensitively.
    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }
}

/// The full rule table: parametric rules in priority order, then
/// fixed-suffix rules.
///
/// Parametric rules are always evaluated first, in declared order.
/// Fixed rules are matched longest-code-first so that a code which is a
/// textual suffix of a longer code (`TMI` under `TMI_RTP_VD1`) can never
/// shadow the more specific one; the sort happens when the set is
/// compiled by [`Classifier::new`](crate::classify::Classifier::new),
/// so declared order of fixed rules carries no meaning beyond breaking
/// equal-length ties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    pub parametric: Vec<ParametricRule>,
    pub fixed: Vec<FixedRule>,
}

impl RuleSet {
    /// Parse a rule set from JSON (as produced by [`RuleSet::to_json`]).
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the rule set to pretty-printed JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for RuleSet {
    /// The built-in product table for our current airborne survey
    /// deliverables: magnetics, radiometrics, EM depth slices and
    /// ancillary products.
    fn default() -> Self {
        Self {
            parametric: vec![
                ParametricRule::new(
                    "Conductivity(?:DepthSlice)?",
                    "Conductivity Depth Slice",
                    "Conductivity (mS/m)",
                    "Conductivity.png",
                ),
                ParametricRule::new(
                    "Susceptibility(?:DepthSlice)?",
                    "Susceptibility Depth Slice",
                    "Relative Susceptibility (SI)",
                    "Susceptibility.png",
                ),
                ParametricRule::new(
                    "TotalFieldMagneticsRTPresidual",
                    "Residual Filtered",
                    "Residual Filtered: TMI Reduced to Pole (nT)",
                    "TotalFieldMagneticsRTPResidual.png",
                )
                .case_insensitive(),
                ParametricRule::new(
                    "TotalFieldMagneticsRTPregional",
                    "Regional Filtered",
                    "Regional Filtered: TMI Reduced to Pole (nT)",
                    "TotalFieldMagneticsRTPRegional.png",
                )
                .case_insensitive(),
            ],
            fixed: vec![
                FixedRule::new("AGL", "Sensor Altitude", "Sensor Altitude (m)", "AGL.png"),
                FixedRule::new(
                    "dBdtZch10",
                    "dB/dt z component 0.014 ms after turnoff",
                    "dB/dt z component: channel 10 (pV/(Am^4))",
                    "dBdtZch10.png",
                )
                .time_channel(),
                FixedRule::new(
                    "DTM",
                    "Digital Terrain Model",
                    "Digital Terrain Model (m)",
                    "DTM.png",
                ),
                FixedRule::without_legend("FlightPath", "Flight Path", ""),
                FixedRule::new(
                    "TMI",
                    "Total Magnetic Intensity",
                    "Total Magnetic Intensity (nT)",
                    "TMI.png",
                ),
                FixedRule::new(
                    "TMI_RTP",
                    "TMI Reduced to Pole",
                    "Total Magnetic Intensity Reduced to Pole (nT)",
                    "TotalFieldMagneticsRTP.png",
                ),
                FixedRule::new(
                    "TMI_RTP_AS",
                    "Analytical Signal",
                    "Analytical Signal (nT/m)",
                    "TMI_RTP_AS.png",
                ),
                FixedRule::new(
                    "TMI_RTP_HD_TDR",
                    "Horizontal Derivative of the Tilt",
                    "Tilt Horizontal Derivative : TMI Reduced to Pole (rad/m)",
                    "TMI_RTP_HD_TDR.png",
                ),
                FixedRule::new(
                    "TMI_RTP_RMI",
                    "Residual Magnetic Intensity",
                    "IGRF corrected TMI (nT)",
                    "TMI_RTP_RMI.png",
                ),
                FixedRule::new(
                    "TMI_RTP_TDR",
                    "Tilt Derivative",
                    "Tilt Derivative: TMI Reduced to Pole (rad)",
                    "TMI_RTP_TDR.png",
                ),
                FixedRule::new(
                    "TMI_RTP_THDR",
                    "Total Horizontal Gradient",
                    "Total Horizontal Gradient: TMI Reduced to Pole (nT/m)",
                    "TMI_RTP_THDR.png",
                ),
                FixedRule::new(
                    "TMI_RTP_VD1",
                    "First Vertical Derivative",
                    "First Vertical Derivative: TMI Reduced to Pole (nT/m)",
                    "TMI_RTP_VD1.png",
                ),
                FixedRule::new(
                    "Th-K_Ratio",
                    "Thorium / Potassium Ratio",
                    "Th / K Ratio",
                    "Th-K_Ratio.png",
                ),
                FixedRule::new(
                    "U-K_Ratio",
                    "Uranium / Potassium Ratio",
                    "U / K Ratio",
                    "U-K_Ratio.png",
                ),
                FixedRule::new(
                    "U-Th_Ratio",
                    "Uranium / Thorium Ratio",
                    "U / Th Ratio",
                    "U-Th_Ratio.png",
                ),
                FixedRule::new("Ternary", "Radiometric Ternary Image", "", "Ternary.png"),
                FixedRule::new(
                    "Total_NASVD",
                    "Radiometric Total Count",
                    "Counts (cps)",
                    "Total_NASVD.png",
                ),
                FixedRule::new(
                    "Th_NASVD",
                    "Thorium NASVD Processed",
                    "Thorium %",
                    "Th_NASVD.png",
                ),
                FixedRule::new(
                    "U_NASVD",
                    "Uranium NASVD Processed",
                    "Uranium %",
                    "U_NASVD.png",
                ),
                FixedRule::new(
                    "K_NASVD",
                    "Potassium NASVD Processed",
                    "Potassium %",
                    "K_NASVD.png",
                ),
            ],
        }
    }
}
