//! Static reference data served alongside the calculator.
//!
//! IPCC 2006 Tier 1 defaults, the built-in scenario presets and the academic
//! citations behind them. Nothing here computes anything.

use crate::preset::ScenarioPreset;
use serde::Serialize;

/// Forest sequestration rate, tropical rainforest (tCO2/ha/yr, IPCC 2006 Table 4.9)
pub const FOREST_SEQUESTRATION_RATE: f64 = 6.9;
/// Mangrove sequestration rate (tCO2/ha/yr, Alongi 2014)
pub const COASTAL_SEQUESTRATION_RATE: f64 = 6.6;
/// Root-to-shoot ratio for below-ground biomass, tropical moist forest
pub const ROOT_TO_SHOOT_RATIO: f64 = 0.37;

/// Land forest area (ha)
pub const INDONESIA_FOREST_AREA: f64 = 120_343_230.0;
/// Coastal/mangrove forest area (ha)
pub const INDONESIA_COASTAL_AREA: f64 = 5_321_321.0;

/// Baseline emissions peak (MtCO2e)
pub const DEFAULT_EMISSIONS_2030: f64 = 1244.0;
/// Emissions target (MtCO2e)
pub const DEFAULT_TARGET_2050: f64 = 540.0;
/// Share of the reduction delivered by sequestration (%)
pub const DEFAULT_SEQUESTRATION_PERCENT: f64 = 60.0;
pub const DEFAULT_START_YEAR: i32 = 2030;
pub const DEFAULT_TARGET_YEAR: i32 = 2050;

/// A built-in scenario preset with its display text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub forest_percent: f64,
    pub include_below_ground: bool,
    pub description: &'static str,
}

impl ScenarioInfo {
    pub fn coastal_percent(&self) -> f64 {
        100.0 - self.forest_percent
    }

    /// The attribute set a preset button for this scenario carries.
    pub fn preset(&self) -> ScenarioPreset {
        ScenarioPreset {
            id: self.key.to_string(),
            forest_percent: self.forest_percent,
            include_below_ground: self.include_below_ground,
        }
    }
}

pub const SCENARIOS: [ScenarioInfo; 4] = [
    ScenarioInfo {
        key: "conservative",
        name: "Conservative",
        forest_percent: 90.0,
        include_below_ground: false,
        description: "Reflects current area ratio (~95:5)",
    },
    ScenarioInfo {
        key: "balanced",
        name: "Balanced",
        forest_percent: 80.0,
        include_below_ground: false,
        description: "Higher coastal efficiency",
    },
    ScenarioInfo {
        key: "coastal_optimized",
        name: "Coastal-Optimized",
        forest_percent: 70.0,
        include_below_ground: false,
        description: "Maximum mangrove potential",
    },
    ScenarioInfo {
        key: "full_biomass",
        name: "Full Biomass",
        forest_percent: 80.0,
        include_below_ground: true,
        description: "+37% sequestration (R:S ratio)",
    },
];

/// Look up a built-in scenario by key.
pub fn scenario(key: &str) -> Option<&'static ScenarioInfo> {
    SCENARIOS.iter().find(|s| s.key == key)
}

/// Academic reference with citation details.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reference {
    pub id: &'static str,
    pub authors: &'static str,
    pub year: u16,
    pub title: &'static str,
    pub journal: &'static str,
    pub key_finding: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'static str>,
}

pub const REFERENCES: [Reference; 10] = [
    Reference {
        id: "murdiyarso2015",
        authors: "Murdiyarso, D., Purbopuspito, J., Kauffman, J.B., et al.",
        year: 2015,
        title: "The potential of Indonesian mangrove forests for global climate change mitigation",
        journal: "Nature Climate Change",
        key_finding: "Indonesian mangroves store ~1,083 Mg C/ha, 5x higher than terrestrial forests",
        doi: Some("10.1038/nclimate2734"),
        url: Some("https://www.nature.com/articles/nclimate2734"),
    },
    Reference {
        id: "alongi2014",
        authors: "Alongi, D.M.",
        year: 2014,
        title: "Carbon cycling and storage in mangrove forests",
        journal: "Estuarine, Coastal and Shelf Science",
        key_finding: "Mangrove conservation more cost-effective than restoration for emission reduction",
        doi: Some("10.1016/j.ecss.2014.01.004"),
        url: Some("https://www.sciencedirect.com/science/article/abs/pii/S0272771414000183"),
    },
    Reference {
        id: "hergoualch2011",
        authors: "Hergoualc'h, K. & Verchot, L.V.",
        year: 2011,
        title: "Stocks and fluxes of carbon associated with land use change in Southeast Asian tropical peatlands",
        journal: "Biogeosciences",
        key_finding: "Tropical peat/mangrove emit 3-5x more CO2 when degraded vs. mineral soils",
        doi: Some("10.5194/bg-8-69-2011"),
        url: Some("https://bg.copernicus.org/articles/8/69/2011/"),
    },
    Reference {
        id: "ipcc2006",
        authors: "IPCC",
        year: 2006,
        title: "2006 IPCC Guidelines for National Greenhouse Gas Inventories, Volume 4: AFOLU",
        journal: "Intergovernmental Panel on Climate Change",
        key_finding: "Tier 1 default values for forest biomass growth and carbon fractions",
        doi: None,
        url: Some("https://www.ipcc-nggip.iges.or.jp/public/2006gl/vol4.html"),
    },
    Reference {
        id: "ipcc2013wetlands",
        authors: "IPCC",
        year: 2013,
        title: "2013 Supplement to the 2006 IPCC Guidelines: Wetlands",
        journal: "Intergovernmental Panel on Climate Change",
        key_finding: "Specific guidance for coastal wetlands and mangrove ecosystems",
        doi: None,
        url: Some("https://www.ipcc-nggip.iges.or.jp/public/wetlands/"),
    },
    Reference {
        id: "indonesia_ndc2022",
        authors: "Republic of Indonesia",
        year: 2022,
        title: "Enhanced Nationally Determined Contribution",
        journal: "UNFCCC",
        key_finding: "LULUCF sector delivers 60-63% of national emission reductions by 2030",
        doi: None,
        url: Some("https://unfccc.int/documents/499746"),
    },
    Reference {
        id: "folu_netsink2030",
        authors: "Ministry of Environment and Forestry, Indonesia",
        year: 2021,
        title: "Indonesia's FOLU Net Sink 2030",
        journal: "National Strategy Document",
        key_finding: "Forestry sector targeting net carbon sink by 2030",
        doi: None,
        url: Some("https://www.menlhk.go.id/"),
    },
    Reference {
        id: "chapin2002",
        authors: "Chapin, F.S., Matson, P.A., and Mooney, H.A.",
        year: 2002,
        title: "Principles of Terrestrial Ecosystem Ecology",
        journal: "Springer",
        key_finding: "Fundamental principles of ecosystem carbon cycling and sequestration dynamics",
        doi: None,
        url: Some("https://link.springer.com/book/10.1007/978-1-4419-9504-9"),
    },
    Reference {
        id: "baldocchi2008",
        authors: "Baldocchi, D.",
        year: 2008,
        title: "'Breathing' of the terrestrial biosphere: lessons learned from a global network of carbon dioxide flux measurement systems",
        journal: "Australian Journal of Botany",
        key_finding: "Global synthesis of CO2 flux measurements across various biomes",
        doi: Some("10.1071/BT08014"),
        url: Some("https://www.publish.csiro.au/ajb/BT08014"),
    },
    Reference {
        id: "grace2006",
        authors: "Grace, J. and Zhang, R.",
        year: 2006,
        title: "Predicting the effect of climate change on global plant productivity and the carbon cycle",
        journal: "Plant Growth and Climate Change (Blackwell Publishing)",
        key_finding: "Modeling climate feedback loops on forest sequestration capacity",
        doi: None,
        url: Some("https://onlinelibrary.wiley.com/doi/book/10.1002/9780470988695"),
    },
];

/// Default parameter document, grouped the way the calculator page uses it.
#[derive(Debug, Clone, Serialize)]
pub struct Defaults {
    pub emissions: EmissionDefaults,
    pub areas: AreaDefaults,
    pub rates: RateDefaults,
    pub years: YearDefaults,
    pub scenarios: Vec<ScenarioSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmissionDefaults {
    pub baseline_2030: f64,
    pub target_2050: f64,
    pub sequestration_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AreaDefaults {
    pub forest_ha: f64,
    pub coastal_ha: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RateDefaults {
    pub forest_tco2_ha_yr: f64,
    pub coastal_tco2_ha_yr: f64,
    pub root_to_shoot_ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearDefaults {
    pub start_year: i32,
    pub target_year: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummary {
    pub key: &'static str,
    pub name: &'static str,
    pub forest_percent: f64,
    pub coastal_percent: f64,
    pub include_below_ground: bool,
    pub description: &'static str,
}

impl Defaults {
    pub fn new() -> Self {
        Self {
            emissions: EmissionDefaults {
                baseline_2030: DEFAULT_EMISSIONS_2030,
                target_2050: DEFAULT_TARGET_2050,
                sequestration_percent: DEFAULT_SEQUESTRATION_PERCENT,
            },
            areas: AreaDefaults {
                forest_ha: INDONESIA_FOREST_AREA,
                coastal_ha: INDONESIA_COASTAL_AREA,
            },
            rates: RateDefaults {
                forest_tco2_ha_yr: FOREST_SEQUESTRATION_RATE,
                coastal_tco2_ha_yr: COASTAL_SEQUESTRATION_RATE,
                root_to_shoot_ratio: ROOT_TO_SHOOT_RATIO,
            },
            years: YearDefaults {
                start_year: DEFAULT_START_YEAR,
                target_year: DEFAULT_TARGET_YEAR,
            },
            scenarios: SCENARIOS
                .iter()
                .map(|s| ScenarioSummary {
                    key: s.key,
                    name: s.name,
                    forest_percent: s.forest_percent,
                    coastal_percent: s.coastal_percent(),
                    include_below_ground: s.include_below_ground,
                    description: s.description,
                })
                .collect(),
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self::new()
    }
}
