//! Shopping guide types and the static retailer catalog

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use autoclaim_types::Part;

/// Parts commonly available used or from salvage yards
pub const USED_ELIGIBLE_PARTS: [Part; 4] = [Part::Door, Part::Hood, Part::Bumper, Part::Mirror];

/// Purchase option tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseTier {
    Oem,
    CertifiedAftermarket,
    AftermarketStandard,
    UsedSalvage,
}

impl PurchaseTier {
    /// Multipliers of the base part cost: (min, max, estimated)
    pub fn price_band(&self) -> (f64, f64, f64) {
        match self {
            PurchaseTier::Oem => (1.1, 1.5, 1.3),
            PurchaseTier::CertifiedAftermarket => (0.8, 1.1, 1.0),
            PurchaseTier::AftermarketStandard => (0.5, 0.8, 0.65),
            PurchaseTier::UsedSalvage => (0.2, 0.4, 0.3),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PurchaseTier::Oem => "OEM (Original Equipment)",
            PurchaseTier::CertifiedAftermarket => "OEM Equivalent (Certified Aftermarket)",
            PurchaseTier::AftermarketStandard => "Aftermarket Standard",
            PurchaseTier::UsedSalvage => "Used / Salvage Yard",
        }
    }

    pub fn quality(&self) -> &'static str {
        match self {
            PurchaseTier::Oem => "Highest",
            PurchaseTier::CertifiedAftermarket => "High",
            PurchaseTier::AftermarketStandard => "Standard",
            PurchaseTier::UsedSalvage => "Variable",
        }
    }

    pub fn warranty(&self) -> &'static str {
        match self {
            PurchaseTier::Oem => "Manufacturer warranty (typically 12+ months)",
            PurchaseTier::CertifiedAftermarket => "1-2 year warranty",
            PurchaseTier::AftermarketStandard => "90 days - 1 year limited warranty",
            PurchaseTier::UsedSalvage => "Limited or no warranty (as-is)",
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            PurchaseTier::Oem => "Dealership or authorized OEM suppliers",
            PurchaseTier::CertifiedAftermarket => "Certified aftermarket brands (CAPA certified)",
            PurchaseTier::AftermarketStandard => "Budget aftermarket suppliers",
            PurchaseTier::UsedSalvage => "Auto salvage yards, Pull-A-Part, LKQ",
        }
    }

    pub fn pros(&self) -> &'static [&'static str] {
        match self {
            PurchaseTier::Oem => &[
                "Perfect fit guaranteed",
                "Highest quality materials",
                "Best warranty coverage",
                "Maintains vehicle value",
            ],
            PurchaseTier::CertifiedAftermarket => &[
                "Good quality at reasonable price",
                "CAPA certified for fitment",
                "Solid warranty coverage",
                "Best value for most repairs",
            ],
            PurchaseTier::AftermarketStandard => &[
                "Most affordable option",
                "Usually in stock",
                "Good for older vehicles",
            ],
            PurchaseTier::UsedSalvage => &[
                "Lowest cost option",
                "OEM parts at fraction of cost",
                "Environmentally friendly",
            ],
        }
    }

    pub fn cons(&self) -> &'static [&'static str] {
        match self {
            PurchaseTier::Oem => &[
                "Most expensive option",
                "May require ordering",
                "Longer wait time",
            ],
            PurchaseTier::CertifiedAftermarket => &["Not OEM brand", "Minor fit variations possible"],
            PurchaseTier::AftermarketStandard => &[
                "Lower quality materials",
                "Fit may not be perfect",
                "Shorter warranty",
                "May need adjustment",
            ],
            PurchaseTier::UsedSalvage => &[
                "Condition varies",
                "No warranty typically",
                "May need painting/refinishing",
                "Limited availability",
            ],
        }
    }

    pub fn best_for(&self) -> &'static str {
        match self {
            PurchaseTier::Oem => {
                "New vehicles (less than 5 years old), leased vehicles, maintaining resale value"
            }
            PurchaseTier::CertifiedAftermarket => "Most repairs - best balance of quality and price",
            PurchaseTier::AftermarketStandard => {
                "Older vehicles (10+ years), budget-conscious repairs, high-mileage cars"
            }
            PurchaseTier::UsedSalvage => "Older vehicles, tight budgets, mechanically sound parts",
        }
    }
}

/// Price band for one tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub estimated: f64,
}

/// One purchase option in a shopping guide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOption {
    pub tier: PurchaseTier,
    #[serde(rename = "type")]
    pub label: String,
    pub quality: String,
    pub price_range: PriceRange,
    pub warranty: String,
    pub source: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub best_for: String,
}

/// Retailer search link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetailerLink {
    pub name: String,
    pub url: String,
    pub search_terms: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub quality_tiers: Vec<String>,
}

/// Part / labor / total costs shown at the top of a guide
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub estimated_part_cost: f64,
    pub estimated_labor_cost: f64,
    pub estimated_total: f64,
}

/// Tiered purchase options and retailer links for one damaged part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingGuide {
    pub part: Part,
    /// "2020 Honda Accord"
    pub vehicle: String,
    pub cost_breakdown: CostBreakdown,
    pub shopping_options: Vec<PurchaseOption>,
    pub where_to_buy: Vec<RetailerLink>,
    pub tips: Vec<String>,
}

/// Online parts retailer
#[derive(Debug, Clone, PartialEq)]
pub struct Retailer {
    pub name: &'static str,
    pub url: &'static str,
    /// Search URL with `{year}`, `{make}` and `{model}` placeholders
    pub search_url: &'static str,
    pub pros: &'static [&'static str],
    pub cons: &'static [&'static str],
    pub quality_tiers: &'static [&'static str],
}

/// Static reference data for shopping guides: retailers, search terms, tips
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingCatalog {
    pub retailers: Vec<Retailer>,
    pub search_terms: BTreeMap<Part, Vec<&'static str>>,
    pub tips: Vec<&'static str>,
}

impl Default for ShoppingCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ShoppingCatalog {
    pub fn builtin() -> Self {
        let retailers = vec![
            Retailer {
                name: "RockAuto",
                url: "https://www.rockauto.com",
                search_url: "https://www.rockauto.com/en/catalog/{year},{make},{model}",
                pros: &["Huge selection", "Competitive prices", "Parts diagrams"],
                cons: &["Shipping can be expensive", "Multiple warehouses"],
                quality_tiers: &["Economy", "Daily Driver", "Premium"],
            },
            Retailer {
                name: "PartsGeek",
                url: "https://www.partsgeek.com",
                search_url: "https://www.partsgeek.com/catalog/{year}/{make}/{model}",
                pros: &["Free shipping over $99", "Good customer service", "Fast shipping"],
                cons: &["Limited premium brands"],
                quality_tiers: &["Value", "Standard", "Premium"],
            },
            Retailer {
                name: "AutoZone",
                url: "https://www.autozone.com",
                search_url: "https://www.autozone.com/parts/{year}/{make}/{model}",
                pros: &["Local pickup available", "Rewards program", "In-store support"],
                cons: &["Higher prices", "Limited body parts"],
                quality_tiers: &["Economy", "Standard"],
            },
            Retailer {
                name: "CarParts.com",
                url: "https://www.carparts.com",
                search_url: "https://www.carparts.com/{year}-{make}-{model}",
                pros: &["90-day returns", "Good warranties", "Fast shipping"],
                cons: &["Limited selection on older cars"],
                quality_tiers: &["Standard", "Premium"],
            },
            Retailer {
                name: "1A Auto",
                url: "https://www.1aauto.com",
                search_url: "https://www.1aauto.com/{year}-{make}-{model}",
                pros: &["Video installation guides", "Good quality", "Detailed fitment"],
                cons: &["Slightly higher prices"],
                quality_tiers: &["Standard", "Premium"],
            },
        ];

        let search_terms = [
            (Part::Door, vec!["door shell", "door panel", "door skin"]),
            (Part::Bumper, vec!["bumper cover", "front bumper", "rear bumper"]),
            (Part::Hood, vec!["hood panel", "hood assembly"]),
            (Part::Window, vec!["door glass", "window regulator", "side window"]),
            (Part::Headlight, vec!["headlight assembly", "headlamp", "head light"]),
            (Part::Mirror, vec!["side mirror", "door mirror", "mirror assembly"]),
            (Part::BodyUnknown, vec!["body panel", "fender", "quarter panel"]),
            (Part::WindShield, vec!["windshield", "front glass", "windscreen"]),
        ]
        .into_iter()
        .collect();

        let tips = vec![
            "Always verify part fitment before purchasing",
            "Compare prices across multiple retailers",
            "Check shipping costs - they can add up",
            "Consider warranty coverage for your needs",
            "Read customer reviews when available",
            "OEM parts are best for newer vehicles",
            "Aftermarket parts can save money on older cars",
            "Used parts require inspection but can save 60-80%",
        ];

        Self {
            retailers,
            search_terms,
            tips,
        }
    }

    /// Search terms for a part, defaulting to the lowercased part name
    pub fn search_terms_for(&self, part: &Part) -> Vec<String> {
        match self.search_terms.get(part) {
            Some(terms) => terms.iter().map(|t| t.to_string()).collect(),
            None => vec![part.label().to_lowercase()],
        }
    }

    /// Tiers offered for a part; used/salvage only for eligible parts
    pub fn tiers_for(&self, part: &Part) -> Vec<PurchaseTier> {
        let mut tiers = vec![
            PurchaseTier::Oem,
            PurchaseTier::CertifiedAftermarket,
            PurchaseTier::AftermarketStandard,
        ];
        if USED_ELIGIBLE_PARTS.contains(part) {
            tiers.push(PurchaseTier::UsedSalvage);
        }
        tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_bands_are_ordered() {
        for tier in [
            PurchaseTier::Oem,
            PurchaseTier::CertifiedAftermarket,
            PurchaseTier::AftermarketStandard,
            PurchaseTier::UsedSalvage,
        ] {
            let (min, max, estimated) = tier.price_band();
            assert!(min <= estimated && estimated <= max, "{:?}", tier);
        }
    }

    #[test]
    fn test_search_terms_default_to_lowercase_label() {
        let catalog = ShoppingCatalog::builtin();
        assert_eq!(catalog.search_terms_for(&Part::Door)[0], "door shell");
        assert_eq!(
            catalog.search_terms_for(&Part::Other("Tail Light".to_string())),
            vec!["tail light".to_string()]
        );
    }

    #[test]
    fn test_used_tier_only_for_eligible_parts() {
        let catalog = ShoppingCatalog::builtin();
        assert!(catalog.tiers_for(&Part::Bumper).contains(&PurchaseTier::UsedSalvage));
        assert!(!catalog.tiers_for(&Part::Headlight).contains(&PurchaseTier::UsedSalvage));
        assert_eq!(catalog.tiers_for(&Part::WindShield).len(), 3);
    }
}
