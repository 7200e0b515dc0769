//! Shopping guide generation and plain-text rendering

use autoclaim_types::{Part, VehicleInfo};

use crate::model::{
    round2, AggregatedReport, CostBreakdown, CostEstimate, PriceRange, PurchaseOption, PurchaseTier,
    ReportSummary, RetailerLink, ShoppingCatalog, ShoppingGuide,
};

const RULE_WIDTH: usize = 80;

/// Build the shopping guide for one damaged part.
///
/// The breakdown total is the estimator's own total, so it always matches
/// the damaged-part entry it sits next to.
pub fn build_guide(
    catalog: &ShoppingCatalog,
    part: &Part,
    estimate: &CostEstimate,
    vehicle: &VehicleInfo,
) -> ShoppingGuide {
    ShoppingGuide {
        part: part.clone(),
        vehicle: vehicle.display_name(),
        cost_breakdown: CostBreakdown {
            estimated_part_cost: estimate.part_cost,
            estimated_labor_cost: estimate.labor_cost,
            estimated_total: estimate.estimated_cost,
        },
        shopping_options: purchase_options(catalog, part, estimate.part_cost),
        where_to_buy: retailer_links(catalog, part, vehicle),
        tips: catalog.tips.iter().map(|t| t.to_string()).collect(),
    }
}

/// Tiered purchase options priced as fixed multiples of the base part cost
pub fn purchase_options(catalog: &ShoppingCatalog, part: &Part, base_cost: f64) -> Vec<PurchaseOption> {
    catalog
        .tiers_for(part)
        .into_iter()
        .map(|tier| purchase_option(tier, base_cost))
        .collect()
}

fn purchase_option(tier: PurchaseTier, base_cost: f64) -> PurchaseOption {
    let (min, max, estimated) = tier.price_band();
    PurchaseOption {
        tier,
        label: tier.label().to_string(),
        quality: tier.quality().to_string(),
        price_range: PriceRange {
            min: round2(base_cost * min),
            max: round2(base_cost * max),
            estimated: round2(base_cost * estimated),
        },
        warranty: tier.warranty().to_string(),
        source: tier.source().to_string(),
        pros: to_strings(tier.pros()),
        cons: to_strings(tier.cons()),
        best_for: tier.best_for().to_string(),
    }
}

/// Retailer search links with the vehicle substituted into each URL template.
///
/// Links are best effort: the templates follow each site's URL scheme as last
/// observed and are not checked.
pub fn retailer_links(catalog: &ShoppingCatalog, part: &Part, vehicle: &VehicleInfo) -> Vec<RetailerLink> {
    let search_terms = catalog.search_terms_for(part);
    let year = vehicle.year.to_lowercase();
    let make = slug(&vehicle.make);
    let model = slug(&vehicle.model);

    catalog
        .retailers
        .iter()
        .map(|retailer| RetailerLink {
            name: retailer.name.to_string(),
            url: retailer
                .search_url
                .replace("{year}", &year)
                .replace("{make}", &make)
                .replace("{model}", &model),
            search_terms: search_terms.clone(),
            pros: to_strings(retailer.pros),
            cons: to_strings(retailer.cons),
            quality_tiers: to_strings(retailer.quality_tiers),
        })
        .collect()
}

fn slug(value: &str) -> String {
    value.trim().to_lowercase().replace(' ', "-")
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Render the shopping guides of an aggregated report, if it has any
pub fn render_report_guides(report: &AggregatedReport) -> Option<String> {
    let guides = report.shopping_guides();
    if guides.is_empty() {
        return None;
    }
    let vehicle = report.vehicle.as_ref()?;
    Some(format_shopping_report(guides, vehicle, &report.summary))
}

/// Human-readable shopping guide covering every damaged part
pub fn format_shopping_report(
    guides: &[ShoppingGuide],
    vehicle: &VehicleInfo,
    totals: &ReportSummary,
) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    let mut report = String::new();
    report.push_str(&format!("{}\n", heavy));
    report.push_str(&format!("{}AUTO PARTS SHOPPING GUIDE\n", " ".repeat(25)));
    report.push_str(&format!("{}\n\n", heavy));
    report.push_str(&format!("Vehicle: {}\n\n", vehicle.display_name()));

    report.push_str("COST SUMMARY\n");
    report.push_str(&format!("{}\n", light));
    report.push_str(&format!("Total Parts Cost:  ${:.2}\n", totals.total_part_cost));
    report.push_str(&format!("Total Labor Cost:  ${:.2}\n", totals.total_labor_cost));
    report.push_str(&format!("TOTAL ESTIMATE:    ${:.2}\n\n", totals.total_estimated_cost));

    for (i, guide) in guides.iter().enumerate() {
        report.push_str(&format!("{}\n", heavy));
        report.push_str(&format!("PART {}: {}\n", i + 1, guide.part));
        report.push_str(&format!("{}\n\n", heavy));
        report.push_str(&format!(
            "Estimated Cost: ${:.2} (Labor: ${:.2})\n\n",
            guide.cost_breakdown.estimated_part_cost, guide.cost_breakdown.estimated_labor_cost
        ));

        report.push_str("SHOPPING OPTIONS:\n");
        report.push_str(&format!("{}\n\n", light));
        for (j, option) in guide.shopping_options.iter().enumerate() {
            report.push_str(&format!("{}. {}\n", j + 1, option.label));
            report.push_str(&format!("   Quality Level: {}\n", option.quality));
            report.push_str(&format!(
                "   Price Range: ${:.2} - ${:.2}\n",
                option.price_range.min, option.price_range.max
            ));
            report.push_str(&format!("   Estimated: ${:.2}\n", option.price_range.estimated));
            report.push_str(&format!("   Warranty: {}\n", option.warranty));
            report.push_str(&format!("   Source: {}\n\n", option.source));
            report.push_str(&format!("   + Pros: {}\n", option.pros.join(", ")));
            report.push_str(&format!("   - Cons: {}\n\n", option.cons.join(", ")));
            report.push_str(&format!("   Best For: {}\n\n", option.best_for));
        }

        report.push_str("WHERE TO SHOP ONLINE:\n");
        report.push_str(&format!("{}\n\n", light));
        for retailer in &guide.where_to_buy {
            report.push_str(&format!("* {}\n", retailer.name));
            report.push_str(&format!("   {}\n", retailer.url));
            report.push_str(&format!("   Search for: {}\n", retailer.search_terms.join(", ")));
            report.push_str(&format!("   Quality tiers: {}\n\n", retailer.quality_tiers.join(", ")));
        }
        report.push('\n');
    }

    report.push_str(&format!("{}\nSHOPPING TIPS\n{}\n\n", heavy, heavy));
    // Tips are shared by every guide
    if let Some(first) = guides.first() {
        for tip in &first.tips {
            report.push_str(&format!("- {}\n", tip));
        }
    }
    report.push('\n');

    report.push_str(&format!("{}\nIMPORTANT NOTES\n{}\n\n", heavy, heavy));
    report.push_str("PAINTING: Most body parts require professional painting after installation.\n");
    report.push_str("   Paint costs typically range from $200-$500 per panel depending on:\n");
    report.push_str("   - Single stage vs. multi-stage paint\n");
    report.push_str("   - Color matching complexity\n");
    report.push_str("   - Clear coat and finish quality\n\n");
    report.push_str("INSTALLATION: Labor costs vary by shop and location.\n");
    report.push_str("   Consider getting quotes from multiple repair shops.\n\n");
    report.push_str("INSURANCE: If filing a claim, check with your insurance about:\n");
    report.push_str("   - Approved repair shops\n");
    report.push_str("   - OEM vs aftermarket parts requirements\n");
    report.push_str("   - Your deductible and coverage limits\n\n");
    report.push_str(&heavy);
    report.push('\n');

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accord() -> VehicleInfo {
        VehicleInfo::new("Honda", "Accord", "2020")
    }

    fn estimate(part_cost: f64, labor_cost: f64) -> CostEstimate {
        CostEstimate {
            part_cost,
            labor_hours: 0.0,
            labor_rate: 0.0,
            labor_cost,
            estimated_cost: round2(part_cost + labor_cost),
        }
    }

    #[test]
    fn test_guide_cost_breakdown() {
        let catalog = ShoppingCatalog::builtin();
        let guide = build_guide(&catalog, &Part::Bumper, &estimate(400.0, 350.0), &accord());
        assert_eq!(guide.vehicle, "2020 Honda Accord");
        assert_eq!(guide.cost_breakdown.estimated_total, 750.0);
        assert_eq!(guide.tips.len(), 8);
    }

    #[test]
    fn test_tier_prices() {
        let catalog = ShoppingCatalog::builtin();
        let guide = build_guide(&catalog, &Part::Bumper, &estimate(400.0, 350.0), &accord());
        let ranges: Vec<_> = guide.shopping_options.iter().map(|o| o.price_range).collect();

        assert_eq!(ranges.len(), 4);
        assert_eq!((ranges[0].min, ranges[0].max, ranges[0].estimated), (440.0, 600.0, 520.0));
        assert_eq!((ranges[1].min, ranges[1].max, ranges[1].estimated), (320.0, 440.0, 400.0));
        assert_eq!((ranges[2].min, ranges[2].max, ranges[2].estimated), (200.0, 320.0, 260.0));
        assert_eq!((ranges[3].min, ranges[3].max, ranges[3].estimated), (80.0, 160.0, 120.0));
    }

    #[test]
    fn test_tier_bounds_hold_for_all_parts() {
        let catalog = ShoppingCatalog::builtin();
        let mut parts = Part::KNOWN.to_vec();
        parts.push(Part::Unknown);
        for part in &parts {
            for base in [0.0, 60.0, 123.45, 1200.0] {
                for option in purchase_options(&catalog, part, base) {
                    let range = option.price_range;
                    assert!(range.min <= range.estimated && range.estimated <= range.max);
                }
            }
            let has_used = purchase_options(&catalog, part, 100.0)
                .iter()
                .any(|o| o.tier == PurchaseTier::UsedSalvage);
            let eligible = matches!(part, Part::Door | Part::Hood | Part::Bumper | Part::Mirror);
            assert_eq!(has_used, eligible, "{}", part);
        }
    }

    #[test]
    fn test_retailer_urls() {
        let catalog = ShoppingCatalog::builtin();
        let vehicle = VehicleInfo::new("Land Rover", "Range Rover Sport", "2019");
        let links = retailer_links(&catalog, &Part::Hood, &vehicle);
        assert_eq!(links.len(), 5);
        assert_eq!(
            links[0].url,
            "https://www.rockauto.com/en/catalog/2019,land-rover,range-rover-sport"
        );
        assert_eq!(links[3].url, "https://www.carparts.com/2019-land-rover-range-rover-sport");
        assert_eq!(links[0].search_terms, vec!["hood panel", "hood assembly"]);
    }

    #[test]
    fn test_format_shopping_report() {
        let catalog = ShoppingCatalog::builtin();
        let vehicle = accord();
        let guides = vec![
            build_guide(&catalog, &Part::Bumper, &estimate(400.0, 350.0), &vehicle),
            build_guide(&catalog, &Part::Headlight, &estimate(120.0, 70.0), &vehicle),
        ];
        let totals = ReportSummary {
            total_damages: 2,
            total_part_cost: 520.0,
            total_labor_hours: 3.0,
            total_labor_cost: 420.0,
            total_estimated_cost: 940.0,
        };
        let text = format_shopping_report(&guides, &vehicle, &totals);

        assert!(text.contains("AUTO PARTS SHOPPING GUIDE"));
        assert!(text.contains("Vehicle: 2020 Honda Accord"));
        assert!(text.contains("TOTAL ESTIMATE:    $940.00"));
        assert!(text.contains("PART 1: Bumper"));
        assert!(text.contains("PART 2: Headlight"));
        assert!(text.contains("https://www.partsgeek.com/catalog/2020/honda/accord"));
        assert!(text.contains("Used / Salvage Yard"));
        assert!(text.contains("IMPORTANT NOTES"));
    }

    #[test]
    fn test_render_report_guides_none_without_guides() {
        assert!(render_report_guides(&AggregatedReport::empty()).is_none());
    }
}
