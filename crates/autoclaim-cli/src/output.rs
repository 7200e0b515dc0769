//! Output formatting module

use autoclaim_domain::model::{AggregatedReport, CostEstimate, ShoppingGuide};
use autoclaim_types::{OutputFormat, Part, Result, Severity};

pub fn output_summary(output_format: OutputFormat, report: &AggregatedReport) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("DAMAGE ASSESSMENT SUMMARY");
    println!("{}", "-".repeat(70));
    if let Some(ref vehicle) = report.vehicle {
        println!("Vehicle:         {}", vehicle.display_name());
    }
    println!("Damages found:   {}", report.summary.total_damages);
    println!();

    println!(
        "  {:<3} {:<14} {:<14} {:<9} {:>10} {:>7} {:>10} {:>11}",
        "#", "Part", "Damage", "Severity", "Part $", "Hours", "Labor $", "Total $"
    );
    for (i, part) in report.damaged_parts.iter().enumerate() {
        println!(
            "  {:<3} {:<14} {:<14} {:<9} {:>10.2} {:>7.2} {:>10.2} {:>11.2}",
            i + 1,
            truncate(part.part.label(), 14),
            truncate(&part.damage_type, 14),
            part.severity.label(),
            part.part_cost,
            part.labor_hours,
            part.labor_cost,
            part.estimated_cost
        );
    }

    println!();
    println!("Total parts:     ${:.2}", report.summary.total_part_cost);
    println!(
        "Total labor:     ${:.2} ({:.2} h)",
        report.summary.total_labor_cost, report.summary.total_labor_hours
    );
    println!("TOTAL ESTIMATE:  ${:.2}", report.summary.total_estimated_cost);

    Ok(())
}

pub fn output_estimate(
    output_format: OutputFormat,
    part: &Part,
    severity: Severity,
    damage_type: &str,
    estimate: &CostEstimate,
    guide: Option<&ShoppingGuide>,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let value = serde_json::json!({
            "part": part,
            "severity": severity,
            "damage_type": damage_type,
            "estimate": estimate,
            "shopping_guide": guide,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("\nCost Estimate");
    println!("=============");
    println!("Part:            {}", part);
    println!("Damage:          {} ({})", damage_type, severity);
    println!("Part cost:       ${:.2}", estimate.part_cost);
    println!("Labor:           {:.2} h x ${:.2}/h = ${:.2}", estimate.labor_hours, estimate.labor_rate, estimate.labor_cost);
    println!("Estimated total: ${:.2}", estimate.estimated_cost);

    if let Some(guide) = guide {
        println!("\nShopping options for {}:", guide.vehicle);
        for option in &guide.shopping_options {
            println!(
                "  {:<40} ${:>9.2} - ${:>9.2} (est. ${:.2})",
                option.label, option.price_range.min, option.price_range.max, option.price_range.estimated
            );
        }
        println!("\nWhere to buy:");
        for retailer in &guide.where_to_buy {
            println!("  {:<14} {}", retailer.name, retailer.url);
        }
    }

    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}~", cut)
    }
}
