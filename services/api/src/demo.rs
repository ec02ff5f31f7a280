use crate::infra::{build_marketplace, Marketplace};
use chrono::Utc;
use clap::Args;
use reciloop::config::AppConfig;
use reciloop::error::AppError;
use reciloop::marketplace::{CompanyId, InventoryEntry, MatchCandidate, RoiEstimate, RoiRequest};

#[derive(Args, Debug, Default)]
pub(crate) struct MatchesArgs {
    /// Minimum score (exclusive) a pairing needs to be listed. Defaults to the configured threshold.
    #[arg(long, value_parser = crate::infra::parse_threshold)]
    pub(crate) threshold: Option<f64>,
    /// Only list matches where this company is the generator or the consumer.
    #[arg(long)]
    pub(crate) company_id: Option<u32>,
}

#[derive(Args, Debug)]
pub(crate) struct RoiArgs {
    /// Label for the waste stream being evaluated
    #[arg(long)]
    pub(crate) waste_type: Option<String>,
    /// Monthly volume of the waste stream
    #[arg(long)]
    pub(crate) volume: f64,
    /// Current disposal cost per unit
    #[arg(long)]
    pub(crate) disposal_cost: f64,
    /// Market price per unit when sold as a resource
    #[arg(long)]
    pub(crate) market_price: f64,
    /// Fixed investment to set up the diversion route (defaults to the configured value)
    #[arg(long)]
    pub(crate) investment: Option<f64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the match threshold for the demo run.
    #[arg(long, value_parser = crate::infra::parse_threshold)]
    pub(crate) threshold: Option<f64>,
    /// Skip the inventory portion of the demo output.
    #[arg(long)]
    pub(crate) skip_inventory: bool,
}

fn load_marketplace() -> Result<Marketplace, AppError> {
    let config = AppConfig::load()?;
    build_marketplace(&config.marketplace)
}

pub(crate) fn run_matches(args: MatchesArgs) -> Result<(), AppError> {
    let MatchesArgs {
        threshold,
        company_id,
    } = args;

    let marketplace = load_marketplace()?;
    let threshold_used = threshold.unwrap_or(marketplace.threshold());
    let matches = match company_id {
        Some(id) => {
            let company = marketplace.company(CompanyId(id))?;
            println!("Matches involving {} (id {})", company.name, company.id);
            marketplace.matches_for(company.id, threshold)?
        }
        None => marketplace.matches(threshold)?,
    };

    render_matches(&matches, threshold_used);
    Ok(())
}

pub(crate) fn run_roi(args: RoiArgs) -> Result<(), AppError> {
    let RoiArgs {
        waste_type,
        volume,
        disposal_cost,
        market_price,
        investment,
    } = args;

    let marketplace = load_marketplace()?;
    let estimate = marketplace.estimate_roi(RoiRequest {
        waste_type,
        volume,
        disposal_cost,
        market_price,
        fixed_investment: investment,
    })?;

    render_roi(&estimate);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        threshold,
        skip_inventory,
    } = args;

    let marketplace = load_marketplace()?;

    println!("ReciLoop marketplace demo");
    let companies = marketplace.companies()?;
    let wastes = marketplace.wastes(None)?;
    println!(
        "Catalog: {} companies, {} waste lots",
        companies.len(),
        wastes.len()
    );
    for company in &companies {
        println!("- [{}] {} ({})", company.id, company.name, company.role.label());
    }

    let matches = marketplace.matches(threshold)?;
    println!();
    render_matches(&matches, threshold.unwrap_or(marketplace.threshold()));

    if !skip_inventory {
        let inventory = marketplace.inventory(Utc::now())?;
        println!();
        render_inventory(&inventory);
    }

    if let Some(top) = matches.first() {
        let estimate = marketplace.estimate_roi(RoiRequest {
            waste_type: Some(top.waste.name.clone()),
            volume: top.waste.quantity,
            disposal_cost: top.waste.price_per_unit * 0.5,
            market_price: top.waste.price_per_unit,
            fixed_investment: None,
        })?;
        println!("\nROI for the top match (disposal at half the market price)");
        render_roi(&estimate);
    }

    Ok(())
}

fn render_matches(matches: &[MatchCandidate], threshold: f64) {
    if matches.is_empty() {
        println!("No matches above {threshold:.1}");
        return;
    }

    println!("{} matches above {threshold:.1}", matches.len());
    for candidate in matches {
        println!(
            "- #{} {:>5.1} | {} ({} {}) | {} -> {} | est. savings {:.2}",
            candidate.id,
            candidate.score,
            candidate.waste.name,
            candidate.waste.quantity,
            candidate.waste.unit,
            candidate.generator_company.name,
            candidate.consumer_company.name,
            candidate.estimated_savings
        );
    }
}

fn render_inventory(inventory: &[InventoryEntry]) {
    println!("Real-time inventory");
    for entry in inventory {
        let interested = if entry.interested_companies.is_empty() {
            "none".to_string()
        } else {
            entry.interested_companies.join(", ")
        };
        println!(
            "- {} from {} | {} | interested: {}",
            entry.waste.name,
            entry.company.name,
            entry.status.label(),
            interested
        );
    }
}

fn render_roi(estimate: &RoiEstimate) {
    if let Some(waste_type) = &estimate.waste_type {
        println!("Waste stream: {waste_type}");
    }
    println!(
        "Volume {} | disposal cost {:.2} | market price {:.2} | investment {:.2}",
        estimate.volume, estimate.disposal_cost, estimate.market_price, estimate.fixed_investment
    );
    println!("Potential profit: {:.2}", estimate.potential_profit);
    println!("Payback: {} days", estimate.payback_days);
    println!("ROI: {:.1}%", estimate.roi_percentage);
}
