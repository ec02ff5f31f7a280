use std::sync::Arc;

use chrono::Utc;

use super::common::*;
use crate::config::MarketplaceConfig;
use crate::marketplace::domain::{CompanyId, MarketplaceError, MatchStatus, WasteLotId};
use crate::marketplace::repository::RepositoryError;
use crate::marketplace::{
    CompatibilityTable, MarketplaceCatalog, MarketplaceService, MarketplaceServiceError,
    RoiRequest,
};

#[test]
fn matches_use_configured_threshold_by_default() {
    let service = build_service();

    let matches = service.matches(None).expect("matches generate");

    assert_eq!(matches.len(), 15);
    assert_eq!(matches[0].waste.name, "Catalisador FCC Exausto");
    assert_eq!(matches[0].consumer_company.name, "Cimpor Suape");
    assert_eq!(matches[0].score, 92.5);
    assert!(matches
        .iter()
        .all(|candidate| candidate.status == MatchStatus::Pending));
}

#[test]
fn explicit_threshold_narrows_results() {
    let service = build_service();

    let matches = service.matches(Some(90.0)).expect("matches generate");

    let scores: Vec<f64> = matches.iter().map(|candidate| candidate.score).collect();
    assert_eq!(scores, vec![92.5, 90.5]);
}

#[test]
fn matches_for_keeps_only_caller_pairings() {
    let service = build_service();

    let refinery = service
        .matches_for(CompanyId(1), None)
        .expect("matches generate");
    assert_eq!(refinery.len(), 7);
    assert!(refinery
        .iter()
        .all(|candidate| candidate.generator_company.id == CompanyId(1)));

    let recycler = service
        .matches_for(CompanyId(8), None)
        .expect("matches generate");
    assert_eq!(recycler.len(), 2);
    assert!(recycler
        .iter()
        .all(|candidate| candidate.consumer_company.id == CompanyId(8)));
}

#[test]
fn accept_match_requires_a_party() {
    let service = build_service();
    let matches = service.matches(None).expect("matches generate");
    let top = &matches[0];

    let acceptance = service
        .accept_match(top.id, top.consumer_company.id, None)
        .expect("consumer may accept");
    assert_eq!(acceptance.match_id, top.id);
    assert_eq!(acceptance.status, MatchStatus::Accepted);
    assert!(acceptance.message.contains("Cimpor Suape"));

    let err = service
        .accept_match(top.id, CompanyId(5), None)
        .expect_err("shipyard is not a party");
    assert!(matches!(
        err,
        MarketplaceServiceError::NotMatchParty {
            company_id: CompanyId(5),
            ..
        }
    ));

    let err = service
        .accept_match(999, top.consumer_company.id, None)
        .expect_err("unknown match");
    assert!(matches!(err, MarketplaceServiceError::MatchNotFound(999)));
}

#[test]
fn accept_match_resolves_ids_from_any_listing_threshold() {
    let service = build_service();
    let everything = service.matches(Some(0.0)).expect("matches generate");

    let above = everything
        .iter()
        .find(|candidate| candidate.score > 70.0 && candidate.id > 1)
        .expect("strong pairing");
    let acceptance = service
        .accept_match(above.id, above.consumer_company.id, None)
        .expect("listed id accepted at the configured threshold");
    assert!(acceptance.message.contains(&above.consumer_company.name));
    assert!(acceptance.message.contains(&above.waste.name));

    let below = everything
        .iter()
        .find(|candidate| candidate.score <= 70.0)
        .expect("weak pairing");
    assert!(matches!(
        service.accept_match(below.id, below.consumer_company.id, None),
        Err(MarketplaceServiceError::MatchNotFound(_))
    ));
    let acceptance = service
        .accept_match(below.id, below.consumer_company.id, Some(0.0))
        .expect("accepted at the listing threshold");
    assert_eq!(acceptance.match_id, below.id);
    assert!(acceptance.message.contains(&below.consumer_company.name));
}

#[test]
fn orphaned_lot_surfaces_data_integrity_error() {
    let mut catalog = MarketplaceCatalog::demo();
    let mut orphan = catalog.wastes()[0].clone();
    orphan.id = WasteLotId(50);
    orphan.company_id = CompanyId(404);
    catalog.push_waste(orphan);
    let service = service_over(catalog);

    let err = service.matches(None).expect_err("orphan rejected");

    assert!(matches!(
        err,
        MarketplaceServiceError::Marketplace(MarketplaceError::DataIntegrity {
            waste_id: WasteLotId(50),
            company_id: CompanyId(404),
        })
    ));
}

#[test]
fn waste_listing_filters_by_category() {
    let service = build_service();

    let oily = service.wastes(Some("Oleosos")).expect("wastes listed");
    assert_eq!(oily.len(), 2);
    assert!(service
        .wastes(Some("oleosos"))
        .expect("wastes listed")
        .is_empty());
    assert_eq!(service.wastes(None).expect("wastes listed").len(), 8);
}

#[test]
fn unknown_company_is_not_found() {
    let service = build_service();

    assert_eq!(
        service.company(CompanyId(2)).expect("cement plant").name,
        "Cimpor Suape"
    );
    assert!(matches!(
        service.company(CompanyId(99)),
        Err(MarketplaceServiceError::CompanyNotFound(CompanyId(99)))
    ));
    assert!(matches!(
        service.caller(CompanyId(99)),
        Err(MarketplaceServiceError::UnknownCaller(CompanyId(99)))
    ));
}

#[test]
fn roi_uses_configured_investment() {
    let config = MarketplaceConfig {
        fixed_investment: 3000.0,
        ..MarketplaceConfig::default()
    };
    let service = MarketplaceService::new(
        Arc::new(crate::marketplace::InMemoryCatalog::demo()),
        Arc::new(CompatibilityTable::demo()),
        &config,
    )
    .expect("valid config");

    let estimate = service
        .estimate_roi(RoiRequest {
            waste_type: None,
            volume: 10.0,
            disposal_cost: 0.0,
            market_price: 10.0,
            fixed_investment: None,
        })
        .expect("valid request");

    assert_eq!(estimate.fixed_investment, 3000.0);
    assert_eq!(estimate.payback_days, 900);
}

#[test]
fn invalid_config_is_rejected() {
    let config = MarketplaceConfig {
        match_threshold: f64::NAN,
        ..MarketplaceConfig::default()
    };

    let result = MarketplaceService::new(
        Arc::new(crate::marketplace::InMemoryCatalog::demo()),
        Arc::new(CompatibilityTable::demo()),
        &config,
    );

    assert!(result.is_err());
}

#[test]
fn inventory_reflects_catalog() {
    let service = build_service();
    let as_of = Utc::now();

    let inventory = service.inventory(as_of).expect("inventory builds");

    assert_eq!(inventory.len(), 8);
    assert!(inventory.iter().all(|entry| entry.last_update == as_of));
    assert!(inventory
        .iter()
        .all(|entry| entry.interested_companies.len() == 2));
}

#[test]
fn repository_failures_propagate() {
    let service = MarketplaceService::new(
        Arc::new(OfflineCatalog),
        Arc::new(CompatibilityTable::demo()),
        &marketplace_config(),
    )
    .expect("valid config");

    assert!(matches!(
        service.matches(None),
        Err(MarketplaceServiceError::Repository(
            RepositoryError::Unavailable(_)
        ))
    ));
}
