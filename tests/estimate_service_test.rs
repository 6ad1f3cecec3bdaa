//! Tests for EstimateService over in-memory and TOML inventories

use std::sync::Arc;

use approx::assert_relative_eq;
use chrono::{NaiveDate, NaiveTime};
use rstest::rstest;
use tempfile::TempDir;

use mango_surveil::application::services::EstimateService;
use mango_surveil::application::ApplicationError;
use mango_surveil::domain::{
    CalculationMode, DomainError, EffortOutcome, Grower, HealthStatus, Location, SessionTimes,
    SurveillanceEffortEstimate, Tree,
};
use mango_surveil::infrastructure::inventory::{
    InMemoryInventoryRepository, TomlInventoryRepository,
};
use mango_surveil::infrastructure::traits::RealFileSystem;

fn juvenile_trees(prefix: &str, n: usize) -> Vec<Tree> {
    (0..n)
        .map(|i| {
            Tree::new(format!("{prefix}-{i:03}"), 5)
                .with_height(3.0)
                .with_health(HealthStatus::Good)
        })
        .collect()
}

fn default_trees(prefix: &str, n: usize) -> Vec<Tree> {
    (0..n).map(|i| Tree::new(format!("{prefix}-{i:03}"), 10)).collect()
}

fn service_for(grower: Grower) -> EstimateService {
    let repo = InMemoryInventoryRepository::new(vec![grower], vec![]);
    EstimateService::new(Arc::new(repo))
}

fn expect_estimate(outcome: EffortOutcome) -> SurveillanceEffortEstimate {
    match outcome {
        EffortOutcome::Estimate(estimate) => estimate,
        EffortOutcome::NoData => panic!("expected an estimate, got NoData"),
    }
}

fn single_block_grower() -> Grower {
    Grower::new("grower-1").with_locations([Location::new("Block A")
        .with_area(2.0)
        .with_trees(juvenile_trees("A", 10))])
}

#[test]
fn given_single_juvenile_block_when_estimating_then_matches_worked_example() {
    // Arrange
    let service = service_for(single_block_grower());

    // Act
    let estimate = expect_estimate(service.compute_surveillance_estimate("grower-1").unwrap());

    // Assert
    assert_eq!(estimate.total_trees, 10);
    assert_eq!(estimate.locations.len(), 1);
    let block = &estimate.locations[0];
    assert_relative_eq!(block.base_minutes, 45.0, epsilon = 1e-9);
    assert_eq!(block.stocking_rate, Some(5.0));
    assert_eq!(block.stocking_multiplier, 0.9);
    assert_relative_eq!(block.adjusted_minutes, 46.575, epsilon = 1e-9);
    assert_eq!(estimate.travel_minutes, 5.0);
    assert_relative_eq!(estimate.documentation_minutes, 6.98625, epsilon = 1e-9);
    assert_relative_eq!(estimate.total_minutes, 58.56125, epsilon = 1e-9);
    assert_eq!(estimate.total_hours, 0.98);
    assert_eq!(estimate.monthly_effort_hours, 2.1);
    assert_eq!(estimate.annual_sessions, 26);
}

#[test]
fn given_two_stocked_locations_when_estimating_then_travel_is_per_location() {
    let grower = Grower::new("grower-2").with_locations([
        Location::new("North").with_trees(default_trees("N", 5)),
        Location::new("South").with_trees(default_trees("S", 3)),
    ]);

    let estimate = expect_estimate(
        service_for(grower)
            .compute_surveillance_estimate("grower-2")
            .unwrap(),
    );

    assert_eq!(estimate.travel_minutes, 20.0);
    assert_eq!(estimate.total_trees, 8);
    assert_relative_eq!(
        estimate.total_minutes,
        estimate.total_location_minutes + estimate.overhead_minutes(),
        epsilon = 1e-9
    );
}

#[test]
fn given_empty_location_beside_stocked_one_when_estimating_then_only_stocked_counts() {
    let grower = Grower::new("grower-3").with_locations([
        Location::new("Nursery"),
        Location::new("Orchard").with_trees(default_trees("O", 4)),
    ]);

    let estimate = expect_estimate(
        service_for(grower)
            .compute_surveillance_estimate("grower-3")
            .unwrap(),
    );

    assert_eq!(estimate.locations.len(), 1);
    assert_eq!(estimate.locations[0].location_name, "Orchard");
    assert_eq!(estimate.travel_minutes, 5.0);
}

#[test]
fn given_grower_without_trees_when_estimating_then_no_data() {
    let grower = Grower::new("grower-empty")
        .with_locations([Location::new("Bare paddock").with_area(3.0)]);

    let outcome = service_for(grower)
        .compute_surveillance_estimate("grower-empty")
        .unwrap();

    assert!(outcome.is_no_data());
}

#[test]
fn given_zero_area_location_when_estimating_then_degrades_to_neutral_multiplier() {
    let grower = Grower::new("grower-5").with_locations([Location::new("Unsurveyed")
        .with_area(0.0)
        .with_trees(juvenile_trees("U", 4))]);
    let service = service_for(grower);

    let estimate = expect_estimate(service.compute_surveillance_estimate("grower-5").unwrap());
    let stocking = service.stocking_report("grower-5").unwrap();

    assert_eq!(estimate.locations[0].stocking_multiplier, 1.0);
    assert_eq!(estimate.locations[0].stocking_rate, None);
    assert!(estimate.locations[0].invalid_area);
    assert_eq!(
        estimate.invalid_area_locations().collect::<Vec<_>>(),
        vec!["Unsurveyed"]
    );
    assert!(stocking.is_empty());
}

#[test]
fn given_zero_frequency_when_estimating_then_invalid_configuration() {
    let grower = single_block_grower().with_frequency(0);

    let err = service_for(grower)
        .compute_surveillance_estimate("grower-1")
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidConfiguration { frequency_days: 0 })
    ));
}

#[test]
fn given_zero_frequency_and_no_trees_when_estimating_then_configuration_error_wins() {
    let grower = Grower::new("grower-empty").with_frequency(0);

    let result = service_for(grower).compute_surveillance_estimate("grower-empty");

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::InvalidConfiguration { .. }))
    ));
}

#[test]
fn given_unknown_grower_when_estimating_then_not_found() {
    let result = service_for(single_block_grower()).compute_surveillance_estimate("nobody");

    assert!(matches!(result, Err(ApplicationError::GrowerNotFound(id)) if id == "nobody"));
}

#[rstest]
#[case(7, 52, 4.2)]
#[case(14, 26, 2.1)]
#[case(30, 12, 1.0)]
fn given_frequency_override_when_estimating_then_replaces_grower_frequency(
    #[case] days: u32,
    #[case] sessions: u32,
    #[case] monthly: f64,
) {
    let service = service_for(single_block_grower()).with_frequency_override(Some(days));

    let estimate = expect_estimate(service.compute_surveillance_estimate("grower-1").unwrap());

    assert_eq!(estimate.frequency_days, days);
    assert_eq!(estimate.annual_sessions, sessions);
    assert_eq!(estimate.monthly_effort_hours, monthly);
}

#[test]
fn given_quick_mode_when_estimating_then_six_minutes_per_tree() {
    let service = service_for(single_block_grower()).with_mode(CalculationMode::Quick);

    let estimate = expect_estimate(service.compute_surveillance_estimate("grower-1").unwrap());

    assert_eq!(estimate.mode, CalculationMode::Quick);
    assert_relative_eq!(estimate.locations[0].base_minutes, 60.0, epsilon = 1e-9);
}

#[test]
fn given_same_inventory_when_estimating_twice_then_results_are_identical() {
    let service = service_for(single_block_grower());

    let first = service.compute_surveillance_estimate("grower-1").unwrap();
    let second = service.compute_surveillance_estimate("grower-1").unwrap();

    assert_eq!(first, second);
}

#[test]
fn given_selected_location_when_planning_then_lists_its_trees_only() {
    let grower = Grower::new("grower-6").with_locations([
        Location::new("North").with_trees(juvenile_trees("N", 2)),
        Location::new("South").with_trees(juvenile_trees("S", 3)),
    ]);
    let service = service_for(grower);

    let plan = service
        .plan_session("grower-6", &["South".to_string()])
        .unwrap();

    assert_eq!(plan.locations.len(), 1);
    assert_eq!(plan.locations[0].inspections.len(), 3);
    let effort = plan.effort.unwrap();
    assert_eq!(effort.tree_count, 3);
    assert_eq!(effort.average_minutes_per_tree, 4.5);
    // 13.5 min * 1.3 overhead = 17.55 min
    assert_eq!(effort.total_hours, 0.29);
}

#[test]
fn given_unknown_location_when_planning_then_location_not_found() {
    let result =
        service_for(single_block_grower()).plan_session("grower-1", &["Block Z".to_string()]);

    assert!(matches!(
        result,
        Err(ApplicationError::LocationNotFound { location, .. }) if location == "Block Z"
    ));
}

#[test]
fn given_recorded_session_when_reviewing_then_compares_with_estimate() {
    let service = service_for(single_block_grower());
    let times = SessionTimes::new(
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(9, 15, 0).unwrap(),
    )
    .unwrap();

    let review = service.review_session("grower-1", "Block A", times).unwrap();

    assert_eq!(review.actual_minutes, 75);
    assert_relative_eq!(review.expected_minutes.unwrap(), 46.575, epsilon = 1e-9);
    assert_relative_eq!(review.variance_minutes().unwrap(), 28.425, epsilon = 1e-9);
}

#[test]
fn given_toml_inventory_when_estimating_then_reads_from_disk() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("inventory.toml");
    let mut content = String::from(
        r#"
[[growers]]
id = "grower-1"
farm_name = "Katherine Orchard"

[[growers.locations]]
name = "Block A"
area_hectares = 2.0
"#,
    );
    for i in 0..10 {
        content.push_str(&format!(
            "\n[[growers.locations.trees]]\ntree_id = \"A-{i:03}\"\nage = 5\n\
             height_meters = 3.0\nhealth_status = \"good\"\n"
        ));
    }
    std::fs::write(&path, content).unwrap();
    let repo = TomlInventoryRepository::new(Arc::new(RealFileSystem), &path);
    let service = EstimateService::new(Arc::new(repo));

    // Act
    let estimate = expect_estimate(service.compute_surveillance_estimate("grower-1").unwrap());

    // Assert
    assert_eq!(estimate.total_trees, 10);
    assert_eq!(estimate.total_hours, 0.98);
}

#[test]
fn given_missing_inventory_file_when_estimating_then_fails_with_context() {
    let temp = TempDir::new().unwrap();
    let repo =
        TomlInventoryRepository::new(Arc::new(RealFileSystem), temp.path().join("none.toml"));
    let service = EstimateService::new(Arc::new(repo));

    let err = service.compute_surveillance_estimate("grower-1").unwrap_err();

    assert!(err.to_string().contains("read inventory"), "got: {err}");
}
