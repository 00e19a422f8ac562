//! Full-stack list-page tests: page services driving the Diesel repository
//! through the shared list controller.

use fleetdesk::domain::types::{PlateNumber, Vin};
use fleetdesk::domain::vehicle::NewVehicle;
use fleetdesk::dto::fleet::FleetListParams;
use fleetdesk::models::auth::{AccessContext, AuthenticatedUser};
use fleetdesk::repository::{DieselRepository, VehicleWriter};
use fleetdesk::services::fleet::load_fleet_page;

mod common;

fn access_context() -> AccessContext {
    AccessContext::new(
        AuthenticatedUser {
            email: "ops@example.com".into(),
            name: "Ops".into(),
            org_id: 1,
            roles: vec!["fleet".into(), "fleet_admin".into()],
        },
        vec!["billing".into(), "screening".into()],
    )
}

fn seed_vehicles(repo: &DieselRepository) {
    let vehicles: Vec<NewVehicle> = (0..45)
        .map(|n| {
            NewVehicle::new(
                1,
                PlateNumber::new(format!("KA {:02} AB {:04}", n % 10, 1000 + n)).unwrap(),
                Vin::new(format!("1HGCM82633A{:06}", n)).unwrap(),
                "Kamaz".into(),
                "5490".into(),
                2010 + (n % 10),
                None,
            )
        })
        .collect();
    assert_eq!(repo.create_vehicles(&vehicles).unwrap(), 45);
}

#[test]
fn test_fleet_page_pagination_against_database() {
    let test_db = common::TestDb::new("test_fleet_page_pagination.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    seed_vehicles(&repo);

    let params = FleetListParams {
        page: Some(3),
        ..FleetListParams::default()
    };
    let data = load_fleet_page(&repo, &access_context(), params).unwrap();

    assert_eq!(data.vehicles.total, 45);
    assert_eq!(data.vehicles.last_page, 3);
    assert_eq!(data.vehicles.page, 3);
    assert_eq!(data.vehicles.items.len(), 5);
    assert!(data.vehicles.has_prev);
    assert!(!data.vehicles.has_next);
}

#[test]
fn test_filter_change_resets_deep_page_to_first() {
    let test_db = common::TestDb::new("test_filter_change_resets.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    seed_vehicles(&repo);

    // The user sits on page 3 and narrows the status filter; everything was
    // seeded available, so the narrowed list is empty but valid.
    let params = FleetListParams {
        page: Some(3),
        toggle: Some("status:retired".into()),
        ..FleetListParams::default()
    };
    let data = load_fleet_page(&repo, &access_context(), params).unwrap();

    assert_eq!(data.vehicles.page, 1);
    assert_eq!(data.vehicles.total, 0);
    assert_eq!(data.vehicles.last_page, 1);
    assert!(data.vehicles.items.is_empty());
}

#[test]
fn test_search_commit_from_deep_page() {
    let test_db = common::TestDb::new("test_search_commit.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    seed_vehicles(&repo);

    let params = FleetListParams {
        page: Some(2),
        pending_q: Some("A000007".into()),
        ..FleetListParams::default()
    };
    let data = load_fleet_page(&repo, &access_context(), params).unwrap();

    assert_eq!(data.vehicles.total, 1);
    assert_eq!(data.vehicles.page, 1);
    assert_eq!(data.search_query.as_deref(), Some("A000007"));
    assert_eq!(data.vehicles.items[0].vin, "1HGCM82633A000007");
}

#[test]
fn test_out_of_range_page_is_corrected_by_the_response() {
    let test_db = common::TestDb::new("test_out_of_range_page.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    seed_vehicles(&repo);

    let params = FleetListParams {
        page: Some(99),
        ..FleetListParams::default()
    };
    let data = load_fleet_page(&repo, &access_context(), params).unwrap();

    assert_eq!(data.vehicles.page, 3);
    assert!(!data.vehicles.items.is_empty());
}
