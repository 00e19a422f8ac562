use chrono::NaiveDate;

use fleetdesk::domain::driver::NewDriver;
use fleetdesk::domain::garage::NewGarage;
use fleetdesk::domain::maintenance::{MaintenanceKind, NewMaintenanceRecord};
use fleetdesk::domain::order::{InvoiceStatus, NewInvoice, NewOrder, OrderKind, OrderStatus};
use fleetdesk::domain::organization::{NewOrganization, UpdateOrgSettings};
use fleetdesk::domain::screening::{
    NewScreeningLog, ScreeningKind, ScreeningResult,
};
use fleetdesk::domain::types::{
    DriverEmail, DriverName, GarageName, NonEmptyString, OrgName, PlateNumber, Vin,
};
use fleetdesk::domain::vehicle::{NewVehicle, UpdateVehicle, VehicleStatus};
use fleetdesk::repository::{
    DieselRepository, DriverReader, DriverWriter, GarageListQuery, GarageReader, GarageWriter,
    InvoiceListQuery, InvoiceReader, InvoiceWriter, MaintenanceListQuery, MaintenanceReader,
    MaintenanceWriter, OrderListQuery, OrderReader, OrderWriter, OrganizationReader,
    OrganizationWriter, ScreeningListQuery, ScreeningReader, ScreeningWriter, VehicleListQuery,
    VehicleReader, VehicleWriter,
};

mod common;

const ORG: i32 = 1;

fn new_vehicle(plate: &str, vin: &str, year: i32) -> NewVehicle {
    NewVehicle::new(
        ORG,
        PlateNumber::new(plate).unwrap(),
        Vin::new(vin).unwrap(),
        "Kamaz".into(),
        "5490".into(),
        year,
        None,
    )
}

fn new_driver(repo: &DieselRepository, name: &str, email: &str) -> fleetdesk::domain::driver::Driver {
    repo.create_driver(&NewDriver::new(
        ORG,
        DriverName::new(name).unwrap(),
        DriverEmail::new(email).unwrap(),
        None,
        "AB123456".into(),
    ))
    .unwrap()
}

#[test]
fn test_vehicle_repository_crud() {
    let test_db = common::TestDb::new("test_vehicle_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let v1 = new_vehicle("ka 01 ab 1234", "1HGCM82633A004352", 2018);
    let v2 = new_vehicle("KA 02 CD 5678", "2HGCM82633A004353", 2021);
    assert_eq!(repo.create_vehicles(&[v1, v2]).unwrap(), 2);

    let (total, items) = repo.list_vehicles(VehicleListQuery::new(ORG)).unwrap();
    assert_eq!(total, 2);
    assert_eq!(items[0].plate_number, "KA 01 AB 1234");

    let first = items[0].clone();
    let updates = UpdateVehicle::new(
        PlateNumber::new(&first.plate_number).unwrap(),
        first.make.clone(),
        "5490 NEO".into(),
        first.year,
        VehicleStatus::InService,
        None,
    );
    let updated = repo.update_vehicle(first.id, &updates).unwrap();
    assert_eq!(updated.model, "5490 NEO");
    assert_eq!(updated.status, VehicleStatus::InService);

    repo.delete_vehicle(first.id).unwrap();
    assert!(repo.get_vehicle_by_id(first.id, ORG).unwrap().is_none());

    // Scoped to its organization.
    let survivor = repo.list_vehicles(VehicleListQuery::new(ORG)).unwrap().1[0].clone();
    assert!(repo.get_vehicle_by_id(survivor.id, ORG + 1).unwrap().is_none());
}

#[test]
fn test_vehicle_list_filters_and_pagination() {
    let test_db = common::TestDb::new("test_vehicle_list_filters.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let vehicles: Vec<NewVehicle> = (0..45)
        .map(|n| new_vehicle(
            &format!("KA {:02} AB {:04}", n % 10, 1000 + n),
            &format!("1HGCM82633A{:06}", n),
            2010 + (n % 10),
        ))
        .collect();
    assert_eq!(repo.create_vehicles(&vehicles).unwrap(), 45);

    // Pagination: 45 items at 20 per page leave 5 on page 3.
    let (total, page3) = repo
        .list_vehicles(VehicleListQuery::new(ORG).paginate(3, 20))
        .unwrap();
    assert_eq!(total, 45);
    assert_eq!(page3.len(), 5);

    // Search matches VIN substrings.
    let (found, _) = repo
        .list_vehicles(VehicleListQuery::new(ORG).search("A000007"))
        .unwrap();
    assert_eq!(found, 1);

    // Year range is inclusive on both ends.
    let (in_range, items) = repo
        .list_vehicles(VehicleListQuery::new(ORG).year_range(Some(2018), Some(2019)))
        .unwrap();
    assert!(in_range > 0);
    assert!(items.iter().all(|v| (2018..=2019).contains(&v.year)));

    // Status filter: everything was created available.
    let (available, _) = repo
        .list_vehicles(
            VehicleListQuery::new(ORG).statuses(vec![VehicleStatus::Retired]),
        )
        .unwrap();
    assert_eq!(available, 0);
}

#[test]
fn test_garage_repository_and_cities() {
    let test_db = common::TestDb::new("test_garage_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    for (name, city) in [
        ("Центральный", "Москва"),
        ("Северный", "Москва"),
        ("Речной", "Казань"),
    ] {
        repo.create_garage(&NewGarage::new(
            ORG,
            GarageName::new(name).unwrap(),
            None,
            city.into(),
            10,
        ))
        .unwrap();
    }

    let (total, _) = repo.list_garages(GarageListQuery::new(ORG)).unwrap();
    assert_eq!(total, 3);

    let (in_kazan, items) = repo
        .list_garages(GarageListQuery::new(ORG).cities(vec!["Казань".into()]))
        .unwrap();
    assert_eq!(in_kazan, 1);
    assert_eq!(items[0].name, "Речной");

    let (by_search, _) = repo
        .list_garages(GarageListQuery::new(ORG).search("Север"))
        .unwrap();
    assert_eq!(by_search, 1);

    assert_eq!(
        repo.list_garage_cities(ORG).unwrap(),
        vec!["Казань".to_string(), "Москва".to_string()]
    );
}

#[test]
fn test_driver_assignments_are_replaced() {
    let test_db = common::TestDb::new("test_driver_assignments.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    repo.create_vehicles(&[new_vehicle("KA 01 AB 1234", "1HGCM82633A004352", 2020)])
        .unwrap();
    let vehicle = repo.list_vehicles(VehicleListQuery::new(ORG)).unwrap().1[0].clone();

    let ivan = new_driver(&repo, "Иванов", "ivanov@example.com");
    let pete = new_driver(&repo, "Петров", "petrov@example.com");

    assert_eq!(
        repo.assign_drivers_to_vehicle(vehicle.id, &[ivan.id, pete.id])
            .unwrap(),
        2
    );
    assert_eq!(repo.list_vehicle_drivers(vehicle.id).unwrap().len(), 2);

    // Re-assignment replaces the whole set.
    assert_eq!(
        repo.assign_drivers_to_vehicle(vehicle.id, &[pete.id]).unwrap(),
        1
    );
    let assigned = repo.list_vehicle_drivers(vehicle.id).unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].name, "Петров");

    let with_vehicles = repo.list_drivers_with_vehicles(ORG).unwrap();
    assert_eq!(with_vehicles.len(), 2);
    let petrov = with_vehicles
        .iter()
        .find(|(driver, _)| driver.name == "Петров")
        .unwrap();
    assert_eq!(petrov.1.len(), 1);
}

#[test]
fn test_order_and_invoice_lifecycle() {
    let test_db = common::TestDb::new("test_order_invoice.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    repo.create_vehicles(&[new_vehicle("KA 01 AB 1234", "1HGCM82633A004352", 2020)])
        .unwrap();
    let vehicle = repo.list_vehicles(VehicleListQuery::new(ORG)).unwrap().1[0].clone();

    let order = repo
        .create_order(&NewOrder::new(ORG, OrderKind::Delivery, vehicle.id, None, None))
        .unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(!order.reference.is_empty());

    let completed = repo
        .set_order_status(order.id, OrderStatus::Completed)
        .unwrap();
    assert_eq!(completed.status, OrderStatus::Completed);

    let (by_status, _) = repo
        .list_orders(OrderListQuery::new(ORG).statuses(vec![OrderStatus::Completed]))
        .unwrap();
    assert_eq!(by_status, 1);

    let (by_reference, _) = repo
        .list_orders(OrderListQuery::new(ORG).search(order.reference.clone()))
        .unwrap();
    assert_eq!(by_reference, 1);

    let invoice = repo
        .create_invoice(&NewInvoice::new(ORG, order.id, 150_000))
        .unwrap();
    assert_eq!(invoice.status, InvoiceStatus::Draft);
    assert!(invoice.issued_at.is_none());

    let issued = repo
        .set_invoice_status(invoice.id, InvoiceStatus::Issued)
        .unwrap();
    assert!(issued.issued_at.is_some());

    let paid = repo
        .set_invoice_status(invoice.id, InvoiceStatus::Paid)
        .unwrap();
    assert_eq!(paid.status, InvoiceStatus::Paid);

    let (draft_count, _) = repo
        .list_invoices(InvoiceListQuery::new(ORG).statuses(vec![InvoiceStatus::Draft]))
        .unwrap();
    assert_eq!(draft_count, 0);
}

#[test]
fn test_maintenance_history_is_paginated_per_vehicle() {
    let test_db = common::TestDb::new("test_maintenance_history.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    repo.create_vehicles(&[
        new_vehicle("KA 01 AB 1234", "1HGCM82633A004352", 2020),
        new_vehicle("KA 02 CD 5678", "2HGCM82633A004353", 2021),
    ])
    .unwrap();
    let vehicles = repo.list_vehicles(VehicleListQuery::new(ORG)).unwrap().1;

    for day in 1..=25 {
        repo.create_maintenance_record(&NewMaintenanceRecord::new(
            vehicles[0].id,
            None,
            MaintenanceKind::Inspection,
            NonEmptyString::new(format!("ТО №{day}")).unwrap(),
            50_000,
            NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
        ))
        .unwrap();
    }

    let (total, page2) = repo
        .list_maintenance_records(MaintenanceListQuery::new(vehicles[0].id).paginate(2, 20))
        .unwrap();
    assert_eq!(total, 25);
    assert_eq!(page2.len(), 5);

    // Newest first.
    let (_, page1) = repo
        .list_maintenance_records(MaintenanceListQuery::new(vehicles[0].id).paginate(1, 20))
        .unwrap();
    assert_eq!(
        page1[0].performed_at,
        NaiveDate::from_ymd_opt(2026, 3, 25).unwrap()
    );

    let (other_total, _) = repo
        .list_maintenance_records(MaintenanceListQuery::new(vehicles[1].id))
        .unwrap();
    assert_eq!(other_total, 0);
}

#[test]
fn test_screening_log_filters_and_join() {
    let test_db = common::TestDb::new("test_screening_log.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let ivan = new_driver(&repo, "Иванов", "ivanov@example.com");
    let pete = new_driver(&repo, "Петров", "petrov@example.com");

    let screened_at = NaiveDate::from_ymd_opt(2026, 5, 10)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    repo.create_screening_log(&NewScreeningLog::new(
        ORG,
        ivan.id,
        ScreeningKind::License,
        ScreeningResult::Passed,
        Some("всё в порядке".into()),
        screened_at,
    ))
    .unwrap();
    repo.create_screening_log(&NewScreeningLog::new(
        ORG,
        pete.id,
        ScreeningKind::Drug,
        ScreeningResult::Failed,
        None,
        screened_at,
    ))
    .unwrap();

    let (total, rows) = repo
        .list_screening_logs(ScreeningListQuery::new(ORG))
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(rows.len(), 2);

    let (failed, rows) = repo
        .list_screening_logs(
            ScreeningListQuery::new(ORG).results(vec![ScreeningResult::Failed]),
        )
        .unwrap();
    assert_eq!(failed, 1);
    assert_eq!(rows[0].1.name, "Петров");

    let (by_name, rows) = repo
        .list_screening_logs(ScreeningListQuery::new(ORG).search("Иван"))
        .unwrap();
    assert_eq!(by_name, 1);
    assert_eq!(rows[0].0.result, ScreeningResult::Passed);
}

#[test]
fn test_organization_settings_round_trip() {
    let test_db = common::TestDb::new("test_org_settings.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let org = repo
        .create_organization(&NewOrganization::new(
            OrgName::new("Acme Logistics").unwrap(),
            "Europe/Moscow".into(),
            "ru".into(),
            "rub".into(),
            "key-one".into(),
        ))
        .unwrap();
    assert_eq!(org.currency, "RUB");
    assert!(org.module_enabled("billing"));

    let updated = repo
        .update_org_settings(
            org.id,
            &UpdateOrgSettings::new(
                OrgName::new("Acme Logistics LLC").unwrap(),
                "Europe/Moscow".into(),
                "ru".into(),
                "RUB".into(),
                vec!["billing".into(), "bogus".into()],
            ),
        )
        .unwrap();
    assert_eq!(updated.name, "Acme Logistics LLC");
    assert_eq!(updated.modules, vec!["billing".to_string()]);
    assert!(!updated.module_enabled("screening"));

    let rotated = repo.set_org_api_key(org.id, "key-two").unwrap();
    assert_eq!(rotated.api_key, "key-two");

    let loaded = repo.get_organization(org.id).unwrap().unwrap();
    assert_eq!(loaded.api_key, "key-two");
}
