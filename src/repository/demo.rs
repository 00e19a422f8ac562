//! In-memory demo-fixture repository.
//!
//! Serves deterministic data for UI work and service tests without a
//! database. Filtering, search, and pagination behave like the Diesel
//! implementation so list pages are exercised end to end.

use chrono::NaiveDateTime;

use crate::domain::driver::Driver;
use crate::domain::garage::Garage;
use crate::domain::vehicle::{Vehicle, VehicleStatus};
use crate::repository::errors::RepositoryResult;
use crate::repository::{GarageListQuery, GarageReader, VehicleListQuery, VehicleReader};

pub struct DemoRepository;

fn fixture_timestamp() -> NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2026, 1, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap_or_default()
}

fn demo_vehicles() -> Vec<Vehicle> {
    let statuses = [
        VehicleStatus::Available,
        VehicleStatus::InService,
        VehicleStatus::Retired,
    ];
    (1..=45)
        .map(|n| Vehicle {
            id: n,
            org_id: 1,
            plate_number: format!("KA 01 AB {:04}", 1000 + n),
            vin: format!("1HGCM82633A{:06}", n),
            make: if n % 2 == 0 { "Kamaz" } else { "Gazelle" }.to_string(),
            model: format!("Model {}", n % 5),
            year: 2010 + (n % 15),
            status: statuses[(n as usize) % statuses.len()],
            garage_id: Some(1 + n % 3),
            created_at: fixture_timestamp(),
            updated_at: fixture_timestamp(),
        })
        .collect()
}

fn demo_garages() -> Vec<Garage> {
    ["Центральный", "Северный", "Южный"]
        .iter()
        .enumerate()
        .map(|(i, name)| Garage {
            id: i as i32 + 1,
            org_id: 1,
            name: name.to_string(),
            address: Some(format!("ул. Гаражная, {}", i + 1)),
            city: "Москва".to_string(),
            capacity: 20,
            created_at: fixture_timestamp(),
        })
        .collect()
}

fn paginate<T>(mut items: Vec<T>, query: &Option<crate::repository::Pagination>) -> Vec<T> {
    match query {
        Some(p) => {
            let start = (p.page.max(1) - 1) * p.per_page;
            if start >= items.len() {
                return Vec::new();
            }
            items.drain(..start);
            items.truncate(p.per_page);
            items
        }
        None => items,
    }
}

impl VehicleReader for DemoRepository {
    fn get_vehicle_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Vehicle>> {
        Ok(demo_vehicles()
            .into_iter()
            .find(|v| v.id == id && v.org_id == org_id))
    }

    fn list_vehicles(&self, query: VehicleListQuery) -> RepositoryResult<(usize, Vec<Vehicle>)> {
        let matches: Vec<Vehicle> = demo_vehicles()
            .into_iter()
            .filter(|v| v.org_id == query.org_id)
            .filter(|v| {
                query.search.as_deref().is_none_or(|s| {
                    let s = s.to_lowercase();
                    v.plate_number.to_lowercase().contains(&s)
                        || v.vin.to_lowercase().contains(&s)
                        || v.make.to_lowercase().contains(&s)
                        || v.model.to_lowercase().contains(&s)
                })
            })
            .filter(|v| query.statuses.is_empty() || query.statuses.contains(&v.status))
            .filter(|v| {
                query.garage_ids.is_empty()
                    || v.garage_id.is_some_and(|id| query.garage_ids.contains(&id))
            })
            .filter(|v| query.year_min.is_none_or(|min| v.year >= min))
            .filter(|v| query.year_max.is_none_or(|max| v.year <= max))
            .collect();

        let total = matches.len();
        Ok((total, paginate(matches, &query.pagination)))
    }

    fn list_vehicle_drivers(&self, _vehicle_id: i32) -> RepositoryResult<Vec<Driver>> {
        Ok(Vec::new())
    }
}

impl GarageReader for DemoRepository {
    fn get_garage_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Garage>> {
        Ok(demo_garages()
            .into_iter()
            .find(|g| g.id == id && g.org_id == org_id))
    }

    fn list_garages(&self, query: GarageListQuery) -> RepositoryResult<(usize, Vec<Garage>)> {
        let matches: Vec<Garage> = demo_garages()
            .into_iter()
            .filter(|g| g.org_id == query.org_id)
            .filter(|g| {
                query.search.as_deref().is_none_or(|s| {
                    let s = s.to_lowercase();
                    g.name.to_lowercase().contains(&s) || g.city.to_lowercase().contains(&s)
                })
            })
            .filter(|g| query.cities.is_empty() || query.cities.contains(&g.city))
            .collect();

        let total = matches.len();
        Ok((total, paginate(matches, &query.pagination)))
    }

    fn list_garage_cities(&self, _org_id: i32) -> RepositoryResult<Vec<String>> {
        Ok(vec!["Москва".to_string()])
    }
}
