use crate::db::{DbConnection, DbPool};
use crate::domain::driver::{Driver, NewDriver, UpdateDriver};
use crate::domain::garage::{Garage, NewGarage, UpdateGarage};
use crate::domain::maintenance::{MaintenanceRecord, NewMaintenanceRecord};
use crate::domain::order::{
    Invoice, InvoiceStatus, NewInvoice, NewOrder, Order, OrderKind, OrderStatus,
};
use crate::domain::organization::{NewOrganization, Organization, UpdateOrgSettings};
use crate::domain::screening::{NewScreeningLog, ScreeningKind, ScreeningLog, ScreeningResult};
use crate::domain::vehicle::{NewVehicle, UpdateVehicle, Vehicle, VehicleStatus};
use crate::repository::errors::RepositoryResult;

pub mod demo;
pub mod driver;
pub mod errors;
pub mod garage;
pub mod maintenance;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod order;
pub mod organization;
pub mod screening;
pub mod vehicle;

/// Diesel-backed implementation of every repository trait in this module.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone)]
pub struct VehicleListQuery {
    pub org_id: i32,
    pub search: Option<String>,
    pub statuses: Vec<VehicleStatus>,
    pub garage_ids: Vec<i32>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub pagination: Option<Pagination>,
}

impl VehicleListQuery {
    pub fn new(org_id: i32) -> Self {
        Self {
            org_id,
            search: None,
            statuses: Vec::new(),
            garage_ids: Vec::new(),
            year_min: None,
            year_max: None,
            pagination: None,
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn statuses(mut self, statuses: Vec<VehicleStatus>) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn garages(mut self, garage_ids: Vec<i32>) -> Self {
        self.garage_ids = garage_ids;
        self
    }

    pub fn year_range(mut self, year_min: Option<i32>, year_max: Option<i32>) -> Self {
        self.year_min = year_min;
        self.year_max = year_max;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct GarageListQuery {
    pub org_id: i32,
    pub search: Option<String>,
    pub cities: Vec<String>,
    pub pagination: Option<Pagination>,
}

impl GarageListQuery {
    pub fn new(org_id: i32) -> Self {
        Self {
            org_id,
            search: None,
            cities: Vec::new(),
            pagination: None,
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn cities(mut self, cities: Vec<String>) -> Self {
        self.cities = cities;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct OrderListQuery {
    pub org_id: i32,
    pub search: Option<String>,
    pub statuses: Vec<OrderStatus>,
    pub kinds: Vec<OrderKind>,
    pub pagination: Option<Pagination>,
}

impl OrderListQuery {
    pub fn new(org_id: i32) -> Self {
        Self {
            org_id,
            search: None,
            statuses: Vec::new(),
            kinds: Vec::new(),
            pagination: None,
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn statuses(mut self, statuses: Vec<OrderStatus>) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn kinds(mut self, kinds: Vec<OrderKind>) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct ScreeningListQuery {
    pub org_id: i32,
    pub search: Option<String>,
    pub kinds: Vec<ScreeningKind>,
    pub results: Vec<ScreeningResult>,
    pub pagination: Option<Pagination>,
}

impl ScreeningListQuery {
    pub fn new(org_id: i32) -> Self {
        Self {
            org_id,
            search: None,
            kinds: Vec::new(),
            results: Vec::new(),
            pagination: None,
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn kinds(mut self, kinds: Vec<ScreeningKind>) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn results(mut self, results: Vec<ScreeningResult>) -> Self {
        self.results = results;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct MaintenanceListQuery {
    pub vehicle_id: i32,
    pub kinds: Vec<crate::domain::maintenance::MaintenanceKind>,
    pub pagination: Option<Pagination>,
}

impl MaintenanceListQuery {
    pub fn new(vehicle_id: i32) -> Self {
        Self {
            vehicle_id,
            kinds: Vec::new(),
            pagination: None,
        }
    }

    pub fn kinds(mut self, kinds: Vec<crate::domain::maintenance::MaintenanceKind>) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct InvoiceListQuery {
    pub org_id: i32,
    pub statuses: Vec<InvoiceStatus>,
    pub pagination: Option<Pagination>,
}

impl InvoiceListQuery {
    pub fn new(org_id: i32) -> Self {
        Self {
            org_id,
            statuses: Vec::new(),
            pagination: None,
        }
    }

    pub fn statuses(mut self, statuses: Vec<InvoiceStatus>) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait VehicleReader {
    fn get_vehicle_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Vehicle>>;
    fn list_vehicles(&self, query: VehicleListQuery) -> RepositoryResult<(usize, Vec<Vehicle>)>;
    fn list_vehicle_drivers(&self, vehicle_id: i32) -> RepositoryResult<Vec<Driver>>;
}

pub trait VehicleWriter {
    fn create_vehicles(&self, new_vehicles: &[NewVehicle]) -> RepositoryResult<usize>;
    fn update_vehicle(&self, vehicle_id: i32, updates: &UpdateVehicle)
    -> RepositoryResult<Vehicle>;
    fn delete_vehicle(&self, vehicle_id: i32) -> RepositoryResult<()>;
    fn assign_drivers_to_vehicle(
        &self,
        vehicle_id: i32,
        driver_ids: &[i32],
    ) -> RepositoryResult<usize>;
}

pub trait GarageReader {
    fn get_garage_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Garage>>;
    fn list_garages(&self, query: GarageListQuery) -> RepositoryResult<(usize, Vec<Garage>)>;
    /// Distinct cities for the garage filter vocabulary.
    fn list_garage_cities(&self, org_id: i32) -> RepositoryResult<Vec<String>>;
}

pub trait GarageWriter {
    fn create_garage(&self, new_garage: &NewGarage) -> RepositoryResult<Garage>;
    fn update_garage(&self, garage_id: i32, updates: &UpdateGarage) -> RepositoryResult<Garage>;
}

pub trait DriverReader {
    fn get_driver_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Driver>>;
    fn list_drivers(&self, org_id: i32) -> RepositoryResult<Vec<Driver>>;
    fn list_drivers_with_vehicles(
        &self,
        org_id: i32,
    ) -> RepositoryResult<Vec<(Driver, Vec<Vehicle>)>>;
}

pub trait DriverWriter {
    fn create_driver(&self, new_driver: &NewDriver) -> RepositoryResult<Driver>;
    fn update_driver(&self, driver_id: i32, updates: &UpdateDriver) -> RepositoryResult<Driver>;
}

pub trait OrderReader {
    fn get_order_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Order>>;
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
}

pub trait OrderWriter {
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    fn set_order_status(&self, order_id: i32, status: OrderStatus) -> RepositoryResult<Order>;
}

pub trait InvoiceReader {
    fn list_invoices(&self, query: InvoiceListQuery) -> RepositoryResult<(usize, Vec<Invoice>)>;
}

pub trait InvoiceWriter {
    fn create_invoice(&self, new_invoice: &NewInvoice) -> RepositoryResult<Invoice>;
    fn set_invoice_status(
        &self,
        invoice_id: i32,
        status: InvoiceStatus,
    ) -> RepositoryResult<Invoice>;
}

pub trait MaintenanceReader {
    fn list_maintenance_records(
        &self,
        query: MaintenanceListQuery,
    ) -> RepositoryResult<(usize, Vec<MaintenanceRecord>)>;
}

pub trait MaintenanceWriter {
    fn create_maintenance_record(
        &self,
        record: &NewMaintenanceRecord,
    ) -> RepositoryResult<MaintenanceRecord>;
}

pub trait ScreeningReader {
    fn list_screening_logs(
        &self,
        query: ScreeningListQuery,
    ) -> RepositoryResult<(usize, Vec<(ScreeningLog, Driver)>)>;
}

pub trait ScreeningWriter {
    fn create_screening_log(&self, log: &NewScreeningLog) -> RepositoryResult<ScreeningLog>;
}

pub trait OrganizationReader {
    fn get_organization(&self, org_id: i32) -> RepositoryResult<Option<Organization>>;
}

pub trait OrganizationWriter {
    fn create_organization(&self, new_org: &NewOrganization) -> RepositoryResult<Organization>;
    fn update_org_settings(
        &self,
        org_id: i32,
        updates: &UpdateOrgSettings,
    ) -> RepositoryResult<Organization>;
    fn set_org_api_key(&self, org_id: i32, api_key: &str) -> RepositoryResult<Organization>;
}
