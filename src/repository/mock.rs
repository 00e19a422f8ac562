//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::driver::{Driver, NewDriver, UpdateDriver};
use crate::domain::garage::{Garage, NewGarage, UpdateGarage};
use crate::domain::maintenance::{MaintenanceRecord, NewMaintenanceRecord};
use crate::domain::order::{Invoice, InvoiceStatus, NewInvoice, NewOrder, Order, OrderStatus};
use crate::domain::organization::{NewOrganization, Organization, UpdateOrgSettings};
use crate::domain::screening::{NewScreeningLog, ScreeningLog};
use crate::domain::vehicle::{NewVehicle, UpdateVehicle, Vehicle};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    DriverReader, DriverWriter, GarageListQuery, GarageReader, GarageWriter, InvoiceListQuery,
    InvoiceReader, InvoiceWriter, MaintenanceListQuery, MaintenanceReader, MaintenanceWriter,
    OrderListQuery, OrderReader, OrderWriter, OrganizationReader, OrganizationWriter,
    ScreeningListQuery, ScreeningReader, ScreeningWriter, VehicleListQuery, VehicleReader,
    VehicleWriter,
};

mock! {
    pub Repository {}

    impl VehicleReader for Repository {
        fn get_vehicle_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Vehicle>>;
        fn list_vehicles(&self, query: VehicleListQuery) -> RepositoryResult<(usize, Vec<Vehicle>)>;
        fn list_vehicle_drivers(&self, vehicle_id: i32) -> RepositoryResult<Vec<Driver>>;
    }

    impl VehicleWriter for Repository {
        fn create_vehicles(&self, new_vehicles: &[NewVehicle]) -> RepositoryResult<usize>;
        fn update_vehicle(&self, vehicle_id: i32, updates: &UpdateVehicle) -> RepositoryResult<Vehicle>;
        fn delete_vehicle(&self, vehicle_id: i32) -> RepositoryResult<()>;
        fn assign_drivers_to_vehicle(
            &self,
            vehicle_id: i32,
            driver_ids: &[i32],
        ) -> RepositoryResult<usize>;
    }

    impl GarageReader for Repository {
        fn get_garage_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Garage>>;
        fn list_garages(&self, query: GarageListQuery) -> RepositoryResult<(usize, Vec<Garage>)>;
        fn list_garage_cities(&self, org_id: i32) -> RepositoryResult<Vec<String>>;
    }

    impl GarageWriter for Repository {
        fn create_garage(&self, new_garage: &NewGarage) -> RepositoryResult<Garage>;
        fn update_garage(&self, garage_id: i32, updates: &UpdateGarage) -> RepositoryResult<Garage>;
    }

    impl DriverReader for Repository {
        fn get_driver_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Driver>>;
        fn list_drivers(&self, org_id: i32) -> RepositoryResult<Vec<Driver>>;
        fn list_drivers_with_vehicles(
            &self,
            org_id: i32,
        ) -> RepositoryResult<Vec<(Driver, Vec<Vehicle>)>>;
    }

    impl DriverWriter for Repository {
        fn create_driver(&self, new_driver: &NewDriver) -> RepositoryResult<Driver>;
        fn update_driver(&self, driver_id: i32, updates: &UpdateDriver) -> RepositoryResult<Driver>;
    }

    impl OrderReader for Repository {
        fn get_order_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
    }

    impl OrderWriter for Repository {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn set_order_status(&self, order_id: i32, status: OrderStatus) -> RepositoryResult<Order>;
    }

    impl InvoiceReader for Repository {
        fn list_invoices(&self, query: InvoiceListQuery) -> RepositoryResult<(usize, Vec<Invoice>)>;
    }

    impl InvoiceWriter for Repository {
        fn create_invoice(&self, new_invoice: &NewInvoice) -> RepositoryResult<Invoice>;
        fn set_invoice_status(
            &self,
            invoice_id: i32,
            status: InvoiceStatus,
        ) -> RepositoryResult<Invoice>;
    }

    impl MaintenanceReader for Repository {
        fn list_maintenance_records(
            &self,
            query: MaintenanceListQuery,
        ) -> RepositoryResult<(usize, Vec<MaintenanceRecord>)>;
    }

    impl MaintenanceWriter for Repository {
        fn create_maintenance_record(
            &self,
            record: &NewMaintenanceRecord,
        ) -> RepositoryResult<MaintenanceRecord>;
    }

    impl ScreeningReader for Repository {
        fn list_screening_logs(
            &self,
            query: ScreeningListQuery,
        ) -> RepositoryResult<(usize, Vec<(ScreeningLog, Driver)>)>;
    }

    impl ScreeningWriter for Repository {
        fn create_screening_log(&self, log: &NewScreeningLog) -> RepositoryResult<ScreeningLog>;
    }

    impl OrganizationReader for Repository {
        fn get_organization(&self, org_id: i32) -> RepositoryResult<Option<Organization>>;
    }

    impl OrganizationWriter for Repository {
        fn create_organization(&self, new_org: &NewOrganization) -> RepositoryResult<Organization>;
        fn update_org_settings(
            &self,
            org_id: i32,
            updates: &UpdateOrgSettings,
        ) -> RepositoryResult<Organization>;
        fn set_org_api_key(&self, org_id: i32, api_key: &str) -> RepositoryResult<Organization>;
    }
}
