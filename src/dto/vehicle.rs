use serde::Deserialize;

use crate::domain::driver::Driver;
use crate::domain::garage::Garage;
use crate::domain::maintenance::MaintenanceRecord;
use crate::domain::vehicle::Vehicle;
use crate::pagination::Paginated;

/// Query parameters accepted by the vehicle detail page.
#[derive(Debug, Default, Deserialize)]
pub struct VehicleMaintenanceQuery {
    /// Page of the maintenance history.
    pub page: Option<usize>,
}

/// Data required to render the vehicle detail template.
pub struct VehiclePageData {
    pub vehicle: Vehicle,
    pub maintenance: Paginated<MaintenanceRecord>,
    pub assigned_drivers: Vec<Driver>,
    pub all_drivers: Vec<Driver>,
    pub garages: Vec<Garage>,
}
