use serde::Serialize;

use crate::domain::driver::Driver;
use crate::domain::vehicle::Vehicle;

/// One row of the drivers table: the driver with the vehicles assigned to
/// them.
#[derive(Debug, Serialize)]
pub struct DriverRow {
    pub driver: Driver,
    pub vehicles: Vec<Vehicle>,
}

/// Data required to render the drivers template.
pub struct DriversPageData {
    pub drivers: Vec<DriverRow>,
}
