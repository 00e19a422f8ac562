use diesel::prelude::*;

use crate::domain::driver::{Driver, NewDriver, UpdateDriver};
use crate::domain::vehicle::Vehicle;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, DriverReader, DriverWriter};
use crate::schema::drivers;

impl DriverReader for DieselRepository {
    fn get_driver_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Driver>> {
        use crate::models::driver::Driver as DbDriver;

        let mut conn = self.conn()?;
        let driver = drivers::table
            .find(id)
            .filter(drivers::org_id.eq(org_id))
            .first::<DbDriver>(&mut conn)
            .optional()?;

        Ok(driver.map(Into::into))
    }

    fn list_drivers(&self, org_id: i32) -> RepositoryResult<Vec<Driver>> {
        use crate::models::driver::Driver as DbDriver;

        let mut conn = self.conn()?;
        let all = drivers::table
            .filter(drivers::org_id.eq(org_id))
            .order(drivers::name.asc())
            .load::<DbDriver>(&mut conn)?;

        Ok(all.into_iter().map(Into::into).collect())
    }

    fn list_drivers_with_vehicles(
        &self,
        org_id: i32,
    ) -> RepositoryResult<Vec<(Driver, Vec<Vehicle>)>> {
        use crate::models::driver::{Driver as DbDriver, VehicleDriver};
        use crate::models::vehicle::Vehicle as DbVehicle;
        use crate::schema::vehicles;

        let mut conn = self.conn()?;
        let db_drivers = drivers::table
            .filter(drivers::org_id.eq(org_id))
            .order(drivers::name.asc())
            .load::<DbDriver>(&mut conn)?;

        let assignments: Vec<(VehicleDriver, DbVehicle)> = VehicleDriver::belonging_to(&db_drivers)
            .inner_join(vehicles::table)
            .load::<(VehicleDriver, DbVehicle)>(&mut conn)?;

        let grouped = assignments.grouped_by(&db_drivers);

        Ok(db_drivers
            .into_iter()
            .zip(grouped)
            .map(|(driver, assigned)| {
                let vehicles = assigned
                    .into_iter()
                    .map(|(_, vehicle)| vehicle.into())
                    .collect();
                (driver.into(), vehicles)
            })
            .collect())
    }
}

impl DriverWriter for DieselRepository {
    fn create_driver(&self, new_driver: &NewDriver) -> RepositoryResult<Driver> {
        use crate::models::driver::{Driver as DbDriver, NewDriver as DbNewDriver};

        let mut conn = self.conn()?;
        let insertable: DbNewDriver = new_driver.into();
        let created = diesel::insert_into(drivers::table)
            .values(&insertable)
            .get_result::<DbDriver>(&mut conn)?;

        Ok(created.into())
    }

    fn update_driver(&self, driver_id: i32, updates: &UpdateDriver) -> RepositoryResult<Driver> {
        use crate::models::driver::{Driver as DbDriver, UpdateDriver as DbUpdateDriver};

        let mut conn = self.conn()?;
        let db_updates: DbUpdateDriver = updates.into();

        let updated = diesel::update(drivers::table.find(driver_id))
            .set(&db_updates)
            .get_result::<DbDriver>(&mut conn)?;

        Ok(updated.into())
    }
}
