use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::driver::Driver;
use crate::domain::vehicle::{NewVehicle, UpdateVehicle, Vehicle};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, VehicleListQuery, VehicleReader, VehicleWriter};
use crate::schema::vehicles;

/// Applies every criterion of the query. Built once for the page load and
/// once for the count so both see the same restriction.
fn filtered(query: &VehicleListQuery) -> vehicles::BoxedQuery<'static, Sqlite> {
    let mut filtered = vehicles::table
        .filter(vehicles::org_id.eq(query.org_id))
        .into_boxed();

    if let Some(search) = &query.search {
        let pattern = format!("%{search}%");
        filtered = filtered.filter(
            vehicles::plate_number
                .like(pattern.clone())
                .or(vehicles::vin.like(pattern.clone()))
                .or(vehicles::make.like(pattern.clone()))
                .or(vehicles::model.like(pattern)),
        );
    }

    if !query.statuses.is_empty() {
        let statuses: Vec<String> = query.statuses.iter().map(ToString::to_string).collect();
        filtered = filtered.filter(vehicles::status.eq_any(statuses));
    }

    if !query.garage_ids.is_empty() {
        let garage_ids: Vec<Option<i32>> = query.garage_ids.iter().map(|id| Some(*id)).collect();
        filtered = filtered.filter(vehicles::garage_id.eq_any(garage_ids));
    }

    if let Some(year_min) = query.year_min {
        filtered = filtered.filter(vehicles::year.ge(year_min));
    }
    if let Some(year_max) = query.year_max {
        filtered = filtered.filter(vehicles::year.le(year_max));
    }

    filtered
}

impl VehicleReader for DieselRepository {
    fn get_vehicle_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Vehicle>> {
        use crate::models::vehicle::Vehicle as DbVehicle;

        let mut conn = self.conn()?;
        let vehicle = vehicles::table
            .find(id)
            .filter(vehicles::org_id.eq(org_id))
            .first::<DbVehicle>(&mut conn)
            .optional()?;

        Ok(vehicle.map(Into::into))
    }

    fn list_vehicles(&self, query: VehicleListQuery) -> RepositoryResult<(usize, Vec<Vehicle>)> {
        use crate::models::vehicle::Vehicle as DbVehicle;

        let mut conn = self.conn()?;

        let total: i64 = filtered(&query).count().get_result(&mut conn)?;

        let mut items_query = filtered(&query).order(vehicles::id.asc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            items_query = items_query
                .limit(per_page)
                .offset((page - 1) * per_page);
        }

        let items = items_query
            .load::<DbVehicle>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total as usize, items))
    }

    fn list_vehicle_drivers(&self, vehicle_id: i32) -> RepositoryResult<Vec<Driver>> {
        use crate::models::driver::Driver as DbDriver;
        use crate::schema::{drivers, vehicle_drivers};

        let mut conn = self.conn()?;
        let assigned = vehicle_drivers::table
            .inner_join(drivers::table)
            .filter(vehicle_drivers::vehicle_id.eq(vehicle_id))
            .order(drivers::name.asc())
            .select(DbDriver::as_select())
            .load::<DbDriver>(&mut conn)?;

        Ok(assigned.into_iter().map(Into::into).collect())
    }
}

impl VehicleWriter for DieselRepository {
    fn create_vehicles(&self, new_vehicles: &[NewVehicle]) -> RepositoryResult<usize> {
        use crate::models::vehicle::NewVehicle as DbNewVehicle;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewVehicle> = new_vehicles.iter().map(Into::into).collect();
        let affected = diesel::insert_into(vehicles::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn update_vehicle(
        &self,
        vehicle_id: i32,
        updates: &UpdateVehicle,
    ) -> RepositoryResult<Vehicle> {
        use crate::models::vehicle::{UpdateVehicle as DbUpdateVehicle, Vehicle as DbVehicle};

        let mut conn = self.conn()?;
        let db_updates: DbUpdateVehicle = updates.into();

        let updated = diesel::update(vehicles::table.find(vehicle_id))
            .set(&db_updates)
            .get_result::<DbVehicle>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_vehicle(&self, vehicle_id: i32) -> RepositoryResult<()> {
        use crate::schema::vehicle_drivers;

        let mut conn = self.conn()?;

        diesel::delete(
            vehicle_drivers::table.filter(vehicle_drivers::vehicle_id.eq(vehicle_id)),
        )
        .execute(&mut conn)?;
        diesel::delete(vehicles::table.find(vehicle_id)).execute(&mut conn)?;
        Ok(())
    }

    fn assign_drivers_to_vehicle(
        &self,
        vehicle_id: i32,
        driver_ids: &[i32],
    ) -> RepositoryResult<usize> {
        use crate::models::driver::VehicleDriver;
        use crate::schema::vehicle_drivers;

        let mut conn = self.conn()?;

        diesel::delete(
            vehicle_drivers::table.filter(vehicle_drivers::vehicle_id.eq(vehicle_id)),
        )
        .execute(&mut conn)?;

        let pairs: Vec<VehicleDriver> = driver_ids
            .iter()
            .map(|driver_id| VehicleDriver {
                vehicle_id,
                driver_id: *driver_id,
            })
            .collect();

        let affected = diesel::insert_into(vehicle_drivers::table)
            .values(&pairs)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
