use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::garage::{Garage, NewGarage, UpdateGarage};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, GarageListQuery, GarageReader, GarageWriter};
use crate::schema::garages;

fn filtered(query: &GarageListQuery) -> garages::BoxedQuery<'static, Sqlite> {
    let mut filtered = garages::table
        .filter(garages::org_id.eq(query.org_id))
        .into_boxed();

    if let Some(search) = &query.search {
        let pattern = format!("%{search}%");
        filtered = filtered.filter(
            garages::name
                .like(pattern.clone())
                .or(garages::address.like(pattern.clone()))
                .or(garages::city.like(pattern)),
        );
    }

    if !query.cities.is_empty() {
        filtered = filtered.filter(garages::city.eq_any(query.cities.clone()));
    }

    filtered
}

impl GarageReader for DieselRepository {
    fn get_garage_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Garage>> {
        use crate::models::garage::Garage as DbGarage;

        let mut conn = self.conn()?;
        let garage = garages::table
            .find(id)
            .filter(garages::org_id.eq(org_id))
            .first::<DbGarage>(&mut conn)
            .optional()?;

        Ok(garage.map(Into::into))
    }

    fn list_garages(&self, query: GarageListQuery) -> RepositoryResult<(usize, Vec<Garage>)> {
        use crate::models::garage::Garage as DbGarage;

        let mut conn = self.conn()?;

        let total: i64 = filtered(&query).count().get_result(&mut conn)?;

        let mut items_query = filtered(&query).order(garages::name.asc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            items_query = items_query.limit(per_page).offset((page - 1) * per_page);
        }

        let items = items_query
            .load::<DbGarage>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total as usize, items))
    }

    fn list_garage_cities(&self, org_id: i32) -> RepositoryResult<Vec<String>> {
        let mut conn = self.conn()?;
        let cities = garages::table
            .filter(garages::org_id.eq(org_id))
            .select(garages::city)
            .distinct()
            .order(garages::city.asc())
            .load::<String>(&mut conn)?;

        Ok(cities)
    }
}

impl GarageWriter for DieselRepository {
    fn create_garage(&self, new_garage: &NewGarage) -> RepositoryResult<Garage> {
        use crate::models::garage::{Garage as DbGarage, NewGarage as DbNewGarage};

        let mut conn = self.conn()?;
        let insertable: DbNewGarage = new_garage.into();
        let created = diesel::insert_into(garages::table)
            .values(&insertable)
            .get_result::<DbGarage>(&mut conn)?;

        Ok(created.into())
    }

    fn update_garage(&self, garage_id: i32, updates: &UpdateGarage) -> RepositoryResult<Garage> {
        use crate::models::garage::{Garage as DbGarage, UpdateGarage as DbUpdateGarage};

        let mut conn = self.conn()?;
        let db_updates: DbUpdateGarage = updates.into();

        let updated = diesel::update(garages::table.find(garage_id))
            .set(&db_updates)
            .get_result::<DbGarage>(&mut conn)?;

        Ok(updated.into())
    }
}
