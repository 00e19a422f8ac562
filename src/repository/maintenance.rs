use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::maintenance::{MaintenanceRecord, NewMaintenanceRecord};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    DieselRepository, MaintenanceListQuery, MaintenanceReader, MaintenanceWriter,
};
use crate::schema::maintenance_records;

fn filtered(query: &MaintenanceListQuery) -> maintenance_records::BoxedQuery<'static, Sqlite> {
    let mut filtered = maintenance_records::table
        .filter(maintenance_records::vehicle_id.eq(query.vehicle_id))
        .into_boxed();

    if !query.kinds.is_empty() {
        let kinds: Vec<String> = query.kinds.iter().map(ToString::to_string).collect();
        filtered = filtered.filter(maintenance_records::kind.eq_any(kinds));
    }

    filtered
}

impl MaintenanceReader for DieselRepository {
    fn list_maintenance_records(
        &self,
        query: MaintenanceListQuery,
    ) -> RepositoryResult<(usize, Vec<MaintenanceRecord>)> {
        use crate::models::maintenance::MaintenanceRecord as DbMaintenanceRecord;

        let mut conn = self.conn()?;

        let total: i64 = filtered(&query).count().get_result(&mut conn)?;

        let mut items_query =
            filtered(&query).order(maintenance_records::performed_at.desc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            items_query = items_query.limit(per_page).offset((page - 1) * per_page);
        }

        let items = items_query
            .load::<DbMaintenanceRecord>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total as usize, items))
    }
}

impl MaintenanceWriter for DieselRepository {
    fn create_maintenance_record(
        &self,
        record: &NewMaintenanceRecord,
    ) -> RepositoryResult<MaintenanceRecord> {
        use crate::models::maintenance::{
            MaintenanceRecord as DbMaintenanceRecord, NewMaintenanceRecord as DbNewMaintenanceRecord,
        };

        let mut conn = self.conn()?;
        let insertable: DbNewMaintenanceRecord = record.into();
        let created = diesel::insert_into(maintenance_records::table)
            .values(&insertable)
            .get_result::<DbMaintenanceRecord>(&mut conn)?;

        Ok(created.into())
    }
}
