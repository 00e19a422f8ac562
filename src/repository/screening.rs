use diesel::prelude::*;

use crate::domain::driver::Driver;
use crate::domain::screening::{NewScreeningLog, ScreeningLog};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ScreeningListQuery, ScreeningReader, ScreeningWriter};
use crate::schema::{drivers, screening_logs};

impl ScreeningReader for DieselRepository {
    fn list_screening_logs(
        &self,
        query: ScreeningListQuery,
    ) -> RepositoryResult<(usize, Vec<(ScreeningLog, Driver)>)> {
        use crate::models::driver::Driver as DbDriver;
        use crate::models::screening::ScreeningLog as DbScreeningLog;

        let mut conn = self.conn()?;

        // The log joins its driver both for display and for name search, so
        // the restriction is built twice: once counting, once loading.
        let apply = |query: &ScreeningListQuery| {
            let mut joined = screening_logs::table
                .inner_join(drivers::table)
                .filter(screening_logs::org_id.eq(query.org_id))
                .into_boxed();

            if let Some(search) = &query.search {
                let pattern = format!("%{search}%");
                joined = joined.filter(
                    drivers::name
                        .like(pattern.clone())
                        .or(drivers::license_number.like(pattern)),
                );
            }

            if !query.kinds.is_empty() {
                let kinds: Vec<String> = query.kinds.iter().map(ToString::to_string).collect();
                joined = joined.filter(screening_logs::kind.eq_any(kinds));
            }

            if !query.results.is_empty() {
                let results: Vec<String> =
                    query.results.iter().map(ToString::to_string).collect();
                joined = joined.filter(screening_logs::result.eq_any(results));
            }

            joined
        };

        let total: i64 = apply(&query).count().get_result(&mut conn)?;

        let mut items_query = apply(&query).order(screening_logs::screened_at.desc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            items_query = items_query.limit(per_page).offset((page - 1) * per_page);
        }

        let items = items_query
            .load::<(DbScreeningLog, DbDriver)>(&mut conn)?
            .into_iter()
            .map(|(log, driver)| (log.into(), driver.into()))
            .collect();

        Ok((total as usize, items))
    }
}

impl ScreeningWriter for DieselRepository {
    fn create_screening_log(&self, log: &NewScreeningLog) -> RepositoryResult<ScreeningLog> {
        use crate::models::screening::{
            NewScreeningLog as DbNewScreeningLog, ScreeningLog as DbScreeningLog,
        };

        let mut conn = self.conn()?;
        let insertable: DbNewScreeningLog = log.into();
        let created = diesel::insert_into(screening_logs::table)
            .values(&insertable)
            .get_result::<DbScreeningLog>(&mut conn)?;

        Ok(created.into())
    }
}
