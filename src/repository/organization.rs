use diesel::prelude::*;

use crate::domain::organization::{NewOrganization, Organization, UpdateOrgSettings};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, OrganizationReader, OrganizationWriter};
use crate::schema::organizations;

impl OrganizationReader for DieselRepository {
    fn get_organization(&self, org_id: i32) -> RepositoryResult<Option<Organization>> {
        use crate::models::organization::Organization as DbOrganization;

        let mut conn = self.conn()?;
        let org = organizations::table
            .find(org_id)
            .first::<DbOrganization>(&mut conn)
            .optional()?;

        Ok(org.map(Into::into))
    }
}

impl OrganizationWriter for DieselRepository {
    fn create_organization(&self, new_org: &NewOrganization) -> RepositoryResult<Organization> {
        use crate::models::organization::{
            NewOrganization as DbNewOrganization, Organization as DbOrganization,
        };

        let mut conn = self.conn()?;
        let insertable: DbNewOrganization = new_org.into();
        let created = diesel::insert_into(organizations::table)
            .values(&insertable)
            .get_result::<DbOrganization>(&mut conn)?;

        Ok(created.into())
    }

    fn update_org_settings(
        &self,
        org_id: i32,
        updates: &UpdateOrgSettings,
    ) -> RepositoryResult<Organization> {
        use crate::models::organization::{Organization as DbOrganization, join_modules};

        let mut conn = self.conn()?;
        let updated = diesel::update(organizations::table.find(org_id))
            .set((
                organizations::name.eq(&updates.name),
                organizations::timezone.eq(&updates.timezone),
                organizations::locale.eq(&updates.locale),
                organizations::currency.eq(&updates.currency),
                organizations::modules.eq(join_modules(&updates.modules)),
            ))
            .get_result::<DbOrganization>(&mut conn)?;

        Ok(updated.into())
    }

    fn set_org_api_key(&self, org_id: i32, api_key: &str) -> RepositoryResult<Organization> {
        use crate::models::organization::Organization as DbOrganization;

        let mut conn = self.conn()?;
        let updated = diesel::update(organizations::table.find(org_id))
            .set(organizations::api_key.eq(api_key))
            .get_result::<DbOrganization>(&mut conn)?;

        Ok(updated.into())
    }
}
