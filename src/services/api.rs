use crate::domain::vehicle::Vehicle;
use crate::models::auth::AccessContext;
use crate::repository::{VehicleListQuery, VehicleReader};
use crate::services::{ServiceError, ServiceResult};
use crate::SERVICE_ACCESS_ROLE;

/// Free-text vehicle search behind the JSON API.
pub fn search_vehicles<R>(
    repo: &R,
    ctx: &AccessContext,
    query: &str,
) -> ServiceResult<Vec<Vehicle>>
where
    R: VehicleReader + ?Sized,
{
    if !ctx.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let query = query.trim();
    let mut list_query = VehicleListQuery::new(ctx.user.org_id);
    if !query.is_empty() {
        list_query = list_query.search(query);
    }

    let (_total, vehicles) = repo.list_vehicles(list_query)?;
    Ok(vehicles)
}
