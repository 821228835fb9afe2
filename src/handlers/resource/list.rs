// handlers/resource/list.rs - GET /{resource}/v1 handler
//
// Options come from either the query string (`?title=x&limit=2&order_by=title`)
// or a JSON body with the same fields. A body wins when both are present.
// With neither, the service receives no options and applies its defaults.

use axum::{
    body::Bytes,
    extract::{Query, RawQuery, State},
};

use crate::auth::Caller;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::resources::{ListOptions, Pagination, Resource};
use crate::services::ResourceService;

pub async fn list<R: Resource>(
    State(service): State<ResourceService<R>>,
    caller: Caller,
    RawQuery(raw_query): RawQuery,
    body: Bytes,
) -> ApiResult<Vec<R>> {
    let options = if !body.is_empty() {
        Some(
            serde_json::from_slice::<ListOptions<R::Filters>>(&body)
                .map_err(|e| ApiError::invalid_json(e.to_string()))?,
        )
    } else {
        match raw_query.as_deref() {
            Some(query) if !query.is_empty() => Some(from_query::<R>(query)?),
            _ => None,
        }
    };

    let entities = service.list(caller, options).await?;
    Ok(ApiResponse::success(entities))
}

fn from_query<R: Resource>(query: &str) -> Result<ListOptions<R::Filters>, ApiError> {
    let uri: axum::http::Uri = format!("/?{}", query)
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid query string"))?;
    let Query(pagination) =
        Query::<Pagination>::try_from_uri(&uri).map_err(|e| ApiError::bad_request(e.body_text()))?;
    let Query(filters) =
        Query::<R::Filters>::try_from_uri(&uri).map_err(|e| ApiError::bad_request(e.body_text()))?;
    Ok(pagination.with_filters(filters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{Membership, Record};
    use uuid::Uuid;

    #[test]
    fn query_string_fills_pagination_and_filters() {
        let options = from_query::<Record>("title=Record%201&skip=2&limit=3&order_by=title&order_direction=desc").unwrap();
        assert_eq!(options.filters.title, "Record 1");
        assert_eq!(options.skip, 2);
        assert_eq!(options.limit, 3);
        assert_eq!(options.order_direction, "desc");
    }

    #[test]
    fn membership_filters_parse_uuids() {
        let org = Uuid::new_v4();
        let options = from_query::<Membership>(&format!("org_id={}", org)).unwrap();
        assert_eq!(options.filters.org_id, Some(org));
        assert_eq!(options.filters.user_id, None);
        assert!(from_query::<Membership>("org_id=nope").is_err());
    }

    #[test]
    fn non_numeric_limit_is_rejected() {
        assert!(from_query::<Record>("limit=ten").is_err());
    }
}
