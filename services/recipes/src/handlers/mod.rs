pub mod auth;
pub mod ingredient;
pub mod membership;
pub mod recipe;
pub mod shopping_list;
pub mod subscription;
pub mod tag;
pub mod user;

use serde::de::DeserializeOwned;

use crate::error::RecipesServiceError;

/// Decode a raw query string with `serde_qs`, treating an absent query as all defaults.
pub(crate) fn parse_query<T: DeserializeOwned + Default>(
    raw_query: Option<&str>,
) -> Result<T, RecipesServiceError> {
    raw_query
        .filter(|q| !q.is_empty())
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| RecipesServiceError::InvalidQuery)
        .map(Option::unwrap_or_default)
}

/// `1` and `true` switch a boolean query filter on; anything else leaves it off.
pub(crate) fn query_flag(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true"))
}
