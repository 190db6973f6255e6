//! Recipe API client — endpoint URLs, envelope decoding and typed lookups.
//!
//! Every response is an object with a single list field (`categories` or
//! `meals`). A missing or `null` list is an empty result, never an error; the
//! API answers an empty search with `{"meals": null}`.
//!
//! | Operation                         | Endpoint                   |
//! |-----------------------------------|----------------------------|
//! | [`MealDb::categories`]            | `categories.php`           |
//! | [`MealDb::search`]                | `search.php?s=<query>`     |
//! | [`MealDb::filter_by_category`]    | `filter.php?c=<category>`  |
//! | [`MealDb::lookup`]                | `lookup.php?i=<id>`        |

use std::sync::Arc;

use percent_encoding::utf8_percent_encode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::cache::ResponseCache;
use crate::config::ConfigError;
use crate::http::FetchError;
use crate::router::COMPONENT;

pub mod model;

pub use model::{Category, Ingredient, Meal, MealSummary};

/// Errors surfaced to view handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("unexpected response shape from {url}: {reason}")]
    Shape { url: String, reason: &'static str },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{what} not found")]
    NotFound { what: String },
}

impl ApiError {
    /// Returns `true` when the response was well formed but held nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Builds the request URL for each endpoint from a base URL.
///
/// The URL returned for a given argument is always byte-identical, since it is
/// also the cache key. Query values are escaped like `encodeURIComponent`.
///
/// # Examples
///
/// ```
/// use mealfinder::api::Endpoints;
///
/// let endpoints = Endpoints::new("https://www.themealdb.com/api/json/v1/1").unwrap();
/// assert_eq!(
///     endpoints.filter_by_category("Side Dish"),
///     "https://www.themealdb.com/api/json/v1/1/filter.php?c=Side%20Dish"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Parse and validate `base`. Only `http` and `https` bases are accepted.
    pub fn new(base: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: base.to_owned(),
            reason,
        };

        let url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(invalid("expected an http(s) URL".to_owned()));
        }
        Ok(Self { base: url })
    }

    /// Returns the base URL.
    pub fn base(&self) -> &str {
        self.base.as_str()
    }

    pub fn categories(&self) -> String {
        self.endpoint("categories.php", None)
    }

    pub fn search(&self, query: &str) -> String {
        self.endpoint("search.php", Some(("s", query)))
    }

    pub fn filter_by_category(&self, category: &str) -> String {
        self.endpoint("filter.php", Some(("c", category)))
    }

    pub fn lookup(&self, id: &str) -> String {
        self.endpoint("lookup.php", Some(("i", id)))
    }

    fn endpoint(&self, file: &str, query: Option<(&str, &str)>) -> String {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        // Infallible for bases accepted by `new`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(file);
        }
        // Appended by hand: `Url` would re-escape `'` in a special-scheme query.
        let mut out = String::from(url);
        if let Some((key, value)) = query {
            out.push('?');
            out.push_str(key);
            out.push('=');
            out.extend(utf8_percent_encode(value, COMPONENT));
        }
        out
    }
}

/// Typed, cache-backed client for the recipe API.
///
/// Cheap to clone; clones share the same [`ResponseCache`].
#[derive(Debug, Clone)]
pub struct MealDb {
    cache: Arc<ResponseCache>,
    endpoints: Endpoints,
}

impl MealDb {
    pub fn new(cache: Arc<ResponseCache>, endpoints: Endpoints) -> Self {
        Self { cache, endpoints }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// List every category.
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.list(&self.endpoints.categories(), "categories").await
    }

    /// Search meals by name. An empty result is `Ok(vec![])`.
    pub async fn search(&self, query: &str) -> Result<Vec<MealSummary>, ApiError> {
        self.list(&self.endpoints.search(query), "meals").await
    }

    /// List the meals of one category.
    pub async fn filter_by_category(&self, category: &str) -> Result<Vec<MealSummary>, ApiError> {
        self.list(&self.endpoints.filter_by_category(category), "meals")
            .await
    }

    /// Look up one meal by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the API knows no meal with that id.
    pub async fn lookup(&self, id: &str) -> Result<Meal, ApiError> {
        let meals: Vec<Meal> = self.list(&self.endpoints.lookup(id), "meals").await?;
        meals.into_iter().next().ok_or_else(|| ApiError::NotFound {
            what: format!("meal {id}"),
        })
    }

    async fn list<T: DeserializeOwned>(&self, url: &str, field: &str) -> Result<Vec<T>, ApiError> {
        let body = self.cache.fetch_cached(url).await?;
        list_field(url, &body, field)
    }
}

/// Extract and decode the list stored under `field`.
///
/// A missing or `null` field yields an empty list; a body that is not an
/// object, or a field that is neither `null` nor an array, is an error.
pub fn list_field<T: DeserializeOwned>(
    url: &str,
    body: &Value,
    field: &str,
) -> Result<Vec<T>, ApiError> {
    let shape = |reason| ApiError::Shape {
        url: url.to_owned(),
        reason,
    };

    let object = body.as_object().ok_or_else(|| shape("expected a JSON object"))?;
    match object.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(items @ Value::Array(_)) => {
            Vec::<T>::deserialize(items).map_err(|source| ApiError::Decode {
                url: url.to_owned(),
                source,
            })
        }
        Some(_) => Err(shape("list field is not an array")),
    }
}
