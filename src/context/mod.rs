//! Per-navigation context — everything a view handler needs to build its page.
//!
//! A [`Context`] carries the parsed route, its named parameters, the navigation
//! token it was dispatched under, and the shared API client. Handlers can call
//! [`Context::is_current`] between dependent fetches to stop early once the user
//! has navigated elsewhere.

use std::collections::HashMap;

use crate::api::MealDb;
use crate::router::Route;
use crate::view::Root;

/// Named parameters extracted from the route
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    map: HashMap<String, String>,
}

impl Parameters {
    /// Create a new empty parameters map
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Insert a value into the parameters map
    pub fn insert(&mut self, key: String, value: String) {
        self.map.insert(key, value);
    }

    /// Get a value from the parameters map
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|value| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Per-navigation context handed to view handlers.
pub struct Context {
    route: Route,
    params: Parameters,
    token: u64,
    root: Root,
    api: MealDb,
}

impl Context {
    /// Create a context for the navigation identified by `token`
    pub fn new(route: Route, token: u64, root: Root, api: MealDb) -> Self {
        Self {
            params: route.params(),
            route,
            token,
            root,
            api,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Navigation token this handler was dispatched under
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn api(&self) -> &MealDb {
        &self.api
    }

    /// `false` once a newer navigation has started
    pub fn is_current(&self) -> bool {
        self.root.navigation() == self.token
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::Endpoints;
    use crate::cache::ResponseCache;
    use crate::http::Fetcher;
    use crate::http::mock::MockFetcher;
    use crate::view::ViewState;

    fn api() -> MealDb {
        let fetcher = MockFetcher::new() as Arc<dyn Fetcher>;
        MealDb::new(
            Arc::new(ResponseCache::new(fetcher)),
            Endpoints::new("https://api.test").unwrap(),
        )
    }

    #[test]
    fn params_follow_route() {
        let ctx = Context::new(Route::Meal("52772".into()), 1, Root::new(), api());
        assert_eq!(ctx.params().get("id"), Some("52772"));
        assert_eq!(ctx.params().len(), 1);
        assert_eq!(ctx.route(), &Route::Meal("52772".into()));

        let home = Context::new(Route::Home, 1, Root::new(), api());
        assert!(home.params().is_empty());
    }

    #[test]
    fn becomes_stale_after_newer_navigation() {
        let root = Root::new();
        let token = root.begin("A".into(), ViewState::Blank);
        let ctx = Context::new(Route::Home, token, root.clone(), api());
        assert!(ctx.is_current());
        assert_eq!(ctx.token(), 1);

        root.begin("B".into(), ViewState::Blank);
        assert!(!ctx.is_current());
    }
}
