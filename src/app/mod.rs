//! Application assembly — one cache, one API client, one router, one root.
//!
//! [`App`] is what a front end holds on to. It owns the session's
//! [`ResponseCache`] explicitly instead of through a global, so any number of
//! isolated apps can coexist (tests build one per case).

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::api::MealDb;
use crate::cache::ResponseCache;
use crate::config::{Config, ConfigError};
use crate::context::Context;
use crate::http::{FetchError, Fetcher, HttpFetcher};
use crate::router::{Dispatch, RouteKind, Router};
use crate::view::{Menu, Root, SearchResults, handlers};

/// Fragment used when the session starts without one.
pub const START_FRAGMENT: &str = "#home";

/// Errors produced while assembling the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Register the four page handlers.
pub fn routes(router: &mut Router) {
    router.on(RouteKind::Home, |ctx: Context| async move {
        handlers::home(&ctx).await
    });
    router.on(RouteKind::Categories, |ctx: Context| async move {
        handlers::categories(ctx.api()).await
    });
    router.on(RouteKind::Category, |ctx: Context| async move {
        let name = ctx.params().get("name").unwrap_or("").to_owned();
        handlers::category(ctx.api(), &name).await
    });
    router.on(RouteKind::Meal, |ctx: Context| async move {
        let id = ctx.params().get("id").unwrap_or("").to_owned();
        handlers::meal(ctx.api(), &id).await
    });
}

/// A browsing session.
pub struct App {
    api: MealDb,
    router: Router,
}

impl App {
    /// Build an app that talks to the network with `reqwest`.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let fetcher = HttpFetcher::new(config)?;
        Self::with_fetcher(Arc::new(fetcher), config)
    }

    /// Build an app on top of an arbitrary transport.
    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>, config: &Config) -> Result<Self, AppError> {
        let endpoints = config.endpoints()?;
        info!(base = endpoints.base(), "recipe API");

        let cache = Arc::new(ResponseCache::new(fetcher));
        let api = MealDb::new(cache, endpoints);
        let mut router = Router::new(api.clone(), Root::new());
        routes(&mut router);

        Ok(Self { api, router })
    }

    pub fn root(&self) -> &Root {
        self.router.root()
    }

    pub fn api(&self) -> &MealDb {
        &self.api
    }

    pub fn cache(&self) -> &ResponseCache {
        self.api.cache()
    }

    /// Handle the initial URL. An empty fragment becomes [`START_FRAGMENT`].
    pub fn start(&self, fragment: Option<&str>) -> Dispatch {
        match fragment.map(str::trim).filter(|f| !f.is_empty() && *f != "#") {
            Some(fragment) => self.navigate(fragment),
            None => self.navigate(START_FRAGMENT),
        }
    }

    /// Handle a fragment change.
    pub fn navigate(&self, fragment: &str) -> Dispatch {
        self.router.navigate(fragment)
    }

    /// Run the home-page search. Returns `None` for a blank query.
    pub async fn search(&self, query: &str) -> Option<SearchResults> {
        handlers::search(&self.api, query).await
    }

    /// Load the category dropdown.
    pub async fn menu(&self) -> Menu {
        handlers::menu(&self.api).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockFetcher;
    use crate::router::{Outcome, Route};
    use crate::view::{View, ViewState};

    const BASE: &str = "https://api.test/api/json/v1/1";

    fn app(mock: &Arc<MockFetcher>) -> App {
        let config = Config {
            api_base_url: BASE.to_string(),
            ..Config::default()
        };
        App::with_fetcher(Arc::clone(mock) as Arc<dyn Fetcher>, &config).unwrap()
    }

    fn url(path: &str) -> String {
        format!("{BASE}/{path}")
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = Config {
            api_base_url: "nope".to_string(),
            ..Config::default()
        };
        let err = App::with_fetcher(MockFetcher::new() as Arc<dyn Fetcher>, &config)
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Config(ConfigError::InvalidBaseUrl { .. })));
    }

    #[tokio::test]
    async fn start_without_fragment_goes_home() {
        let mock = MockFetcher::new();
        mock.respond(&url("categories.php"), 200, r#"{"categories":[]}"#);
        let app = app(&mock);

        let dispatch = app.start(None);
        assert_eq!(dispatch.route(), &Route::Home);
        assert_eq!(dispatch.outcome().await, Outcome::Applied);
        assert_eq!(app.root().screen().title, "Home — Meal Finder");
    }

    #[tokio::test]
    async fn clicking_a_category_card_navigates_to_it() {
        let mock = MockFetcher::new();
        mock.respond(
            &url("categories.php"),
            200,
            r#"{"categories":[{"strCategory":"Seafood","strCategoryThumb":"...","strCategoryDescription":"..."}]}"#,
        );
        mock.respond(
            &url("filter.php?c=Seafood"),
            200,
            r#"{"meals":[{"idMeal":"52959","strMeal":"Baked salmon with fennel & tomatoes"}]}"#,
        );
        let app = app(&mock);

        app.start(Some("")).outcome().await;
        let state = app.root().state();
        let Some(View::Home(home)) = state.view() else {
            panic!("expected home page, got {state:?}");
        };
        assert_eq!(home.categories.len(), 1);
        assert_eq!(home.categories[0].name, "Seafood");

        let fragment = home.categories[0].link().fragment();
        assert_eq!(fragment, "#category/Seafood");

        assert_eq!(app.navigate(&fragment).outcome().await, Outcome::Applied);
        assert!(matches!(
            app.root().state().view(),
            Some(View::Category { name, .. }) if name == "Seafood"
        ));
        // The sample fetched for home is reused by the category page.
        assert_eq!(mock.calls(&url("filter.php?c=Seafood")), 1);
    }

    #[tokio::test]
    async fn revisiting_a_page_uses_the_cache() {
        let mock = MockFetcher::new();
        mock.respond(&url("categories.php"), 200, r#"{"categories":[]}"#);
        let app = app(&mock);

        app.navigate("#categories").outcome().await;
        app.navigate("#home").outcome().await;
        app.navigate("#categories").outcome().await;

        assert_eq!(mock.calls(&url("categories.php")), 1);
        assert_eq!(app.cache().stats().hits, 2);
    }

    #[tokio::test]
    async fn failed_page_can_be_retried_by_navigating_again() {
        let mock = MockFetcher::new();
        mock.fail(&url("lookup.php?i=52772"));
        let app = app(&mock);

        app.navigate("#meal/52772").outcome().await;
        assert_eq!(app.root().state(), ViewState::error("Failed to load meal details."));
        assert!(!app.cache().contains(&url("lookup.php?i=52772")));

        mock.respond(
            &url("lookup.php?i=52772"),
            200,
            r#"{"meals":[{"idMeal":"52772","strMeal":"Teriyaki Chicken Casserole"}]}"#,
        );
        app.navigate("#meal/52772").outcome().await;
        assert!(matches!(app.root().state().view(), Some(View::Meal(_))));
    }

    #[tokio::test]
    async fn garbage_fragment_shows_home() {
        let mock = MockFetcher::new();
        mock.respond(&url("categories.php"), 200, r#"{"categories":null}"#);
        let app = app(&mock);

        let dispatch = app.navigate("#garbage");
        assert_eq!(dispatch.route(), &Route::Home);
        dispatch.outcome().await;
        assert!(matches!(app.root().state().view(), Some(View::Home(_))));
    }

    #[tokio::test]
    async fn search_and_menu_do_not_touch_the_root() {
        let mock = MockFetcher::new();
        mock.respond(&url("search.php?s=nothing"), 200, r#"{"meals":null}"#);
        mock.respond(&url("categories.php"), 200, r#"{"categories":[{"strCategory":"Beef"}]}"#);
        let app = app(&mock);

        let results = app.search("nothing").await.unwrap();
        assert_eq!(results.message().as_deref(), Some("No meals found for \"nothing\"."));
        assert_eq!(app.menu().await.links().len(), 1);
        assert_eq!(app.root().state(), ViewState::Blank);
    }
}
