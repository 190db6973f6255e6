//! Hash routing — map URL fragments to routes and routes to view handlers.
//!
//! This module provides [`parse_route`], which turns a fragment into a [`Route`], and
//! [`Router`], which dispatches each route to the handler registered for its kind.
//!
//! | Fragment               | Route                                  |
//! |------------------------|----------------------------------------|
//! | *(empty)*, `#home`     | [`Route::Home`]                        |
//! | `#categories`          | [`Route::Categories`]                  |
//! | `#category/<name>`     | [`Route::Category`], name percent-decoded |
//! | `#meal/<id>`           | [`Route::Meal`], id taken verbatim     |
//! | anything else          | [`Route::Home`]                        |
//!
//! Parsing is total: an unrecognised fragment falls back to the home page instead of an
//! error page.
//!
//! Dispatches are not serialized. Each one takes a fresh navigation token; when its
//! handler finishes, the result reaches the application root only if no newer navigation
//! has started in the meantime. Late results are discarded.

use std::collections::HashMap;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::api::MealDb;
use crate::context::{Context, Parameters};
use crate::view::{Root, ViewState};

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
pub(crate) const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Type-erased, heap-allocated async view handler that turns a [`Context`] into a
/// [`ViewState`].
///
/// In practice you never construct this type directly — use [`Router::on`] instead.
pub type Handler =
    Arc<dyn Fn(Context) -> Pin<Box<dyn Future<Output = ViewState> + Send>> + Send + Sync + 'static>;

/// Conversion trait for async view handlers.
///
/// Any `Fn(Context) -> impl Future<Output = ViewState> + Send` that is also
/// `Send + Sync + 'static` implements this trait through the blanket impl below.
pub trait IntoHandler: Send + Sync + 'static {
    /// Call the handler with the given context, boxing the returned future.
    fn call(&self, ctx: Context) -> Pin<Box<dyn Future<Output = ViewState> + Send>>;
}

impl<T, F> IntoHandler for T
where
    T: Fn(Context) -> F + Send + Sync + 'static,
    F: Future<Output = ViewState> + Send + 'static,
{
    fn call(&self, ctx: Context) -> Pin<Box<dyn Future<Output = ViewState> + Send>> {
        Box::pin((self)(ctx))
    }
}

/// A parsed navigation intent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Categories,
    /// A category, by its decoded display name.
    Category(String),
    /// A meal, by its raw id.
    Meal(String),
}

/// The variant of a [`Route`] without its payload; handlers are registered per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    Home,
    Categories,
    Category,
    Meal,
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Home => "home",
            Self::Categories => "categories",
            Self::Category => "category",
            Self::Meal => "meal",
        })
    }
}

impl Route {
    pub fn kind(&self) -> RouteKind {
        match self {
            Self::Home => RouteKind::Home,
            Self::Categories => RouteKind::Categories,
            Self::Category(_) => RouteKind::Category,
            Self::Meal(_) => RouteKind::Meal,
        }
    }

    /// Named parameters carried by the route: `name` for categories, `id` for meals.
    pub fn params(&self) -> Parameters {
        let mut params = Parameters::new();
        match self {
            Self::Category(name) => params.insert("name".to_string(), name.clone()),
            Self::Meal(id) => params.insert("id".to_string(), id.clone()),
            Self::Home | Self::Categories => {}
        }
        params
    }

    /// Canonical fragment, including the leading `#`.
    ///
    /// Category names are percent-encoded the way `encodeURIComponent` does, so
    /// `parse_route(&route.to_fragment())` gives back the same route.
    ///
    /// # Examples
    ///
    /// ```
    /// use mealfinder::router::Route;
    ///
    /// assert_eq!(Route::Category("Side Dish".into()).to_fragment(), "#category/Side%20Dish");
    /// assert_eq!(Route::Meal("52772".into()).to_fragment(), "#meal/52772");
    /// ```
    pub fn to_fragment(&self) -> String {
        match self {
            Self::Home => "#home".to_string(),
            Self::Categories => "#categories".to_string(),
            Self::Category(name) => format!("#category/{}", utf8_percent_encode(name, COMPONENT)),
            Self::Meal(id) => format!("#meal/{id}"),
        }
    }

    /// Page title shown while this route is current.
    pub fn title(&self) -> String {
        match self {
            Self::Home => "Home — Meal Finder".to_string(),
            Self::Categories => "Categories — Meal Finder".to_string(),
            Self::Category(name) => format!("Category: {name} — Meal Finder"),
            Self::Meal(id) => format!("Meal — {id} | Meal Finder"),
        }
    }

    /// Placeholder text shown between dispatch and completion.
    pub fn loading_message(&self) -> String {
        match self {
            Self::Home => "Loading...".to_string(),
            Self::Categories => "Loading categories...".to_string(),
            Self::Category(name) => format!("Loading \"{name}\"..."),
            Self::Meal(_) => "Loading meal details...".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fragment())
    }
}

impl From<&str> for Route {
    fn from(fragment: &str) -> Self {
        parse_route(fragment)
    }
}

/// Parse a URL fragment into a [`Route`].
///
/// One leading `#` is ignored. The rest is split on `/` and empty segments are dropped,
/// so `#/meal//42/` and `meal/42` are equivalent. Never fails: any shape not listed in the
/// module table yields [`Route::Home`].
///
/// # Examples
///
/// ```
/// use mealfinder::router::{Route, parse_route};
///
/// assert_eq!(parse_route(""), Route::Home);
/// assert_eq!(parse_route("#garbage"), Route::Home);
/// assert_eq!(parse_route("category/Side%20Dish"), Route::Category("Side Dish".into()));
/// assert_eq!(parse_route("#meal/52772"), Route::Meal("52772".into()));
/// ```
pub fn parse_route(fragment: &str) -> Route {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let segments: Vec<&str> = fragment.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] | ["home", ..] => Route::Home,
        ["categories", ..] => Route::Categories,
        ["category", rest @ ..] if !rest.is_empty() => Route::Category(decode(&rest.join("/"))),
        ["meal", id, ..] => Route::Meal((*id).to_string()),
        _ => Route::Home,
    }
}

// Invalid escapes are kept literally; invalid UTF-8 is replaced.
fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// What became of a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The handler's result was written to the root.
    Applied,
    /// A newer navigation started first; the result was dropped.
    Discarded { current: u64 },
    /// The handler task panicked or was aborted; the root keeps its placeholder.
    Failed,
}

/// Handle to an in-flight dispatch.
///
/// Dropping it does not cancel anything; the handler keeps running and its result is
/// still applied if current.
#[derive(Debug)]
pub struct Dispatch {
    token: u64,
    route: Route,
    task: JoinHandle<Outcome>,
}

impl Dispatch {
    /// Navigation token assigned to this dispatch.
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Wait for the handler and report whether its result was applied.
    pub async fn outcome(self) -> Outcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(token = self.token, route = %self.route, error = %e, "view handler failed");
                Outcome::Failed
            }
        }
    }
}

/// Fragment router that dispatches routes to registered view handlers.
///
/// Each [`RouteKind`] has at most one handler; registering again replaces it. A route
/// whose kind has no handler resolves to an error view.
///
/// # Examples
///
/// ```rust,no_run
/// use mealfinder::router::{RouteKind, Router};
/// use mealfinder::view::{Root, handlers};
///
/// # async fn example(api: mealfinder::api::MealDb) {
/// let mut router = Router::new(api, Root::new());
/// router.on(RouteKind::Categories, |ctx: mealfinder::context::Context| async move {
///     handlers::categories(ctx.api()).await
/// });
///
/// let outcome = router.navigate("#categories").outcome().await;
/// # }
/// ```
pub struct Router {
    handlers: HashMap<RouteKind, Handler>,
    api: MealDb,
    root: Root,
}

impl Router {
    /// Create a router with no handlers, writing into `root`.
    pub fn new(api: MealDb, root: Root) -> Self {
        Self {
            handlers: HashMap::new(),
            api,
            root,
        }
    }

    /// Register the handler for every route of `kind`.
    pub fn on(&mut self, kind: RouteKind, handler: impl IntoHandler) {
        let handler: Handler = Arc::new(move |ctx| handler.call(ctx));
        self.handlers.insert(kind, handler);
    }

    /// Return the number of route kinds with a handler.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Return `true` if no handlers have been registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    /// Parse `fragment` and dispatch the resulting route.
    pub fn navigate(&self, fragment: &str) -> Dispatch {
        self.dispatch(parse_route(fragment))
    }

    /// Start a navigation to `route`.
    ///
    /// Takes the next navigation token, shows the route's loading placeholder, and spawns
    /// the handler on the current Tokio runtime. Returns without waiting for the handler.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn dispatch(&self, route: Route) -> Dispatch {
        let token = self
            .root
            .begin(route.title(), ViewState::loading(route.loading_message()));
        info!(token, route = %route, "navigating");

        let handler = self.handlers.get(&route.kind()).cloned();
        let ctx = Context::new(route.clone(), token, self.root.clone(), self.api.clone());
        let root = self.root.clone();
        let kind = route.kind();

        let task = tokio::spawn(async move {
            let state = match handler {
                Some(handler) => handler(ctx).await,
                None => ViewState::error(format!("No view registered for {kind}")),
            };

            match root.apply(token, state) {
                Ok(()) => {
                    debug!(token, "view applied");
                    Outcome::Applied
                }
                Err(current) => {
                    debug!(token, current, "stale view discarded");
                    Outcome::Discarded { current }
                }
            }
        });

        Dispatch { token, route, task }
    }
}
