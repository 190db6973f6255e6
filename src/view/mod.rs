//! Structured view model — what each route shows, independent of presentation.
//!
//! View handlers ([`handlers`]) produce a [`ViewState`]; renderers in
//! [`crate::render`] turn it into text or markup. Nothing here knows how it
//! will be drawn.

use std::fmt;

use crate::api::{Category, Ingredient, Meal, MealSummary};
use crate::router::Route;

pub mod handlers;
pub mod root;

pub use root::{Root, Screen};

/// Length of the description excerpt shown on category cards.
pub const BLURB_CHARS: usize = 80;

/// Content of the application root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Nothing has been dispatched yet.
    #[default]
    Blank,
    /// A dispatch is in flight.
    Loading { message: String },
    /// The last dispatch failed; the user must navigate again to retry.
    Error { message: String },
    /// A fully loaded page.
    Ready(View),
}

impl ViewState {
    pub fn loading(message: impl Into<String>) -> Self {
        Self::Loading {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Returns the loaded view, if any.
    pub fn view(&self) -> Option<&View> {
        match self {
            Self::Ready(view) => Some(view),
            _ => None,
        }
    }

    /// Navigation links on the current page, in display order.
    pub fn links(&self) -> Vec<Link> {
        self.view().map(View::links).unwrap_or_default()
    }
}

/// One page per route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home(HomePage),
    Categories { categories: Vec<CategoryCard> },
    Category { name: String, meals: MealList },
    Meal(MealDetail),
}

impl View {
    /// Back link shown above the page, if the page has one.
    pub fn back_link(&self) -> Option<Link> {
        match self {
            Self::Home(_) => None,
            Self::Categories { .. } | Self::Meal(_) => Some(Link::new("← Back to Home", Route::Home)),
            Self::Category { .. } => {
                Some(Link::new("← Back to Categories", Route::Categories))
            }
        }
    }

    /// Every navigation link on the page: back link first, then cards.
    pub fn links(&self) -> Vec<Link> {
        let mut links: Vec<Link> = self.back_link().into_iter().collect();
        match self {
            Self::Home(home) => {
                links.extend(home.sample.cards().iter().map(MealCard::link));
                links.extend(home.categories.iter().map(CategoryCard::link));
            }
            Self::Categories { categories } => {
                links.extend(categories.iter().map(CategoryCard::link));
            }
            Self::Category { meals, .. } => {
                links.extend(meals.cards().iter().map(MealCard::link));
            }
            Self::Meal(_) => {}
        }
        links
    }
}

/// The landing page: a sample of meals plus the category grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomePage {
    /// Meals from the first category, shown in the search-results panel.
    pub sample: MealList,
    pub categories: Vec<CategoryCard>,
}

/// A grid of meal cards, or the message shown in its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MealList {
    Meals(Vec<MealCard>),
    Empty { message: String },
}

impl MealList {
    /// Build a list, falling back to `empty_message` when there are no meals.
    pub fn from_meals(meals: Vec<MealSummary>, empty_message: &str) -> Self {
        if meals.is_empty() {
            Self::Empty {
                message: empty_message.to_string(),
            }
        } else {
            Self::Meals(meals.into_iter().map(MealCard::from).collect())
        }
    }

    pub fn cards(&self) -> &[MealCard] {
        match self {
            Self::Meals(cards) => cards,
            Self::Empty { .. } => &[],
        }
    }
}

/// A category tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCard {
    pub name: String,
    pub thumb: Option<String>,
    /// First [`BLURB_CHARS`] characters of the description.
    pub blurb: String,
}

impl CategoryCard {
    /// Where clicking the card leads.
    pub fn route(&self) -> Route {
        Route::Category(self.name.clone())
    }

    pub fn link(&self) -> Link {
        Link::new(self.name.clone(), self.route())
    }
}

impl From<&Category> for CategoryCard {
    fn from(category: &Category) -> Self {
        let blurb = category
            .description
            .as_deref()
            .unwrap_or("")
            .chars()
            .take(BLURB_CHARS)
            .collect();
        Self {
            name: category.name.clone(),
            thumb: category.thumb.clone(),
            blurb,
        }
    }
}

/// A meal tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealCard {
    pub id: String,
    pub name: String,
    pub thumb: Option<String>,
    pub area: Option<String>,
    pub category: Option<String>,
}

impl MealCard {
    pub fn route(&self) -> Route {
        Route::Meal(self.id.clone())
    }

    pub fn link(&self) -> Link {
        Link::new(self.name.clone(), self.route())
    }

    /// `"<area> · <category>"`, omitting whichever part is missing.
    pub fn meta(&self) -> String {
        match (self.area.as_deref(), self.category.as_deref()) {
            (Some(area), Some(category)) => format!("{area} · {category}"),
            (Some(one), None) | (None, Some(one)) => one.to_string(),
            (None, None) => String::new(),
        }
    }
}

impl From<MealSummary> for MealCard {
    fn from(meal: MealSummary) -> Self {
        Self {
            name: meal.name.unwrap_or_default(),
            id: meal.id,
            thumb: meal.thumb,
            area: meal.area.filter(|a| !a.is_empty()),
            category: meal.category.filter(|c| !c.is_empty()),
        }
    }
}

/// Everything shown on the meal detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealDetail {
    pub id: String,
    pub name: String,
    pub category: String,
    pub area: String,
    pub thumb: Option<String>,
    pub instructions: String,
    pub youtube: Option<String>,
    pub ingredients: Vec<Ingredient>,
}

impl From<Meal> for MealDetail {
    fn from(meal: Meal) -> Self {
        Self {
            id: meal.id,
            name: meal.name.unwrap_or_default(),
            category: meal.category.unwrap_or_default(),
            area: meal.area.unwrap_or_default(),
            thumb: meal.thumb,
            instructions: meal.instructions.unwrap_or_default(),
            youtube: meal.youtube,
            ingredients: meal.ingredients,
        }
    }
}

/// Result of a home-page search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResults {
    Found { query: String, meals: Vec<MealCard> },
    Empty { query: String },
    Failed { query: String },
}

impl SearchResults {
    pub fn query(&self) -> &str {
        match self {
            Self::Found { query, .. } | Self::Empty { query } | Self::Failed { query } => query,
        }
    }

    /// Message shown in place of the result grid, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Found { .. } => None,
            Self::Empty { query } => Some(format!("No meals found for \"{query}\".")),
            Self::Failed { .. } => Some("Failed to search meals.".to_string()),
        }
    }

    pub fn links(&self) -> Vec<Link> {
        match self {
            Self::Found { meals, .. } => meals.iter().map(MealCard::link).collect(),
            _ => Vec::new(),
        }
    }
}

/// The navigation dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Menu {
    Categories(Vec<Link>),
    Unavailable,
}

impl Menu {
    pub const UNAVAILABLE: &'static str = "Unable to load categories";

    pub fn links(&self) -> &[Link] {
        match self {
            Self::Categories(links) => links,
            Self::Unavailable => &[],
        }
    }
}

/// A labelled navigation intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub route: Route,
}

impl Link {
    pub fn new(label: impl Into<String>, route: Route) -> Self {
        Self {
            label: label.into(),
            route,
        }
    }

    /// The fragment this link sets, e.g. `#category/Side%20Dish`.
    pub fn fragment(&self) -> String {
        self.route.to_fragment()
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.fragment())
    }
}
