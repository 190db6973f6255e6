//! View handlers — one async function per page, plus search and the menu.
//!
//! Handlers never fail: every [`ApiError`] is logged and converted into the
//! message the user sees. Dependent fetches run in program order.

use tracing::{debug, warn};

use super::{CategoryCard, HomePage, Link, MealCard, MealDetail, MealList, Menu, SearchResults, View, ViewState};
use crate::api::{ApiError, MealDb};
use crate::context::Context;

const NO_MEALS: &str = "No meals found";

fn failed(err: &ApiError, message: &str) -> ViewState {
    warn!(error = %err, "{message}");
    ViewState::error(message)
}

/// Category grid plus the meals of the first category as a sample.
///
/// The sample is skipped when the navigation has been superseded by the time
/// the categories arrive; the result would be discarded anyway.
pub async fn home(ctx: &Context) -> ViewState {
    const FAILED: &str = "Unable to load home content.";
    let api = ctx.api();

    let categories = match api.categories().await {
        Ok(categories) => categories,
        Err(err) => return failed(&err, FAILED),
    };

    if !ctx.is_current() {
        debug!(token = ctx.token(), "home superseded before sample fetch");
        return ViewState::Blank;
    }

    let sample = match categories.first() {
        Some(first) => match api.filter_by_category(&first.name).await {
            Ok(meals) => MealList::from_meals(meals, NO_MEALS),
            Err(err) => return failed(&err, FAILED),
        },
        None => MealList::Empty {
            message: "No categories found.".to_string(),
        },
    };

    ViewState::Ready(View::Home(HomePage {
        sample,
        categories: categories.iter().map(CategoryCard::from).collect(),
    }))
}

pub async fn categories(api: &MealDb) -> ViewState {
    match api.categories().await {
        Ok(categories) => ViewState::Ready(View::Categories {
            categories: categories.iter().map(CategoryCard::from).collect(),
        }),
        Err(err) => failed(&err, "Unable to load categories."),
    }
}

pub async fn category(api: &MealDb, name: &str) -> ViewState {
    match api.filter_by_category(name).await {
        Ok(meals) => ViewState::Ready(View::Category {
            name: name.to_string(),
            meals: MealList::from_meals(meals, "No meals found for this category."),
        }),
        Err(err) => failed(&err, "Failed to load category meals."),
    }
}

pub async fn meal(api: &MealDb, id: &str) -> ViewState {
    match api.lookup(id).await {
        Ok(meal) => ViewState::Ready(View::Meal(MealDetail::from(meal))),
        Err(err) if err.is_not_found() => failed(&err, "Meal not found"),
        Err(err) => failed(&err, "Failed to load meal details."),
    }
}

/// Run a home-page search. Blank queries are ignored.
pub async fn search(api: &MealDb, query: &str) -> Option<SearchResults> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let results = match api.search(query).await {
        Ok(meals) if meals.is_empty() => SearchResults::Empty {
            query: query.to_string(),
        },
        Ok(meals) => SearchResults::Found {
            query: query.to_string(),
            meals: meals.into_iter().map(MealCard::from).collect(),
        },
        Err(err) => {
            warn!(error = %err, query, "search failed");
            SearchResults::Failed {
                query: query.to_string(),
            }
        }
    };
    Some(results)
}

/// Populate the category dropdown.
pub async fn menu(api: &MealDb) -> Menu {
    match api.categories().await {
        Ok(categories) => Menu::Categories(
            categories
                .iter()
                .map(|c| Link::new(c.name.clone(), CategoryCard::from(c).route()))
                .collect(),
        ),
        Err(err) => {
            warn!(error = %err, "{}", Menu::UNAVAILABLE);
            Menu::Unavailable
        }
    }
}
