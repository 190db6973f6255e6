//! Plain-text renderer for the terminal.
//!
//! Links are numbered in the order [`ViewState::links`] returns them, so the
//! CLI can map a typed number back to a fragment.

use std::fmt::Write;

use super::Renderer;
use crate::view::{
    CategoryCard, Link, MealCard, MealDetail, MealList, Menu, Screen, SearchResults, View,
    ViewState,
};

/// Renders screens as plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

// Running link counter shared by every section of one page.
struct Page {
    out: String,
    next: usize,
}

impl Page {
    fn new() -> Self {
        Self {
            out: String::new(),
            next: 1,
        }
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn link(&mut self, label: &str, detail: &str) {
        let n = self.next;
        self.next += 1;
        if detail.is_empty() {
            let _ = writeln!(self.out, "  [{n}] {label}");
        } else {
            let _ = writeln!(self.out, "  [{n}] {label} — {detail}");
        }
    }

    // Side-panel entries are not numbered; they show the fragment to type instead.
    fn entry(&mut self, label: &str, detail: &str, link: &Link) {
        if detail.is_empty() {
            let _ = writeln!(self.out, "  {label}  {}", link.fragment());
        } else {
            let _ = writeln!(self.out, "  {label} — {detail}  {}", link.fragment());
        }
    }

    fn back(&mut self, link: &Link) {
        let n = self.next;
        self.next += 1;
        let _ = writeln!(self.out, "[{n}] {}", link.label);
        self.blank();
    }

    fn meals(&mut self, meals: &MealList) {
        match meals {
            MealList::Meals(cards) => {
                for card in cards {
                    self.meal_card(card);
                }
            }
            MealList::Empty { message } => self.line(&format!("  {message}")),
        }
    }

    fn meal_card(&mut self, card: &MealCard) {
        self.link(&card.name, &card.meta());
    }

    fn categories(&mut self, cards: &[CategoryCard]) {
        for card in cards {
            let blurb = if card.blurb.is_empty() {
                String::new()
            } else {
                format!("{}...", card.blurb)
            };
            self.link(&card.name, &blurb);
        }
    }

    fn meal_detail(&mut self, meal: &MealDetail) {
        self.line(&meal.name);
        self.line(&format!("Category: {}  •  Area: {}", meal.category, meal.area));
        self.blank();
        self.line("Ingredients");
        for ingredient in &meal.ingredients {
            self.line(&format!("  - {ingredient}"));
        }
        self.blank();
        self.line("Instructions");
        self.line(meal.instructions.trim_end());
        if let Some(url) = &meal.youtube {
            self.blank();
            self.line(&format!("Watch on YouTube: {url}"));
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

impl TextRenderer {
    fn view(page: &mut Page, view: &View) {
        if let Some(back) = view.back_link() {
            page.back(&back);
        }
        match view {
            View::Home(home) => {
                page.line("Find delicious recipes — fast");
                page.line("Search by name with `:search <query>` or pick a category below.");
                page.blank();
                page.line("Search results");
                page.meals(&home.sample);
                page.blank();
                page.line("Explore categories");
                page.categories(&home.categories);
            }
            View::Categories { categories } => {
                page.line("Categories");
                page.categories(categories);
            }
            View::Category { name, meals } => {
                page.line(&format!("Category: {name}"));
                page.meals(meals);
            }
            View::Meal(meal) => page.meal_detail(meal),
        }
    }
}

impl Renderer for TextRenderer {
    fn render(&self, screen: &Screen) -> String {
        let mut page = Page::new();
        if !screen.title.is_empty() {
            page.line(&format!("== {} ==", screen.title));
            page.blank();
        }
        match &screen.state {
            ViewState::Blank => {}
            ViewState::Loading { message } => page.line(message),
            ViewState::Error { message } => {
                page.line("Error");
                page.line(message);
            }
            ViewState::Ready(view) => Self::view(&mut page, view),
        }
        page.finish()
    }

    fn render_search(&self, results: &SearchResults) -> String {
        let mut page = Page::new();
        page.line(&format!("Search results for \"{}\"", results.query()));
        match results {
            SearchResults::Found { meals, .. } => {
                for card in meals {
                    page.entry(&card.name, &card.meta(), &card.link());
                }
            }
            _ => {
                if let Some(message) = results.message() {
                    page.line(&format!("  {message}"));
                }
            }
        }
        page.finish()
    }

    fn render_menu(&self, menu: &Menu) -> String {
        let mut page = Page::new();
        page.line("Categories");
        match menu {
            Menu::Categories(links) => {
                for link in links {
                    page.entry(&link.label, "", link);
                }
            }
            Menu::Unavailable => page.line(&format!("  {}", Menu::UNAVAILABLE)),
        }
        page.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Ingredient;
    use crate::view::HomePage;

    fn screen(title: &str, state: ViewState) -> Screen {
        Screen {
            navigation: 1,
            title: title.to_string(),
            state,
        }
    }

    fn meal_card(id: &str, name: &str) -> MealCard {
        MealCard {
            id: id.into(),
            name: name.into(),
            thumb: None,
            area: Some("British".into()),
            category: None,
        }
    }

    #[test]
    fn loading_and_error() {
        let loading = TextRenderer.render(&screen("T", ViewState::loading("Loading...")));
        assert_eq!(loading, "== T ==\n\nLoading...\n");

        let error = TextRenderer.render(&screen("T", ViewState::error("Meal not found")));
        assert!(error.ends_with("Error\nMeal not found\n"));
    }

    #[test]
    fn home_numbers_links_in_link_order() {
        let state = ViewState::Ready(View::Home(HomePage {
            sample: MealList::Meals(vec![meal_card("1", "Stew")]),
            categories: vec![CategoryCard {
                name: "Seafood".into(),
                thumb: None,
                blurb: "Fish".into(),
            }],
        }));
        let out = TextRenderer.render(&screen("Home — Meal Finder", state.clone()));

        assert!(out.contains("  [1] Stew — British\n"));
        assert!(out.contains("  [2] Seafood — Fish...\n"));
        let links = state.links();
        assert_eq!(links[0].fragment(), "#meal/1");
        assert_eq!(links[1].fragment(), "#category/Seafood");
    }

    #[test]
    fn category_page_starts_with_back_link() {
        let state = ViewState::Ready(View::Category {
            name: "Goat".into(),
            meals: MealList::Empty {
                message: "No meals found for this category.".into(),
            },
        });
        let out = TextRenderer.render(&screen("", state));
        assert!(out.starts_with("[1] ← Back to Categories\n"));
        assert!(out.contains("  No meals found for this category.\n"));
    }

    #[test]
    fn meal_detail_lists_ingredients() {
        let state = ViewState::Ready(View::Meal(MealDetail {
            id: "52772".into(),
            name: "Teriyaki Chicken Casserole".into(),
            category: "Chicken".into(),
            area: "Japanese".into(),
            thumb: None,
            instructions: "Preheat oven.\n".into(),
            youtube: Some("https://youtube.test/v".into()),
            ingredients: vec![Ingredient {
                name: "chicken".into(),
                measure: "1 kg".into(),
            }],
        }));
        let out = TextRenderer.render(&screen("", state));
        assert!(out.contains("  - chicken — 1 kg\n"));
        assert!(out.contains("Category: Chicken  •  Area: Japanese\n"));
        assert!(out.contains("Watch on YouTube: https://youtube.test/v\n"));
    }

    #[test]
    fn empty_search_message() {
        let out = TextRenderer.render_search(&SearchResults::Empty { query: "zzz".into() });
        assert!(out.contains("No meals found for \"zzz\"."));
    }

    #[test]
    fn search_entries_show_fragments() {
        let results = SearchResults::Found {
            query: "stew".into(),
            meals: vec![meal_card("7", "Stew")],
        };
        let out = TextRenderer.render_search(&results);
        assert!(out.contains("  Stew — British  #meal/7\n"));
        assert!(!out.contains('['));
    }

    #[test]
    fn unavailable_menu() {
        let out = TextRenderer.render_menu(&Menu::Unavailable);
        assert!(out.contains("Unable to load categories"));
    }
}
