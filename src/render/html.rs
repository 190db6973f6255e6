//! HTML renderer using the web front end's card and grid class names.

use std::fmt::Write;

use super::Renderer;
use crate::view::{CategoryCard, MealCard, MealDetail, MealList, Menu, Screen, SearchResults, View, ViewState};

/// Renders screens as HTML fragments for the `#app` element.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

/// Escape text for use in element content and double-quoted attributes.
///
/// # Examples
///
/// ```
/// use mealfinder::render::html::escape;
///
/// assert_eq!(escape(r#"<b>"Fish" & chips</b>"#), "&lt;b&gt;&quot;Fish&quot; &amp; chips&lt;/b&gt;");
/// ```
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn message(out: &mut String, text: &str) {
    let _ = write!(out, r#"<p class="muted">{}</p>"#, escape(text));
}

fn thumb(out: &mut String, src: Option<&str>, alt: &str) {
    if let Some(src) = src {
        let _ = write!(out, r#"<img src="{}" alt="{}">"#, escape(src), escape(alt));
    }
}

fn meal_cards(out: &mut String, cards: &[MealCard]) {
    for card in cards {
        let _ = write!(
            out,
            r#"<a class="card meal-card" href="{}">"#,
            escape(&card.route().to_fragment())
        );
        thumb(out, card.thumb.as_deref(), &card.name);
        let _ = write!(
            out,
            r#"<div class="card-body"><p class="title">{}</p><p class="meta">{}</p></div></a>"#,
            escape(&card.name),
            escape(&card.meta())
        );
    }
}

fn meal_list(out: &mut String, meals: &MealList) {
    out.push_str(r#"<div class="cards-grid meals-grid">"#);
    match meals {
        MealList::Meals(cards) => meal_cards(out, cards),
        MealList::Empty { message: text } => message(out, text),
    }
    out.push_str("</div>");
}

fn category_grid(out: &mut String, cards: &[CategoryCard]) {
    out.push_str(r#"<div class="cards-grid categories-grid">"#);
    for card in cards {
        let _ = write!(
            out,
            r#"<a class="card category-card" href="{}">"#,
            escape(&card.route().to_fragment())
        );
        thumb(out, card.thumb.as_deref(), &card.name);
        let _ = write!(
            out,
            r#"<div class="card-body"><p class="title">{}</p><p class="meta">{}...</p></div></a>"#,
            escape(&card.name),
            escape(&card.blurb)
        );
    }
    out.push_str("</div>");
}

fn meal_detail(out: &mut String, meal: &MealDetail) {
    out.push_str(r#"<div class="card"><div class="meal-detail"><div>"#);
    thumb(out, meal.thumb.as_deref(), &meal.name);
    let _ = write!(
        out,
        r#"</div><div><h2>{}</h2><p class="muted"><strong>Category:</strong> {} &nbsp;•&nbsp; <strong>Area:</strong> {}</p>"#,
        escape(&meal.name),
        escape(&meal.category),
        escape(&meal.area)
    );
    out.push_str(r#"<h4>Ingredients</h4><div class="ingredient-list">"#);
    for ingredient in &meal.ingredients {
        let _ = write!(
            out,
            r#"<div class="ingredient">{}</div>"#,
            escape(&ingredient.to_string())
        );
    }
    let _ = write!(
        out,
        r#"</div><h4>Instructions</h4><p class="instructions">{}</p>"#,
        escape(&meal.instructions)
    );
    if let Some(url) = &meal.youtube {
        let _ = write!(
            out,
            r#"<p><a href="{}" target="_blank" rel="noopener">Watch on YouTube</a></p>"#,
            escape(url)
        );
    }
    out.push_str("</div></div></div>");
}

impl HtmlRenderer {
    fn view(out: &mut String, view: &View) {
        if let Some(back) = view.back_link() {
            let _ = write!(
                out,
                r#"<a class="back-link" href="{}">{}</a>"#,
                escape(&back.fragment()),
                escape(&back.label)
            );
        }
        match view {
            View::Home(home) => {
                out.push_str(r#"<section class="hero"><h2>Find delicious recipes — fast</h2><p>Search by name or pick a category from the navbar.</p></section>"#);
                out.push_str(r#"<section><h3 class="section-title">Search results</h3>"#);
                meal_list(out, &home.sample);
                out.push_str(r#"</section><section><h3 class="section-title">Explore categories</h3>"#);
                category_grid(out, &home.categories);
                out.push_str("</section>");
            }
            View::Categories { categories } => {
                out.push_str(r#"<h3 class="section-title">Categories</h3>"#);
                category_grid(out, categories);
            }
            View::Category { name, meals } => {
                let _ = write!(out, r#"<h3 class="section-title">Category: {}</h3>"#, escape(name));
                meal_list(out, meals);
            }
            View::Meal(meal) => meal_detail(out, meal),
        }
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, screen: &Screen) -> String {
        let mut out = String::new();
        match &screen.state {
            ViewState::Blank => {}
            ViewState::Loading { message: text } => {
                let _ = write!(out, r#"<div class="panel"><p>{}</p></div>"#, escape(text));
            }
            ViewState::Error { message: text } => {
                let _ = write!(
                    out,
                    r#"<div class="panel"><h3>Error</h3><p class="muted">{}</p></div>"#,
                    escape(text)
                );
            }
            ViewState::Ready(view) => Self::view(&mut out, view),
        }
        out
    }

    fn render_search(&self, results: &SearchResults) -> String {
        let mut out = String::new();
        match results {
            SearchResults::Found { meals, .. } => {
                out.push_str(r#"<div class="cards-grid meals-grid">"#);
                meal_cards(&mut out, meals);
                out.push_str("</div>");
            }
            _ => {
                if let Some(text) = results.message() {
                    message(&mut out, &text);
                }
            }
        }
        out
    }

    fn render_menu(&self, menu: &Menu) -> String {
        let mut out = String::new();
        match menu {
            Menu::Categories(links) => {
                for link in links {
                    let _ = write!(
                        out,
                        r#"<a class="drop-item" role="menuitem" href="{}">{}</a>"#,
                        escape(&link.fragment()),
                        escape(&link.label)
                    );
                }
            }
            Menu::Unavailable => {
                let _ = write!(out, r#"<div class="muted">{}</div>"#, Menu::UNAVAILABLE);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{HomePage, Link};
    use crate::router::Route;

    fn ready(view: View) -> Screen {
        Screen {
            navigation: 1,
            title: String::new(),
            state: ViewState::Ready(view),
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn category_card_links_to_encoded_fragment() {
        let out = HtmlRenderer.render(&ready(View::Categories {
            categories: vec![CategoryCard {
                name: "Side Dish".into(),
                thumb: Some("https://img/side.png".into()),
                blurb: "Small plates".into(),
            }],
        }));
        assert!(out.contains(r##"href="#category/Side%20Dish""##));
        assert!(out.contains(r#"<p class="title">Side Dish</p>"#));
        assert!(out.starts_with(r##"<a class="back-link" href="#home">"##));
    }

    #[test]
    fn text_is_escaped_in_cards() {
        let out = HtmlRenderer.render(&ready(View::Home(HomePage {
            sample: MealList::Meals(vec![MealCard {
                id: "1".into(),
                name: "<script>".into(),
                thumb: None,
                area: None,
                category: None,
            }]),
            categories: Vec::new(),
        })));
        assert!(out.contains("&lt;script&gt;"));
        assert!(!out.contains("<script>"));
    }

    #[test]
    fn error_panel() {
        let screen = Screen {
            navigation: 1,
            title: String::new(),
            state: ViewState::error("Failed to load meal details."),
        };
        assert_eq!(
            HtmlRenderer.render(&screen),
            r#"<div class="panel"><h3>Error</h3><p class="muted">Failed to load meal details.</p></div>"#
        );
    }

    #[test]
    fn empty_search_renders_message() {
        let out = HtmlRenderer.render_search(&SearchResults::Empty { query: "<x>".into() });
        assert_eq!(out, r#"<p class="muted">No meals found for &quot;&lt;x&gt;&quot;.</p>"#);
    }

    #[test]
    fn menu_items() {
        let menu = Menu::Categories(vec![Link::new("Beef", Route::Category("Beef".into()))]);
        assert_eq!(
            HtmlRenderer.render_menu(&menu),
            r##"<a class="drop-item" role="menuitem" href="#category/Beef">Beef</a>"##
        );
    }
}
