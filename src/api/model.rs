//! Typed records returned by the recipe API.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// Number of ingredient/measure slots on a meal record.
pub const INGREDIENT_SLOTS: usize = 20;

/// A meal category from `categories.php`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    #[serde(rename = "idCategory", default)]
    pub id: Option<String>,
    #[serde(rename = "strCategory")]
    pub name: String,
    #[serde(rename = "strCategoryThumb", default)]
    pub thumb: Option<String>,
    #[serde(rename = "strCategoryDescription", default)]
    pub description: Option<String>,
}

/// A meal as listed by `filter.php` or `search.php`.
///
/// The filter endpoint only returns id, name and thumbnail; search results also
/// carry area and category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MealSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal", default)]
    pub name: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    pub thumb: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
}

/// One filled ingredient slot of a meal, text as the API sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: String,
    /// Blank when the slot has no measure.
    pub measure: String,
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.measure.trim().is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{} — {}", self.name, self.measure)
        }
    }
}

/// A full meal record from `lookup.php`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawMeal")]
pub struct Meal {
    pub id: String,
    pub name: Option<String>,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: Option<String>,
    pub thumb: Option<String>,
    pub youtube: Option<String>,
    pub ingredients: Vec<Ingredient>,
}

// Wire shape: fixed fields plus twenty numbered `strIngredientN`/`strMeasureN` pairs.
#[derive(Deserialize)]
struct RawMeal {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal", default)]
    name: Option<String>,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
    #[serde(rename = "strArea", default)]
    area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    thumb: Option<String>,
    #[serde(rename = "strYoutube", default)]
    youtube: Option<String>,
    #[serde(flatten)]
    slots: HashMap<String, Value>,
}

impl From<RawMeal> for Meal {
    fn from(raw: RawMeal) -> Self {
        let slot = |key: String| {
            raw.slots
                .get(&key)
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string()
        };

        // Whitespace-only names count as empty slots.
        let ingredients = (1..=INGREDIENT_SLOTS)
            .filter_map(|i| {
                let name = slot(format!("strIngredient{i}"));
                if name.trim().is_empty() {
                    return None;
                }
                Some(Ingredient {
                    name,
                    measure: slot(format!("strMeasure{i}")),
                })
            })
            .collect();

        Self {
            id: raw.id,
            name: raw.name,
            category: raw.category,
            area: raw.area,
            instructions: raw.instructions,
            thumb: raw.thumb,
            youtube: raw.youtube.filter(|url| !url.trim().is_empty()),
            ingredients,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_tolerates_missing_optional_fields() {
        let cat: Category = serde_json::from_value(json!({"strCategory": "Seafood"})).unwrap();
        assert_eq!(cat.name, "Seafood");
        assert_eq!(cat.thumb, None);
        assert_eq!(cat.description, None);
    }

    #[test]
    fn meal_keeps_only_filled_slots() {
        let meal: Meal = serde_json::from_value(json!({
            "idMeal": "52772",
            "strIngredient1": "chicken",
            "strMeasure1": "1 kg",
            "strIngredient2": "",
            "strMeasure2": "2 tbsp",
            "strIngredient3": null,
            "strIngredient4": "   ",
            "...": "..."
        }))
        .unwrap();

        assert_eq!(meal.id, "52772");
        assert_eq!(
            meal.ingredients,
            vec![Ingredient {
                name: "chicken".to_string(),
                measure: "1 kg".to_string(),
            }]
        );
        assert_eq!(meal.ingredients[0].to_string(), "chicken — 1 kg");
    }

    #[test]
    fn ingredient_without_measure_displays_name_only() {
        let meal: Meal = serde_json::from_value(json!({
            "idMeal": "1",
            "strIngredient1": "salt",
            "strMeasure1": null,
            "strIngredient20": "pepper",
            "strMeasure20": " pinch "
        }))
        .unwrap();
        let shown: Vec<String> = meal.ingredients.iter().map(ToString::to_string).collect();
        assert_eq!(shown, vec!["salt", "pepper —  pinch "]);
    }

    #[test]
    fn ingredient_text_is_kept_as_sent() {
        let meal: Meal = serde_json::from_value(json!({
            "idMeal": "1",
            "strIngredient1": " Olive Oil ",
            "strMeasure1": "  ",
            "strIngredient2": "\t",
            "strMeasure2": "1 tbsp"
        }))
        .unwrap();
        assert_eq!(meal.ingredients.len(), 1);
        assert_eq!(meal.ingredients[0].name, " Olive Oil ");
        assert_eq!(meal.ingredients[0].to_string(), " Olive Oil ");
    }

    #[test]
    fn slots_beyond_twenty_are_ignored() {
        let meal: Meal = serde_json::from_value(json!({
            "idMeal": "1",
            "strIngredient21": "extra"
        }))
        .unwrap();
        assert!(meal.ingredients.is_empty());
    }

    #[test]
    fn blank_youtube_link_is_dropped() {
        let meal: Meal =
            serde_json::from_value(json!({"idMeal": "1", "strYoutube": ""})).unwrap();
        assert_eq!(meal.youtube, None);
    }

    #[test]
    fn meal_requires_an_id() {
        assert!(serde_json::from_value::<Meal>(json!({"strMeal": "Soup"})).is_err());
    }
}
