//! Drink records and their database queries.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sqlx::SqlitePool;

/// One ingredient of a drink's recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name; only exposed in the long representation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub color: String,
    pub parts: i64,
}

impl Ingredient {
    /// Parse a request-supplied recipe. A bare object is accepted and
    /// wrapped into a one-element list; anything else must be a list.
    pub fn normalize(recipe: &Value) -> Result<Vec<Ingredient>, serde_json::Error> {
        let listed = match recipe {
            Value::Object(_) => Value::Array(vec![recipe.clone()]),
            other => other.clone(),
        };
        serde_json::from_value(listed)
    }
}

/// A drink row. The recipe is stored as JSON text.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Drink {
    pub id: i64,
    pub title: String,
    pub recipe: String,
}

impl Drink {
    pub fn ingredients(&self) -> Result<Vec<Ingredient>, serde_json::Error> {
        serde_json::from_str(&self.recipe)
    }

    /// Public representation: ingredient colors and proportions only.
    pub fn short(&self) -> Result<Value, serde_json::Error> {
        let recipe: Vec<Value> = self
            .ingredients()?
            .into_iter()
            .map(|ing| json!({ "color": ing.color, "parts": ing.parts }))
            .collect();
        Ok(json!({ "id": self.id, "title": self.title, "recipe": recipe }))
    }

    /// Detailed representation: full ingredient list.
    pub fn long(&self) -> Result<Value, serde_json::Error> {
        let recipe = self.ingredients()?;
        Ok(json!({ "id": self.id, "title": self.title, "recipe": recipe }))
    }
}

pub async fn list_drinks(pool: &SqlitePool) -> Result<Vec<Drink>, sqlx::Error> {
    sqlx::query_as::<_, Drink>("SELECT id, title, recipe FROM drinks ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn find_drink(pool: &SqlitePool, id: i64) -> Result<Option<Drink>, sqlx::Error> {
    sqlx::query_as::<_, Drink>("SELECT id, title, recipe FROM drinks WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_drink(
    pool: &SqlitePool,
    title: &str,
    recipe_json: &str,
) -> Result<Drink, sqlx::Error> {
    sqlx::query_as::<_, Drink>(
        "INSERT INTO drinks (title, recipe) VALUES (?, ?) RETURNING id, title, recipe",
    )
    .bind(title)
    .bind(recipe_json)
    .fetch_one(pool)
    .await
}

pub async fn update_drink(
    pool: &SqlitePool,
    id: i64,
    title: Option<&str>,
    recipe_json: Option<&str>,
) -> Result<Drink, sqlx::Error> {
    sqlx::query_as::<_, Drink>(
        "UPDATE drinks
         SET title = COALESCE(?, title), recipe = COALESCE(?, recipe)
         WHERE id = ?
         RETURNING id, title, recipe",
    )
    .bind(title)
    .bind(recipe_json)
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn delete_drink(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM drinks WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn water() -> Drink {
        Drink {
            id: 1,
            title: "Water".to_string(),
            recipe: r#"[{"title": "Water", "color": "blue", "parts": 1}]"#.to_string(),
        }
    }

    #[test]
    fn test_short_hides_ingredient_titles() {
        let value = water().short().unwrap();
        assert_eq!(value["title"], "Water");
        assert_eq!(value["recipe"][0]["color"], "blue");
        assert_eq!(value["recipe"][0]["parts"], 1);
        assert!(value["recipe"][0].get("title").is_none());
    }

    #[test]
    fn test_long_keeps_ingredient_titles() {
        let value = water().long().unwrap();
        assert_eq!(value["recipe"][0]["title"], "Water");
    }

    #[test]
    fn test_normalize_wraps_bare_object() {
        let recipe = json!({"color": "green", "parts": 2});
        let normalized = Ingredient::normalize(&recipe).unwrap();
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].color, "green");
        assert!(normalized[0].title.is_none());
    }

    #[test]
    fn test_normalize_rejects_non_recipe_values() {
        assert!(Ingredient::normalize(&json!("matcha")).is_err());
        assert!(Ingredient::normalize(&json!([{"parts": 1}])).is_err());
    }
}
