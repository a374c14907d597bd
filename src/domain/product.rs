use serde::Serialize;

/// Represents a product in the catalog.
///
/// # Actor Framework
/// This struct implements the [`Entity`](crate::actor_framework::Entity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::actor_framework::ResourceActor).
/// The `id` is assigned by the actor and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
}

/// Payload for creating a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
}

/// Payload for a partial update. Absent fields are left as they are.
///
/// There is no `id` field, so a patch can never re-key a product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

impl Product {
    /// Checks the field constraints every stored product must satisfy.
    pub fn validate(&self) -> Result<(), String> {
        let text_fields = [
            ("name", &self.name),
            ("description", &self.description),
            ("category", &self.category),
        ];
        for (field, value) in text_fields {
            if value.is_empty() {
                return Err(format!("{field} must not be empty"));
            }
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("price must be a non-negative number, got {}", self.price));
        }
        Ok(())
    }
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
    }
}
