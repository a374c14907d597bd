use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch};

impl Entity for Product {
    type Id = String;
    type CreatePayload = ProductCreate;
    type Patch = ProductPatch;

    fn id(&self) -> &String { &self.id }

    /// Creates a new Product from creation parameters.
    ///
    /// # Arguments
    /// * `id` - Unique identifier for the product
    /// * `payload` - Name, description, price and category
    ///
    /// # Errors
    /// Rejects a payload that breaks a field constraint; nothing is stored.
    fn from_create(id: String, payload: ProductCreate) -> Result<Self, String> {
        let product = Self {
            id,
            name: payload.name,
            description: payload.description,
            price: payload.price,
            category: payload.category,
        };
        product.validate()?;
        Ok(product)
    }

    /// Builds the updated product: each field present in `patch` replaces the
    /// current one, everything else (and always `id`) is carried over.
    fn on_update(&self, patch: ProductPatch) -> Result<Self, String> {
        let ProductPatch { name, description, price, category } = patch;
        let updated = Self {
            id: self.id.clone(),
            name: name.unwrap_or_else(|| self.name.clone()),
            description: description.unwrap_or_else(|| self.description.clone()),
            price: price.unwrap_or(self.price),
            category: category.unwrap_or_else(|| self.category.clone()),
        };
        updated.validate()?;
        Ok(updated)
    }

    /// Case-insensitive substring match on name or category.
    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.category.to_lowercase().contains(&query)
    }
}
