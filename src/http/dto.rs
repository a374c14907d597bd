//! Request bodies and their validation rules.
//!
//! A body is read as a JSON object. Each known key is checked for presence,
//! `null` and JSON type before the field rules run, so every problem is
//! reported under the field it belongs to. Unknown keys, `id` included, are
//! dropped.

use std::borrow::Cow;

use axum::body::Bytes;
use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::{ProductCreate, ProductPatch};

use super::error::ApiError;

#[derive(Debug, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "price must be a non-negative number"))]
    pub price: f64,
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: String,
}

impl CreateProductRequest {
    pub fn from_body(body: &Bytes) -> Result<Self, ApiError> {
        let mut fields = BodyFields::parse(body)?;
        let request = Self {
            name: fields.required_text("name"),
            description: fields.required_text("description"),
            price: fields.required_number("price"),
            category: fields.required_text("category"),
        };
        fields.finish(request.validate())?;
        Ok(request)
    }
}

impl From<CreateProductRequest> for ProductCreate {
    fn from(request: CreateProductRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            price: request.price,
            category: request.category,
        }
    }
}

#[derive(Debug, Default, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "price must be a non-negative number"))]
    pub price: Option<f64>,
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: Option<String>,
}

impl UpdateProductRequest {
    pub fn from_body(body: &Bytes) -> Result<Self, ApiError> {
        let mut fields = BodyFields::parse(body)?;
        let request = Self {
            name: fields.text("name"),
            description: fields.text("description"),
            price: fields.number("price"),
            category: fields.text("category"),
        };
        fields.finish(request.validate())?;
        Ok(request)
    }
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(request: UpdateProductRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            price: request.price,
            category: request.category,
        }
    }
}

/// The keys of a JSON object body, taken out one field at a time.
///
/// Shape problems (missing, `null`, wrong type) are collected as they are
/// found and reported together with the field rules in [`BodyFields::finish`].
struct BodyFields {
    map: Map<String, Value>,
    errors: ValidationErrors,
}

impl BodyFields {
    /// A body with no content reads as `{}`.
    fn parse(body: &Bytes) -> Result<Self, ApiError> {
        let map = if body.iter().all(u8::is_ascii_whitespace) {
            Map::new()
        } else {
            match serde_json::from_slice::<Value>(body) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    return Err(ApiError::BadRequest(
                        "Request body must be a JSON object".to_string(),
                    ))
                }
                Err(e) => return Err(ApiError::BadRequest(format!("Invalid JSON body: {e}"))),
            }
        };
        Ok(Self { map, errors: ValidationErrors::new() })
    }

    fn text(&mut self, field: &'static str) -> Option<String> {
        match self.map.remove(field)? {
            Value::String(s) => Some(s),
            other => {
                self.reject_shape(field, &other, "a string");
                None
            }
        }
    }

    fn number(&mut self, field: &'static str) -> Option<f64> {
        match self.map.remove(field)? {
            Value::Number(n) => n.as_f64(),
            other => {
                self.reject_shape(field, &other, "a number");
                None
            }
        }
    }

    fn required_text(&mut self, field: &'static str) -> String {
        self.require(field);
        self.text(field).unwrap_or_default()
    }

    fn required_number(&mut self, field: &'static str) -> f64 {
        self.require(field);
        self.number(field).unwrap_or_default()
    }

    fn require(&mut self, field: &'static str) {
        if !self.map.contains_key(field) {
            self.reject(field, "required", format!("{field} is required"));
        }
    }

    fn reject_shape(&mut self, field: &'static str, value: &Value, expected: &str) {
        if value.is_null() {
            self.reject(field, "null", format!("{field} must not be null"));
        } else {
            self.reject(field, "type", format!("{field} must be {expected}"));
        }
    }

    fn reject(&mut self, field: &'static str, code: &'static str, message: String) {
        self.errors
            .add(field, ValidationError::new(code).with_message(Cow::Owned(message)));
    }

    /// Combines shape errors with the field rules. A shape error replaces any
    /// rule error for the same field.
    fn finish(self, rules: Result<(), ValidationErrors>) -> Result<(), ApiError> {
        let mut errors = self.errors;
        if let Err(rule_errors) = rules {
            for (field, kind) in rule_errors.into_errors() {
                errors.errors_mut().entry(field).or_insert(kind);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(errors))
        }
    }
}
