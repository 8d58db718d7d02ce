//! Product records and the five-field validation predicate.
//!
//! Untrusted JSON never reaches a handler directly. The validation stage runs
//! [`validate`] against the decoded body and, on success, hands the handler a
//! [`ProductInput`]: trimmed strings, a positive price, a lowercase category
//! and a resolved `inStock` flag.

use serde::Serialize;
use serde_json::{Map, Value};

/// A stored, sellable item.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

impl Product {
    pub fn new(id: String, input: ProductInput) -> Self {
        let ProductInput { name, description, price, category, in_stock } = input;
        Self { id, name, description, price, category, in_stock }
    }

    /// Rewrites all five fields in place. The id is untouched.
    pub fn apply(&mut self, input: ProductInput) {
        let ProductInput { name, description, price, category, in_stock } = input;
        self.name = name;
        self.description = description;
        self.price = price;
        self.category = category;
        self.in_stock = in_stock;
    }
}

/// A body that passed [`validate`].
#[derive(Clone, Debug, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

/// Which write the body is for. A replace must state `inStock` explicitly;
/// a create defaults it to `true`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputMode {
    Create,
    Replace,
}

/// Checks every field and reports every violation, in field order.
///
/// A body that is absent or not a JSON object fails each required field.
pub fn validate(body: Option<&Value>, mode: InputMode) -> Result<ProductInput, Vec<String>> {
    let fields = body.and_then(Value::as_object);
    let mut violations = Vec::new();

    let name = text(field(fields, "name"));
    if name.is_none() {
        violations.push("Name is required and must be a non-empty string".to_owned());
    }

    let description = text(field(fields, "description"));
    if description.is_none() {
        violations.push("Description is required and must be a non-empty string".to_owned());
    }

    let price = field(fields, "price")
        .filter(|v| v.is_number())
        .and_then(Value::as_f64)
        .filter(|p| *p > 0.0);
    if price.is_none() {
        violations.push("Price is required and must be a positive number".to_owned());
    }

    let category = text(field(fields, "category")).map(|c| c.to_lowercase());
    if category.is_none() {
        violations.push("Category is required and must be a non-empty string".to_owned());
    }

    let in_stock = match (field(fields, "inStock"), mode) {
        (Some(Value::Bool(b)), _) => Some(*b),
        (None, InputMode::Create) => Some(true),
        (Some(_), InputMode::Create) => {
            violations.push("inStock must be a boolean".to_owned());
            None
        }
        (_, InputMode::Replace) => {
            violations.push("inStock is required and must be a boolean".to_owned());
            None
        }
    };

    match (name, description, price, category, in_stock) {
        (Some(name), Some(description), Some(price), Some(category), Some(in_stock)) => {
            Ok(ProductInput { name, description, price, category, in_stock })
        }
        _ => Err(violations),
    }
}

fn field<'a>(fields: Option<&'a Map<String, Value>>, key: &str) -> Option<&'a Value> {
    fields.and_then(|m| m.get(key))
}

fn text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
