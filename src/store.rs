//! The in-memory record store.
//!
//! [`Store`] is a cheap, cloneable handle. Every clone points at the same
//! insertion-ordered list. Locks are taken only inside these synchronous
//! methods and are never held across an `.await`, so a write is always
//! complete before the handler that made it yields.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::product::{Product, ProductInput};

#[derive(Clone, Debug, Default)]
pub struct Store {
    items: Arc<RwLock<Vec<Product>>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store preloaded with the sample catalogue.
    pub fn seeded() -> Self {
        Self::from_products(seed())
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self { items: Arc::new(RwLock::new(products)) }
    }

    /// An owned copy of the current sequence, in insertion order.
    pub fn snapshot(&self) -> Vec<Product> {
        self.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<Product> {
        self.read().iter().find(|p| p.id == id).cloned()
    }

    /// Appends a new record under a freshly generated id.
    pub fn insert(&self, input: ProductInput) -> Product {
        let mut items = self.write();
        let id = loop {
            let candidate = Uuid::new_v4().to_string();
            if !items.iter().any(|p| p.id == candidate) {
                break candidate;
            }
        };
        let product = Product::new(id, input);
        items.push(product.clone());
        product
    }

    /// Rewrites the record in place; `None` when the id is unknown.
    pub fn replace(&self, id: &str, input: ProductInput) -> Option<Product> {
        let mut items = self.write();
        let product = items.iter_mut().find(|p| p.id == id)?;
        product.apply(input);
        Some(product.clone())
    }

    /// Removes the record; `None` when the id is unknown.
    pub fn remove(&self, id: &str) -> Option<Product> {
        let mut items = self.write();
        let index = items.iter().position(|p| p.id == id)?;
        Some(items.remove(index))
    }

    // Poisoning is ignored: each mutation above is a single push, rewrite or removal.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Product>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Product>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn seed() -> Vec<Product> {
    let product = |id: &str, name: &str, description: &str, price: f64, category: &str, in_stock: bool| {
        Product {
            id: id.to_owned(),
            name: name.to_owned(),
            description: description.to_owned(),
            price,
            category: category.to_owned(),
            in_stock,
        }
    };
    vec![
        product("1", "Laptop", "High-performance laptop with 16GB RAM", 1200.0, "electronics", true),
        product("2", "Smartphone", "Latest model smartphone with 128GB storage", 800.0, "electronics", true),
        product("3", "Coffee Maker", "Programmable coffee maker with timer", 50.0, "appliances", false),
    ]
}
