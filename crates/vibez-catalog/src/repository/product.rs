//! # Product Repository
//!
//! Catalog operations for products.
//!
//! ## Key Operations
//! - Lookup by id and by vendor
//! - Vendor submissions and edits
//! - Admin moderation
//! - Vendor discounts
//!
//! ## Moderation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Vendor dashboard                 Admin dashboard                       │
//! │  ────────────────                 ───────────────                       │
//! │  create() ──► id = max + 1        set_status(id, Approved) ──► visible │
//! │               status = Pending    set_status(id, Rejected) ──► hidden  │
//! │                                                                         │
//! │  update() keeps the status; a rejected product stays rejected until    │
//! │  an admin moves it.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Deserialize;
use tracing::{debug, info};
use vibez_core::validation::{validate_price, validate_product_name};
use vibez_core::{
    Category, Discount, Gender, Money, Product, ProductId, ProductStatus, DEFAULT_SIZE,
};

use crate::error::{CatalogError, CatalogResult};

/// A product submitted by a vendor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub category: Category,
    #[serde(default)]
    pub gender: Gender,
    pub vendor_id: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Fields a vendor may change on an existing product. `None` leaves the
/// field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub category: Option<Category>,
    pub gender: Option<Gender>,
    pub sizes: Option<Vec<String>>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Repository for products.
///
/// ## Usage
/// ```rust
/// use vibez_catalog::Catalog;
///
/// let catalog = Catalog::seeded();
/// let tee = catalog.products().get_by_id(1).unwrap();
/// assert_eq!(tee.name, "Classic Cotton T-Shirt");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProductRepository {
    products: Vec<Product>,
}

impl ProductRepository {
    /// Creates a repository over already-loaded products.
    pub fn new(products: Vec<Product>) -> Self {
        ProductRepository { products }
    }

    /// Every product in catalog order, whatever its status.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Products with `status`, or all products for `None`.
    pub fn list(&self, status: Option<ProductStatus>) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| status.map_or(true, |s| p.status == s))
            .collect()
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Some(Product)` - Product found
    /// * `None` - Product not found
    pub fn get_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Gets a product by id or fails with NotFound.
    pub fn require(&self, id: ProductId) -> CatalogResult<&Product> {
        self.get_by_id(id)
            .ok_or_else(|| CatalogError::not_found("Product", id))
    }

    /// Products listed by one vendor, any status.
    pub fn by_vendor(&self, vendor_id: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.vendor_id == vendor_id)
            .collect()
    }

    /// Next free id (highest id + 1).
    fn next_id(&self) -> CatalogResult<ProductId> {
        match self.products.iter().map(|p| p.id).max() {
            None => Ok(1),
            Some(max) => max
                .checked_add(1)
                .ok_or(CatalogError::IdsExhausted { entity: "product" }),
        }
    }

    /// Adds a vendor submission. New products always start as pending.
    pub fn create(&mut self, new: NewProduct) -> CatalogResult<&Product> {
        validate_product_name(&new.name)?;
        validate_price(new.price)?;

        let id = self.next_id()?;
        let product = Product {
            id,
            name: new.name.trim().to_string(),
            price: new.price,
            category: new.category,
            gender: new.gender,
            vendor_id: new.vendor_id,
            status: ProductStatus::Pending,
            sizes: normalize_sizes(new.sizes),
            rating: None,
            description: new.description,
            image: new.image,
            badge: None,
            trending: false,
            discount: None,
        };

        info!(product_id = id, vendor_id = %product.vendor_id, "Product submitted for review");
        self.products.push(product);
        self.require(id)
    }

    /// Applies a vendor edit.
    pub fn update(&mut self, id: ProductId, update: ProductUpdate) -> CatalogResult<&Product> {
        if let Some(name) = &update.name {
            validate_product_name(name)?;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
        }

        let product = self.require_mut(id)?;

        if let Some(price) = update.price {
            if let Some(discount) = &product.discount {
                discount.validate(price)?;
            }
            product.price = price;
        }
        if let Some(name) = update.name {
            product.name = name.trim().to_string();
        }
        if let Some(category) = update.category {
            product.category = category;
        }
        if let Some(gender) = update.gender {
            product.gender = gender;
        }
        if let Some(sizes) = update.sizes {
            product.sizes = normalize_sizes(sizes);
        }
        if update.description.is_some() {
            product.description = update.description;
        }
        if update.image.is_some() {
            product.image = update.image;
        }

        debug!(product_id = id, "Product updated");
        Ok(&*product)
    }

    /// Removes a product from the catalog.
    pub fn delete(&mut self, id: ProductId) -> CatalogResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CatalogError::not_found("Product", id))?;

        info!(product_id = id, "Product deleted");
        Ok(self.products.remove(index))
    }

    /// Admin moderation: sets the product's status.
    pub fn set_status(&mut self, id: ProductId, status: ProductStatus) -> CatalogResult<&Product> {
        let product = self.require_mut(id)?;
        let previous = product.status;
        product.status = status;

        info!(product_id = id, from = %previous, to = %status, "Product status changed");
        Ok(&*product)
    }

    /// Puts a vendor discount on a product, replacing any existing one.
    pub fn set_discount(&mut self, id: ProductId, discount: Discount) -> CatalogResult<&Product> {
        let product = self.require_mut(id)?;
        discount.validate(product.price)?;
        product.discount = Some(discount);

        debug!(product_id = id, discount = %discount.label(), "Discount set");
        Ok(&*product)
    }

    /// Removes a product's discount. No-op if it has none.
    pub fn clear_discount(&mut self, id: ProductId) -> CatalogResult<&Product> {
        let product = self.require_mut(id)?;
        product.discount = None;
        Ok(&*product)
    }

    fn require_mut(&mut self, id: ProductId) -> CatalogResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::not_found("Product", id))
    }
}

fn normalize_sizes(sizes: Vec<String>) -> Vec<String> {
    let sizes: Vec<String> = sizes
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if sizes.is_empty() {
        vec![DEFAULT_SIZE.to_string()]
    } else {
        sizes
    }
}
