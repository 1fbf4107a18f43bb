//! Request DTOs for the storefront API
//!
//! Defines the structure of outgoing HTTP request bodies.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::CartItem;

/// Minimum accepted password length
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Accepted full name length range, in characters
pub const NAME_LENGTH: std::ops::RangeInclusive<usize> = 2..=100;

/// Request body for `POST /register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

impl RegisterRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if !is_valid_email(&self.email) {
            return Some("Invalid email address".to_string());
        }
        if self.password.chars().count() < PASSWORD_MIN_LENGTH {
            return Some(format!(
                "Password must be at least {} characters",
                PASSWORD_MIN_LENGTH
            ));
        }
        if !NAME_LENGTH.contains(&self.full_name.trim().chars().count()) {
            return Some(format!(
                "Name must be between {} and {} characters",
                NAME_LENGTH.start(),
                NAME_LENGTH.end()
            ));
        }
        None
    }
}

/// Request body for `POST /login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /orders`: the cart lines as they stand
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest<'a> {
    pub items: &'a [CartItem],
}

/// Request body for `POST /cart` on the server-side cart mirror
#[derive(Debug, Clone, Serialize)]
pub struct AddToCartRequest {
    pub product_id: u64,
    pub quantity: u32,
}

/// Request body for `PATCH /cart/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct UpdateCartRequest {
    pub quantity: u32,
}

/// Request body for the admin product endpoints
///
/// `POST /admin/products` requires title, slug and price; `PUT` applies
/// whichever fields are present.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
}

impl ProductInput {
    /// Builds the input for a new product.
    pub fn new(title: impl Into<String>, price: Decimal) -> Self {
        let title = title.into();
        Self {
            slug: Some(slugify(&title)),
            title: Some(title),
            price: Some(price),
            ..Self::default()
        }
    }

    /// Validates the input for product creation
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate_for_create(&self) -> Option<String> {
        if self.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
            return Some("Title is required".to_string());
        }
        if self.slug.as_deref().map_or(true, str::is_empty) {
            return Some("Slug is required".to_string());
        }
        match self.price {
            None => Some("Price is required".to_string()),
            Some(price) if price.is_sign_negative() => {
                Some("Price cannot be negative".to_string())
            }
            Some(_) => None,
        }
    }
}

// == Validation Helpers ==
/// Checks the `local@domain.tld` shape: no whitespace, a single `@`, and a
/// dot inside the domain part.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Turns a title into a URL slug: lowercase, words joined by single dashes.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
        .collect::<String>()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
