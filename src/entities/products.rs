//! The products collection

use crate::core::field::FieldDescriptor;
use crate::core::record::Record;
use crate::core::schema::CollectionSchema;

pub const NAME: &str = "products";

/// Catalogue entry with price, stock and category
///
/// Search covers name and description; price supports range filters and
/// category the exact-match filter.
pub fn schema() -> CollectionSchema {
    CollectionSchema::new(NAME, "name")
        .field(FieldDescriptor::text("name").searchable().required())
        .field(FieldDescriptor::text("description").searchable())
        .field(FieldDescriptor::numeric("price").required())
        .field(FieldDescriptor::categorical("category"))
        .field(FieldDescriptor::numeric("stock"))
        .field(FieldDescriptor::text("image_url"))
        .field(FieldDescriptor::categorical("is_featured"))
        .field(FieldDescriptor::categorical("org_id"))
        .field(FieldDescriptor::text("created_at"))
        .with_category_field("category")
}

fn product(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    category: &str,
    stock: f64,
    is_featured: bool,
) -> Record {
    Record::new()
        .with("id", id)
        .with("name", name)
        .with("description", description)
        .with("price", price)
        .with("category", category)
        .with("stock", stock)
        .with("image_url", "")
        .with("is_featured", is_featured)
        .with("org_id", "1")
        .with("created_at", "2024-05-01T10:00:00+00:00")
}

/// Sample products for demos and tests
pub fn seed() -> Vec<Record> {
    vec![
        product(
            "1",
            "Wireless Headphones",
            "Over-ear headphones with noise cancelling",
            99.99,
            "Electronics",
            50.0,
            true,
        ),
        product(
            "2",
            "Leather Phone Case",
            "Slim case with card slot",
            149.99,
            "Accessories",
            30.0,
            false,
        ),
        product(
            "3",
            "USB-C Charger",
            "65W fast charger",
            39.5,
            "Electronics",
            120.0,
            false,
        ),
        product(
            "4",
            "Desk Lamp",
            "LED lamp with adjustable arm",
            24.0,
            "Home",
            0.0,
            true,
        ),
        product(
            "5",
            "Laptop Stand",
            "Aluminium stand for laptops up to 17 inches",
            39.5,
            "Accessories",
            15.0,
            false,
        ),
    ]
}
