//! The contacts collection

use crate::core::field::{FieldDescriptor, FieldFormat};
use crate::core::record::Record;
use crate::core::schema::CollectionSchema;
use crate::entities::groups;

pub const NAME: &str = "contacts";

/// Name, phone number and campaign attribution of one contact
///
/// Search covers name and phone number. Sorting defaults to name; the list
/// view also sorts by industry and date added.
pub fn schema() -> CollectionSchema {
    CollectionSchema::new(NAME, "name")
        .field(FieldDescriptor::text("name").searchable().required())
        .field(
            FieldDescriptor::text("phone_number")
                .searchable()
                .required()
                .with_format(FieldFormat::Phone),
        )
        .field(FieldDescriptor::categorical("industry"))
        .field(FieldDescriptor::text("website_url").with_format(FieldFormat::Url))
        .field(FieldDescriptor::categorical("utm_campaign"))
        .field(FieldDescriptor::categorical("utm_source"))
        .field(FieldDescriptor::categorical("utm_medium"))
        .field(FieldDescriptor::categorical("is_favorite"))
        .field(FieldDescriptor::categorical(groups::MEMBER_FIELD))
        .field(FieldDescriptor::categorical("org_id"))
        .field(FieldDescriptor::text("created_at"))
        .with_category_field("industry")
}

#[allow(clippy::too_many_arguments)]
fn contact(
    id: &str,
    name: &str,
    phone_number: &str,
    industry: &str,
    website_url: &str,
    utm: (&str, &str, &str),
    is_favorite: bool,
    created_at: &str,
) -> Record {
    Record::new()
        .with("id", id)
        .with("name", name)
        .with("phone_number", phone_number)
        .with("industry", industry)
        .with("website_url", website_url)
        .with("utm_campaign", utm.0)
        .with("utm_source", utm.1)
        .with("utm_medium", utm.2)
        .with("is_favorite", is_favorite)
        .with("org_id", "1")
        .with("created_at", created_at)
}

/// Sample contacts for demos and tests
///
/// John Doe and Maria Garcia belong to group `1`, Arun Mehta to group `2`.
pub fn seed() -> Vec<Record> {
    vec![
        contact(
            "1",
            "John Doe",
            "9876543210",
            "Technology",
            "https://johndoe.com",
            ("summer_2024", "linkedin", "social"),
            true,
            "2024-06-01T09:00:00+00:00",
        )
        .with(groups::MEMBER_FIELD, "1"),
        contact(
            "2",
            "Jane Smith",
            "8765432109",
            "Healthcare",
            "https://janesmith.com",
            ("spring_2024", "facebook", "social"),
            false,
            "2024-03-15T14:30:00+00:00",
        ),
        contact(
            "3",
            "Arun Mehta",
            "9123456780",
            "Technology",
            "https://arunmehta.dev",
            ("summer_2024", "google", "cpc"),
            false,
            "2024-07-20T11:10:00+00:00",
        )
        .with(groups::MEMBER_FIELD, "2"),
        contact(
            "4",
            "Maria Garcia",
            "7012345678",
            "Retail",
            "https://garcia-retail.com",
            ("winter_2024", "newsletter", "email"),
            true,
            "2024-01-08T08:45:00+00:00",
        )
        .with(groups::MEMBER_FIELD, "1"),
    ]
}
