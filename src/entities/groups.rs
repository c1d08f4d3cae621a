//! The groups collection
//!
//! A group is a named bucket of contacts. Membership lives on the contact as
//! its `group_id`, so a group's members are the contacts listed with
//! `category.group_id=<group id>` and `/contacts/facets/group_id` counts them.

use crate::core::field::FieldDescriptor;
use crate::core::record::Record;
use crate::core::schema::CollectionSchema;

pub const NAME: &str = "groups";

/// Contact field holding the id of the group a contact belongs to
pub const MEMBER_FIELD: &str = "group_id";

pub fn schema() -> CollectionSchema {
    CollectionSchema::new(NAME, "name")
        .field(FieldDescriptor::text("name").searchable().required())
        .field(FieldDescriptor::text("created_at"))
}

/// Sample groups; the contact seed assigns members to both
pub fn seed() -> Vec<Record> {
    vec![
        Record::new()
            .with("id", "1")
            .with("name", "Key Accounts")
            .with("created_at", "2024-02-01T09:00:00+00:00"),
        Record::new()
            .with("id", "2")
            .with("name", "Paid Search Leads")
            .with("created_at", "2024-07-21T16:20:00+00:00"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldKind;
    use crate::core::validation::{WriteKind, validate};
    use crate::entities::contacts;

    #[test]
    fn test_seed_is_valid() {
        let schema = schema();
        for record in seed() {
            assert!(validate(&schema, &record, WriteKind::Create).is_ok());
        }
    }

    #[test]
    fn test_contacts_carry_the_member_field() {
        let field = contacts::schema().descriptor(MEMBER_FIELD).cloned();
        assert!(field.is_some_and(|f| f.kind == FieldKind::Categorical));
    }

    #[test]
    fn test_seeded_members_point_at_seeded_groups() {
        let ids: Vec<String> = seed()
            .iter()
            .filter_map(|g| g.id().map(str::to_string))
            .collect();
        for contact in contacts::seed() {
            if let Some(group) = contact.text(MEMBER_FIELD) {
                assert!(ids.iter().any(|id| id.as_str() == group.as_ref()));
            }
        }
    }
}
