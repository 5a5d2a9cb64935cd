use super::{Schema, SchemaField, WireType};
use crate::generator::fields;

/// Creates the typed schema of the user fixture.
///
/// Columns follow [`fields::FIELD_ORDER`]. Everything is Utf8 except the
/// routing number (Int64, parsed from its digit string), the creation
/// instant (millisecond timestamp) and the activation flag (Boolean).
///
/// # Example
///
/// ```
/// use userdata_fixtures::schema::{create_userdata_schema, WireType};
///
/// let schema = create_userdata_schema();
/// assert_eq!(schema.len(), 14);
/// assert_eq!(schema.field("Routing Number   ").unwrap().wire_type(), WireType::Int64);
/// ```
pub fn create_userdata_schema() -> Schema {
    let mut columns = Vec::with_capacity(fields::FIELD_ORDER.len());

    columns.push(SchemaField::new(fields::NAME, WireType::Utf8));
    columns.push(SchemaField::new(fields::PHONE_NUMBER, WireType::Utf8));
    columns.push(SchemaField::new(fields::EMAIL, WireType::Utf8));
    columns.push(SchemaField::new(fields::STREET, WireType::Utf8));
    columns.push(SchemaField::new(fields::CITY, WireType::Utf8));
    columns.push(SchemaField::new(fields::STATE, WireType::Utf8));
    columns.push(SchemaField::new(fields::ZIP_CODE, WireType::Utf8));

    // Narrowed from the generated digit string; leading zeros do not survive
    columns.push(
        SchemaField::new(fields::ROUTING_NUMBER, WireType::Int64)
            .with_description("ABA routing number, parsed from its nine-digit string"),
    );

    columns.push(SchemaField::new(fields::DEPARTMENT, WireType::Utf8));
    columns.push(SchemaField::new(fields::COMPANY, WireType::Utf8));

    columns.push(
        SchemaField::new(fields::CREATED_AT, WireType::TimestampMillis)
            .with_description("Account creation instant, UTC"),
    );

    columns.push(SchemaField::new(fields::PROFILE_PHOTO, WireType::Utf8));
    columns.push(SchemaField::new(fields::DESCRIPTION, WireType::Utf8));
    columns.push(SchemaField::new(fields::ACTIVATED, WireType::Boolean));

    Schema::new(columns)
}
