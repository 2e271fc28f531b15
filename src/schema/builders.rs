use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaBuilder};

use super::columns;
use super::constants::{KEY_FORMAT_VERSION, KEY_SCHEMA_DESCRIPTION, TRIAX_FORMAT_VERSION};

/// Creates a Field annotated with its physical unit, when it has one
fn field_with_unit(name: &str, data_type: DataType) -> Field {
    let field = Field::new(name, data_type, false);
    match columns::unit_of(name) {
        Some(unit) => {
            let mut metadata = HashMap::new();
            metadata.insert("unit".to_string(), unit.to_string());
            field.with_metadata(metadata)
        }
        None => field,
    }
}

/// Creates the Arrow schema of the derived table.
///
/// One row per raw reading: the stage index, the raw numeric fields, the
/// derived columns shared by both sides, then the side A and side B families.
/// All value columns are non-nullable `Float64`; suppressed computations are
/// stored as 0.0.
///
/// # Example
///
/// ```
/// use triax::schema::create_derived_schema;
///
/// let schema = create_derived_schema();
/// assert_eq!(schema.fields().len(), 46);
/// ```
pub fn create_derived_schema() -> Schema {
    let mut builder = SchemaBuilder::new();

    builder.push(Field::new(columns::STAGE, DataType::Int64, false));
    for name in columns::numeric_columns() {
        builder.push(field_with_unit(&name, DataType::Float64));
    }

    let mut metadata = HashMap::new();
    metadata.insert(KEY_FORMAT_VERSION.to_string(), TRIAX_FORMAT_VERSION.to_string());
    metadata.insert(
        KEY_SCHEMA_DESCRIPTION.to_string(),
        "Triaxial test readings with derived side A / side B quantities".to_string(),
    );

    builder.finish().with_metadata(metadata)
}

/// Returns an Arc-wrapped schema for shared ownership
pub fn create_derived_schema_arc() -> Arc<Schema> {
    Arc::new(create_derived_schema())
}
