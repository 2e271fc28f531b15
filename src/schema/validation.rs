use arrow::datatypes::{DataType, Schema};

use super::columns;

/// Validates that a schema is compatible with the triax derived-table layout.
///
/// Returns `Ok(())` if the schema contains the stage column and every numeric
/// column with the correct type, or an error describing the first
/// incompatibility.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaValidationError> {
    let numeric = columns::numeric_columns();
    let required_columns = std::iter::once((columns::STAGE, DataType::Int64))
        .chain(numeric.iter().map(|name| (name.as_str(), DataType::Float64)));

    for (name, expected_type) in required_columns {
        match schema.field_with_name(name) {
            Ok(field) => {
                if field.data_type() != &expected_type {
                    return Err(SchemaValidationError::TypeMismatch {
                        column: name.to_string(),
                        expected: format!("{:?}", expected_type),
                        found: format!("{:?}", field.data_type()),
                    });
                }
            }
            Err(_) => {
                return Err(SchemaValidationError::MissingColumn(name.to_string()));
            }
        }
    }

    Ok(())
}

/// Errors that can occur during schema validation
#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    /// A required column is missing from the schema
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A column has an incorrect data type
    #[error("Type mismatch for column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Name of the column with the type mismatch
        column: String,
        /// Expected data type
        expected: String,
        /// Actual data type found
        found: String,
    },
}
