//! Schema registry: typed table metadata and derived record shapes.
//!
//! Every table is described once, as its stored Row shape. The two other
//! shapes consumers validate against are derived rather than hand-written:
//!
//! - the **insert shape** makes a field required exactly when its column is
//!   neither nullable nor covered by a server-side default;
//! - the **update shape** has no required fields at all.
//!
//! Foreign-key relationships are declared per table so consumers can walk
//! the graph without a live database connection.

mod catalog;
mod diagram;

pub use catalog::SchemaCatalog;
pub use diagram::render_mermaid_diagram;

/// A typed database column as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    /// Column name.
    pub name: &'static str,
    /// Store-level type name (Postgres spelling).
    pub data_type: &'static str,
    /// Whether the column participates in the primary key.
    pub is_primary_key: bool,
    /// Whether NULL is a legal stored value.
    pub is_nullable: bool,
    /// Whether the store fills the column when it is omitted on insert.
    pub has_default: bool,
}

impl ColumnSchema {
    /// A column is required on insert when the store can neither null it nor
    /// default it.
    pub fn required_on_insert(&self) -> bool {
        !self.is_nullable && !self.has_default
    }
}

/// A single foreign-key relationship between two columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Table holding the foreign key.
    pub referencing_table: &'static str,
    /// Foreign-key column.
    pub referencing_column: &'static str,
    /// Table being referenced.
    pub referenced_table: &'static str,
    /// Referenced column (the target's key).
    pub referenced_column: &'static str,
    /// Whether the foreign key may be NULL, i.e. the association is optional.
    pub referencing_is_nullable: bool,
}

/// A table with its stored columns and outgoing relationships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name.
    pub name: &'static str,
    /// Stored columns, in declaration order.
    pub columns: Vec<ColumnSchema>,
    /// Foreign keys declared on this table.
    pub relationships: Vec<Relationship>,
}

/// One field of a derived record shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeField {
    /// Field name (matches the column name).
    pub name: &'static str,
    /// Store-level type name.
    pub data_type: &'static str,
    /// Whether the consumer must supply the field.
    pub required: bool,
}

/// A derived validation shape for a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordShape {
    /// The table the shape belongs to.
    pub table: &'static str,
    /// Shape fields, in column order.
    pub fields: Vec<ShapeField>,
}

impl RecordShape {
    /// Names of the fields a consumer must supply.
    pub fn required_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|field| field.required)
            .map(|field| field.name)
            .collect()
    }
}

impl TableSchema {
    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// The creation shape: generated and defaulted columns become optional,
    /// everything else stays mandatory. Optional fields may still be supplied
    /// to override a default.
    pub fn insert_shape(&self) -> RecordShape {
        RecordShape {
            table: self.name,
            fields: self
                .columns
                .iter()
                .map(|column| ShapeField {
                    name: column.name,
                    data_type: column.data_type,
                    required: column.required_on_insert(),
                })
                .collect(),
        }
    }

    /// The partial-update shape: every column optional, callers send only
    /// what changed.
    pub fn update_shape(&self) -> RecordShape {
        RecordShape {
            table: self.name,
            fields: self
                .columns
                .iter()
                .map(|column| ShapeField {
                    name: column.name,
                    data_type: column.data_type,
                    required: false,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ColumnSchema, Relationship, TableSchema};

    fn sample_table() -> TableSchema {
        TableSchema {
            name: "reviews",
            columns: vec![
                ColumnSchema {
                    name: "id",
                    data_type: "bigint",
                    is_primary_key: true,
                    is_nullable: false,
                    has_default: true,
                },
                ColumnSchema {
                    name: "specialist_id",
                    data_type: "bigint",
                    is_primary_key: false,
                    is_nullable: false,
                    has_default: false,
                },
                ColumnSchema {
                    name: "comment",
                    data_type: "text",
                    is_primary_key: false,
                    is_nullable: true,
                    has_default: false,
                },
                ColumnSchema {
                    name: "status",
                    data_type: "text",
                    is_primary_key: false,
                    is_nullable: false,
                    has_default: true,
                },
            ],
            relationships: vec![Relationship {
                referencing_table: "reviews",
                referencing_column: "specialist_id",
                referenced_table: "specialists",
                referenced_column: "id",
                referencing_is_nullable: false,
            }],
        }
    }

    #[rstest]
    fn insert_shape_requires_exactly_the_undefaulted_non_nullable_columns() {
        let shape = sample_table().insert_shape();
        assert_eq!(shape.required_fields(), vec!["specialist_id"]);
        assert_eq!(shape.fields.len(), 4);
    }

    #[rstest]
    fn update_shape_requires_nothing() {
        let shape = sample_table().update_shape();
        assert!(shape.required_fields().is_empty());
        assert_eq!(shape.fields.len(), 4);
    }

    #[rstest]
    fn generated_columns_stay_present_but_optional_on_insert() {
        let shape = sample_table().insert_shape();
        let id = shape
            .fields
            .iter()
            .find(|field| field.name == "id")
            .expect("id field present");
        assert!(!id.required);
    }
}
