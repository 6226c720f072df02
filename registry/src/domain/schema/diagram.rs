//! Mermaid ER rendering for the schema catalog.
//!
//! Output is deterministic: tables render alphabetically, columns in
//! declaration order, relationships sorted by their endpoints.

use std::fmt::Write as _;

use super::{Relationship, SchemaCatalog, TableSchema};

/// Render the catalog as a Mermaid `erDiagram` block.
pub fn render_mermaid_diagram(catalog: &SchemaCatalog) -> String {
    let mut tables: Vec<&TableSchema> = catalog.tables().iter().collect();
    tables.sort_by_key(|table| table.name);

    let mut relationships: Vec<&Relationship> = catalog
        .tables()
        .iter()
        .flat_map(|table| table.relationships.iter())
        .collect();
    relationships.sort_by_key(|rel| {
        (
            rel.referenced_table,
            rel.referencing_table,
            rel.referencing_column,
        )
    });

    let mut output = String::from("erDiagram\n");
    for table in &tables {
        render_table(&mut output, table);
    }
    for relationship in &relationships {
        render_relationship(&mut output, relationship);
    }
    output
}

fn render_table(output: &mut String, table: &TableSchema) {
    let _ = writeln!(output, "  {} {{", entity_name(table.name));
    for column in &table.columns {
        let marker = if column.is_primary_key { " PK" } else { "" };
        let _ = writeln!(
            output,
            "    {} {}{marker}",
            mermaid_type(column.data_type),
            column.name,
        );
    }
    output.push_str("  }\n\n");
}

fn render_relationship(output: &mut String, relationship: &Relationship) {
    // Nullable foreign keys render as optional cardinality.
    let cardinality = if relationship.referencing_is_nullable {
        "||--o{"
    } else {
        "||--|{"
    };
    let _ = writeln!(
        output,
        "  {} {cardinality} {} : \"{} -> {}\"",
        entity_name(relationship.referenced_table),
        entity_name(relationship.referencing_table),
        relationship.referencing_column,
        relationship.referenced_column,
    );
}

fn entity_name(table: &str) -> String {
    let mut name = String::with_capacity(table.len());
    for segment in table.split('_').filter(|segment| !segment.is_empty()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name
}

fn mermaid_type(data_type: &str) -> String {
    // Mermaid identifiers cannot carry brackets; spell arrays out.
    data_type.replace("[]", "_array")
}
