//! The canonical table catalog.
//!
//! One entry per live table. Point-in-time copies of these tables live in the
//! generic snapshot store (`database_backups` + `backup_records`) rather than
//! as distinct per-epoch tables, so the catalog stays free of mechanical
//! duplicates.

use super::{ColumnSchema, Relationship, TableSchema};

/// Tables excluded from full-database snapshots: the snapshot bookkeeping
/// itself must not be backed up into itself.
const SNAPSHOT_EXEMPT: [&str; 2] = ["database_backups", "backup_records"];

/// Registry of every canonical table, keyed by name.
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    tables: Vec<TableSchema>,
}

impl SchemaCatalog {
    /// Build the catalog. Tables are listed in dependency order: a table
    /// always appears after every table it references.
    pub fn new() -> Self {
        Self {
            tables: vec![
                specialists(),
                appointments(),
                orders(),
                automatic_orders(),
                packages(),
                blog_posts(),
                reviews(),
                assessment_tests(),
                test_questions(),
                test_results(),
                client_referrals(),
                user_profiles(),
                support_tickets(),
                sms_logs(),
                social_shares(),
                website_analytics(),
                success_statistics(),
                employee_salaries(),
                legal_proceedings(),
                database_backups(),
                backup_records(),
            ],
        }
    }

    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|table| table.name == name)
    }

    /// All tables, in dependency order.
    pub fn tables(&self) -> &[TableSchema] {
        &self.tables
    }

    /// All table names, in dependency order.
    pub fn table_names(&self) -> Vec<&'static str> {
        self.tables.iter().map(|table| table.name).collect()
    }

    /// The tables included in a full-database snapshot.
    pub fn snapshot_table_names(&self) -> Vec<&'static str> {
        self.tables
            .iter()
            .map(|table| table.name)
            .filter(|name| !SNAPSHOT_EXEMPT.contains(name))
            .collect()
    }
}

impl Default for SchemaCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Incremental [`TableSchema`] assembly, column by column.
struct TableBuilder {
    table: TableSchema,
}

impl TableBuilder {
    fn new(name: &'static str) -> Self {
        Self {
            table: TableSchema {
                name,
                columns: Vec::new(),
                relationships: Vec::new(),
            },
        }
    }

    /// `id BIGSERIAL PRIMARY KEY`.
    fn bigserial_pk(self) -> Self {
        self.push("id", "bigint", true, false, true)
    }

    /// A `NOT NULL` column with no default: required on insert.
    fn col(self, name: &'static str, data_type: &'static str) -> Self {
        self.push(name, data_type, false, false, false)
    }

    /// A nullable column.
    fn nullable(self, name: &'static str, data_type: &'static str) -> Self {
        self.push(name, data_type, false, true, false)
    }

    /// A `NOT NULL` column the store fills when omitted.
    fn defaulted(self, name: &'static str, data_type: &'static str) -> Self {
        self.push(name, data_type, false, false, true)
    }

    /// `created_at`/`updated_at`, both server-maintained.
    fn timestamps(self) -> Self {
        self.defaulted("created_at", "timestamptz")
            .defaulted("updated_at", "timestamptz")
    }

    /// `created_at` only, for append-only tables.
    fn created_at(self) -> Self {
        self.defaulted("created_at", "timestamptz")
    }

    /// Declare a foreign key on an already-declared column. Nullability is
    /// taken from the column itself so the two can never disagree.
    fn references(
        mut self,
        column: &'static str,
        referenced_table: &'static str,
        referenced_column: &'static str,
    ) -> Self {
        let nullable = self
            .table
            .column(column)
            .map(|declared| declared.is_nullable)
            .unwrap_or_default();
        self.table.relationships.push(Relationship {
            referencing_table: self.table.name,
            referencing_column: column,
            referenced_table,
            referenced_column,
            referencing_is_nullable: nullable,
        });
        self
    }

    fn push(
        mut self,
        name: &'static str,
        data_type: &'static str,
        is_primary_key: bool,
        is_nullable: bool,
        has_default: bool,
    ) -> Self {
        self.table.columns.push(ColumnSchema {
            name,
            data_type,
            is_primary_key,
            is_nullable,
            has_default,
        });
        self
    }

    fn build(self) -> TableSchema {
        self.table
    }
}

fn specialists() -> TableSchema {
    TableBuilder::new("specialists")
        .bigserial_pk()
        .col("name", "text")
        .col("specialty", "text")
        .col("city", "text")
        .col("email", "text")
        .col("phone", "text")
        .nullable("internal_number", "text")
        .nullable("bio", "text")
        .nullable("consultation_fee", "bigint")
        .nullable("consultation_type", "text")
        .nullable("working_hours", "jsonb")
        .defaulted("rating", "real")
        .defaulted("is_active", "boolean")
        .timestamps()
        .build()
}

fn appointments() -> TableSchema {
    TableBuilder::new("appointments")
        .bigserial_pk()
        .col("specialist_id", "bigint")
        .col("patient_name", "text")
        .col("patient_email", "text")
        .nullable("patient_phone", "text")
        .col("appointment_date", "date")
        .col("appointment_time", "text")
        .nullable("appointment_type", "text")
        .defaulted("status", "text")
        .nullable("notes", "text")
        .timestamps()
        .references("specialist_id", "specialists", "id")
        .build()
}

fn orders() -> TableSchema {
    TableBuilder::new("orders")
        .bigserial_pk()
        .col("customer_name", "text")
        .col("customer_email", "text")
        .nullable("customer_phone", "text")
        .col("package_name", "text")
        .nullable("package_type", "text")
        .col("amount", "bigint")
        .col("payment_method", "text")
        .defaulted("status", "text")
        .nullable("parent_order_id", "bigint")
        .nullable("invoice_number", "text")
        .nullable("invoice_issued_at", "timestamptz")
        .nullable("deleted_at", "timestamptz")
        .timestamps()
        .references("parent_order_id", "orders", "id")
        .build()
}

fn automatic_orders() -> TableSchema {
    TableBuilder::new("automatic_orders")
        .bigserial_pk()
        .col("customer_name", "text")
        .col("customer_email", "text")
        .nullable("customer_phone", "text")
        .col("package_name", "text")
        .col("monthly_amount", "bigint")
        .col("monthly_payment_day", "integer")
        .defaulted("paid_months", "integer[]")
        .defaulted("current_month", "integer")
        .col("total_months", "integer")
        .nullable("first_order_id", "bigint")
        .nullable("last_billed_on", "date")
        .defaulted("is_active", "boolean")
        .timestamps()
        .references("first_order_id", "orders", "id")
        .build()
}

fn packages() -> TableSchema {
    TableBuilder::new("packages")
        .bigserial_pk()
        .col("package_key", "text")
        .col("name", "text")
        .col("price", "bigint")
        .nullable("original_price", "bigint")
        .defaulted("features", "text[]")
        .defaulted("is_active", "boolean")
        .timestamps()
        .build()
}

fn blog_posts() -> TableSchema {
    TableBuilder::new("blog_posts")
        .bigserial_pk()
        .col("slug", "text")
        .col("title", "text")
        .col("content", "text")
        .nullable("excerpt", "text")
        .col("author_name", "text")
        .nullable("author_specialist_id", "bigint")
        .defaulted("status", "text")
        .nullable("seo_title", "text")
        .nullable("seo_description", "text")
        .defaulted("revision_count", "integer")
        .nullable("published_at", "timestamptz")
        .timestamps()
        .references("author_specialist_id", "specialists", "id")
        .build()
}

fn reviews() -> TableSchema {
    TableBuilder::new("reviews")
        .bigserial_pk()
        .col("specialist_id", "bigint")
        .col("patient_name", "text")
        .col("rating", "integer")
        .nullable("comment", "text")
        .defaulted("status", "text")
        .timestamps()
        .references("specialist_id", "specialists", "id")
        .build()
}

fn assessment_tests() -> TableSchema {
    TableBuilder::new("assessment_tests")
        .bigserial_pk()
        .col("specialist_id", "bigint")
        .col("title", "text")
        .nullable("description", "text")
        .defaulted("is_active", "boolean")
        .timestamps()
        .references("specialist_id", "specialists", "id")
        .build()
}

fn test_questions() -> TableSchema {
    TableBuilder::new("test_questions")
        .bigserial_pk()
        .col("test_id", "bigint")
        .col("position", "integer")
        .col("prompt", "text")
        .col("options", "jsonb")
        .created_at()
        .references("test_id", "assessment_tests", "id")
        .build()
}

fn test_results() -> TableSchema {
    TableBuilder::new("test_results")
        .bigserial_pk()
        .col("test_id", "bigint")
        .nullable("participant_email", "text")
        .col("answers", "jsonb")
        .col("outcome", "jsonb")
        .created_at()
        .references("test_id", "assessment_tests", "id")
        .build()
}

fn client_referrals() -> TableSchema {
    TableBuilder::new("client_referrals")
        .bigserial_pk()
        .col("specialist_id", "bigint")
        .col("year", "integer")
        .col("month", "integer")
        .defaulted("referral_count", "integer")
        .defaulted("is_referred", "boolean")
        .nullable("notes", "text")
        .timestamps()
        .references("specialist_id", "specialists", "id")
        .build()
}

fn user_profiles() -> TableSchema {
    TableBuilder::new("user_profiles")
        .bigserial_pk()
        .col("user_id", "uuid")
        .defaulted("role", "text")
        .defaulted("is_approved", "boolean")
        .nullable("display_name", "text")
        .timestamps()
        .build()
}

fn support_tickets() -> TableSchema {
    TableBuilder::new("support_tickets")
        .bigserial_pk()
        .col("subject", "text")
        .col("body", "text")
        .col("requester_email", "text")
        .defaulted("status", "text")
        .timestamps()
        .build()
}

fn sms_logs() -> TableSchema {
    TableBuilder::new("sms_logs")
        .bigserial_pk()
        .col("recipient", "text")
        .col("body", "text")
        .defaulted("status", "text")
        .nullable("provider_message_id", "text")
        .nullable("sent_at", "timestamptz")
        .created_at()
        .build()
}

fn social_shares() -> TableSchema {
    TableBuilder::new("social_shares")
        .bigserial_pk()
        .col("platform", "text")
        .col("content_url", "text")
        .created_at()
        .build()
}

fn website_analytics() -> TableSchema {
    TableBuilder::new("website_analytics")
        .bigserial_pk()
        .col("day", "date")
        .defaulted("page_views", "bigint")
        .defaulted("unique_visitors", "bigint")
        .created_at()
        .build()
}

fn success_statistics() -> TableSchema {
    TableBuilder::new("success_statistics")
        .bigserial_pk()
        .col("label", "text")
        .col("value", "bigint")
        .defaulted("display_order", "integer")
        .timestamps()
        .build()
}

fn employee_salaries() -> TableSchema {
    TableBuilder::new("employee_salaries")
        .bigserial_pk()
        .col("employee_name", "text")
        .nullable("role", "text")
        .col("gross_amount", "bigint")
        .col("period_year", "integer")
        .col("period_month", "integer")
        .nullable("paid_at", "timestamptz")
        .created_at()
        .build()
}

fn legal_proceedings() -> TableSchema {
    TableBuilder::new("legal_proceedings")
        .bigserial_pk()
        .col("case_number", "text")
        .nullable("counterparty", "text")
        .defaulted("status", "text")
        .nullable("notes", "text")
        .timestamps()
        .build()
}

fn database_backups() -> TableSchema {
    TableBuilder::new("database_backups")
        .bigserial_pk()
        .defaulted("backup_type", "text")
        .nullable("created_by", "text")
        .nullable("notes", "text")
        .defaulted("tables_count", "integer")
        .defaulted("total_records", "bigint")
        .created_at()
        .build()
}

fn backup_records() -> TableSchema {
    TableBuilder::new("backup_records")
        .bigserial_pk()
        .col("backup_id", "bigint")
        .col("table_name", "text")
        .defaulted("row_count", "bigint")
        .col("payload", "jsonb")
        .created_at()
        .references("backup_id", "database_backups", "id")
        .build()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::SchemaCatalog;

    #[rstest]
    fn table_names_are_unique() {
        let catalog = SchemaCatalog::new();
        let names = catalog.table_names();
        let unique: HashSet<_> = names.iter().copied().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[rstest]
    fn insert_shapes_require_exactly_the_undefaulted_non_nullable_columns() {
        let catalog = SchemaCatalog::new();
        for table in catalog.tables() {
            let shape = table.insert_shape();
            for field in &shape.fields {
                let column = table.column(field.name).expect("shape field is a column");
                assert_eq!(
                    field.required,
                    !column.is_nullable && !column.has_default,
                    "{}.{} insert requirement",
                    table.name,
                    column.name,
                );
            }
        }
    }

    #[rstest]
    fn update_shapes_never_require_a_field() {
        let catalog = SchemaCatalog::new();
        for table in catalog.tables() {
            assert!(
                table.update_shape().required_fields().is_empty(),
                "{} update shape must be fully optional",
                table.name,
            );
        }
    }

    #[rstest]
    fn every_relationship_targets_a_declared_table_and_column() {
        let catalog = SchemaCatalog::new();
        for table in catalog.tables() {
            for relationship in &table.relationships {
                let target = catalog
                    .table(relationship.referenced_table)
                    .expect("referenced table exists");
                assert!(
                    target.column(relationship.referenced_column).is_some(),
                    "{} references missing column {}.{}",
                    table.name,
                    relationship.referenced_table,
                    relationship.referenced_column,
                );
                assert_eq!(relationship.referencing_table, table.name);
            }
        }
    }

    #[rstest]
    fn tables_appear_after_their_dependencies() {
        let catalog = SchemaCatalog::new();
        let names = catalog.table_names();
        for table in catalog.tables() {
            let own_position = names
                .iter()
                .position(|name| *name == table.name)
                .expect("table listed");
            for relationship in &table.relationships {
                let target_position = names
                    .iter()
                    .position(|name| *name == relationship.referenced_table)
                    .expect("target listed");
                assert!(
                    target_position <= own_position,
                    "{} listed before its dependency {}",
                    table.name,
                    relationship.referenced_table,
                );
            }
        }
    }

    #[rstest]
    fn order_parent_relationship_is_a_nullable_self_reference() {
        let catalog = SchemaCatalog::new();
        let orders = catalog.table("orders").expect("orders registered");
        let parent = orders
            .relationships
            .iter()
            .find(|rel| rel.referencing_column == "parent_order_id")
            .expect("parent_order_id relationship declared");
        assert_eq!(parent.referenced_table, "orders");
        assert_eq!(parent.referenced_column, "id");
        assert!(parent.referencing_is_nullable);
    }

    #[rstest]
    fn orders_soft_delete_column_is_nullable_without_default() {
        let catalog = SchemaCatalog::new();
        let orders = catalog.table("orders").expect("orders registered");
        let deleted_at = orders.column("deleted_at").expect("deleted_at declared");
        assert!(deleted_at.is_nullable);
        assert!(!deleted_at.has_default);
    }

    #[rstest]
    fn snapshot_set_excludes_the_backup_bookkeeping_tables() {
        let catalog = SchemaCatalog::new();
        let snapshot = catalog.snapshot_table_names();
        assert!(!snapshot.contains(&"database_backups"));
        assert!(!snapshot.contains(&"backup_records"));
        assert_eq!(snapshot.len(), catalog.tables().len() - 2);
    }

    #[rstest]
    fn unknown_table_lookup_returns_none() {
        let catalog = SchemaCatalog::new();
        assert!(catalog.table("backup_1700000000_orders").is_none());
    }
}
