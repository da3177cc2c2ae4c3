//! Table descriptions and the idempotent DDL derived from them.
//!
//! Every statement produced here uses `IF NOT EXISTS`, so applying the whole
//! schema against an already-initialised database is a no-op.

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub constraints: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Index {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub unique: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub indexes: &'static [Index],
}

pub const USERS: TableSchema = TableSchema {
    name: "users",
    columns: &[
        Column {
            name: "id",
            sql_type: "SERIAL",
            constraints: "PRIMARY KEY",
        },
        Column {
            name: "name",
            sql_type: "VARCHAR",
            constraints: "NOT NULL",
        },
        Column {
            name: "email",
            sql_type: "VARCHAR",
            constraints: "NOT NULL",
        },
        Column {
            name: "created_at",
            sql_type: "TIMESTAMPTZ",
            constraints: "NOT NULL DEFAULT NOW()",
        },
    ],
    indexes: &[
        Index {
            name: "ix_users_id",
            columns: &["id"],
            unique: false,
        },
        Index {
            name: "ix_users_name",
            columns: &["name"],
            unique: false,
        },
        Index {
            name: "ix_users_email",
            columns: &["email"],
            unique: true,
        },
    ],
};

/// All tables the service needs, in creation order.
pub const TABLES: &[TableSchema] = &[USERS];

impl TableSchema {
    pub fn create_table_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                if c.constraints.is_empty() {
                    format!("{} {}", c.name, c.sql_type)
                } else {
                    format!("{} {} {}", c.name, c.sql_type, c.constraints)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE IF NOT EXISTS {} ({})", self.name, columns)
    }

    pub fn create_index_sql(&self) -> Vec<String> {
        self.indexes
            .iter()
            .map(|idx| {
                format!(
                    "CREATE {}INDEX IF NOT EXISTS {} ON {} ({})",
                    if idx.unique { "UNIQUE " } else { "" },
                    idx.name,
                    self.name,
                    idx.columns.join(", ")
                )
            })
            .collect()
    }

    pub fn ddl(&self) -> Vec<String> {
        let mut statements = vec![self.create_table_sql()];
        statements.extend(self.create_index_sql());
        statements
    }
}

pub fn ddl() -> Vec<String> {
    TABLES.iter().flat_map(TableSchema::ddl).collect()
}
