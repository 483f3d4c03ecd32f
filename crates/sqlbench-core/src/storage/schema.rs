use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Declared type as written in the DDL; empty for untyped columns.
    pub declared_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDescriptor {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
}

/// Structural metadata of the store, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaDescription {
    pub tables: Vec<TableDescriptor>,
}

impl SchemaDescription {
    /// Renders the prompt block: a `TABLE:` header per table, one `- name (type)`
    /// line per column and a blank separator after each table.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        for table in &self.tables {
            lines.push(format!("TABLE: {}", table.name));
            for col in &table.columns {
                lines.push(format!("- {} ({})", col.name, col.declared_type));
            }
            lines.push(String::new());
        }
        lines.join("\n")
    }
}
