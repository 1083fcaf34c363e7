use super::ClauseSet;
use crate::db::Statement;

/// `SELECT` statement builder.
///
/// The field list is emitted in the order given; row decoding relies on it,
/// so callers pass the entity's column list from [`crate::db::mapper`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    table: &'static str,
    fields: Vec<&'static str>,
    filter: ClauseSet,
}

impl Select {
    #[must_use]
    pub const fn from(table: &'static str) -> Self {
        Self {
            table,
            fields: Vec::new(),
            filter: ClauseSet::new(),
        }
    }

    #[must_use]
    pub fn fields(mut self, fields: &[&'static str]) -> Self {
        self.fields.extend_from_slice(fields);
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: ClauseSet) -> Self {
        self.filter = filter;
        self
    }

    /// Render the statement. With no fields the projection is `*`.
    #[must_use]
    pub fn build(&self) -> Statement {
        let projection = if self.fields.is_empty() {
            "*".to_string()
        } else {
            self.fields.join(", ")
        };
        let mut sql = format!("SELECT {projection} FROM {}", self.table);
        let rendered = self.filter.render(1);
        if !rendered.sql.is_empty() {
            sql.push(' ');
            sql.push_str(&rendered.sql);
        }
        Statement {
            sql,
            params: rendered.params,
        }
    }
}
