use sqlx::postgres::PgArguments;

use crate::db::error::{ StoreError, StoreResult };

/// A fixed-shape record that can drive query composition.
///
/// `FIELDS` is the single source of truth for field names and their order;
/// both the placeholder template and the bound-value list are derived from it,
/// so the two can never drift apart.
pub trait Record {
    /// Column names in declaration order.
    const FIELDS: &'static [&'static str];

    /// Append the named field's value to the argument buffer. Returns false
    /// when the name matches no field.
    fn add_field(&self, name: &str, args: &mut PgArguments) -> bool;
}

/// A statement ready for execution: SQL text with positional markers plus the
/// values bound to them. Values never appear in the text itself.
pub struct ComposedQuery {
    sql: String,
    arguments: PgArguments,
    binds: Vec<&'static str>,
}

impl ComposedQuery {
    /// The SQL text that will be sent to the server.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Field name bound at each positional slot, in marker order.
    pub fn binds(&self) -> &[&'static str] {
        &self.binds
    }

    /// Number of positional parameters carried by this query.
    pub fn param_count(&self) -> usize {
        self.binds.len()
    }

    pub(crate) fn into_parts(self) -> (String, PgArguments) {
        (self.sql, self.arguments)
    }
}

/// Wrap a literal statement with no substitution and no bound parameters.
pub fn prepare(query: &str) -> ComposedQuery {
    ComposedQuery {
        sql: query.to_string(),
        arguments: PgArguments::default(),
        binds: Vec::new(),
    }
}

/// Resolve `{name}` placeholders in a template against a record's fields.
///
/// The first appearance of a field name is assigned the next positional marker
/// and that field's value is appended to the argument buffer; repeated names
/// reuse their marker. A name that matches no field fails composition before
/// anything touches the driver.
pub fn prepare_with_record<R: Record>(query: &str, record: &R) -> StoreResult<ComposedQuery> {
    let mut sql = String::with_capacity(query.len());
    let mut arguments = PgArguments::default();
    let mut binds: Vec<&'static str> = Vec::new();

    let mut rest = query;
    while let Some(open) = rest.find('{') {
        sql.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| StoreError::UnknownPlaceholder(after.to_string()))?;
        let name = &after[..close];

        let field = R::FIELDS.iter()
            .copied()
            .find(|f| *f == name)
            .ok_or_else(|| StoreError::UnknownPlaceholder(name.to_string()))?;

        let marker = match binds.iter().position(|b| *b == field) {
            Some(pos) => pos + 1,
            None => {
                if !record.add_field(field, &mut arguments) {
                    return Err(StoreError::UnknownPlaceholder(name.to_string()));
                }
                binds.push(field);
                binds.len()
            }
        };

        sql.push('$');
        sql.push_str(&marker.to_string());
        rest = &after[close + 1..];
    }
    sql.push_str(rest);

    Ok(ComposedQuery { sql, arguments, binds })
}
