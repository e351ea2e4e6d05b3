//! Backend-neutral SELECT builder
//!
//! Fragments are written with `?` markers; rendering swaps each marker for the
//! dialect placeholder and collects arguments in textual order (joins first,
//! then WHERE predicates).

use super::SqlDialect;
use crate::utils::sql::contains_pattern;

/// Bound query argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlArg {
    Int(i64),
    Text(String),
}

impl From<i64> for SqlArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<String> for SqlArg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SqlArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Parameterized boolean condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// SQL fragment with one `?` per argument
    Expr { sql: String, args: Vec<SqlArg> },
    /// Column compared as text against a text argument
    TextEq { column: String, value: String },
    /// Conjunction, rendered as one parenthesized group
    And(Vec<Predicate>),
}

impl Predicate {
    pub fn expr(sql: impl Into<String>, args: Vec<SqlArg>) -> Self {
        Self::Expr {
            sql: sql.into(),
            args,
        }
    }

    pub fn eq(column: &str, value: impl Into<SqlArg>) -> Self {
        Self::expr(format!("{} = ?", column), vec![value.into()])
    }

    pub fn text_eq(column: &str, value: impl Into<String>) -> Self {
        Self::TextEq {
            column: column.to_string(),
            value: value.into(),
        }
    }

    pub fn gte(column: &str, value: i64) -> Self {
        Self::expr(format!("{} >= ?", column), vec![SqlArg::Int(value)])
    }

    pub fn lte(column: &str, value: i64) -> Self {
        Self::expr(format!("{} <= ?", column), vec![SqlArg::Int(value)])
    }

    pub fn is_null(column: &str) -> Self {
        Self::expr(format!("{} IS NULL", column), Vec::new())
    }

    pub fn is_not_null(column: &str) -> Self {
        Self::expr(format!("{} IS NOT NULL", column), Vec::new())
    }

    /// `IS NOT NULL` when `present`, otherwise `IS NULL`
    pub fn presence(column: &str, present: bool) -> Self {
        if present {
            Self::is_not_null(column)
        } else {
            Self::is_null(column)
        }
    }

    /// Case-insensitive substring match with LIKE metacharacters escaped
    pub fn contains_ci(column: &str, value: &str) -> Self {
        Self::expr(
            format!("LOWER({}) LIKE LOWER(?) ESCAPE '\\'", column),
            vec![SqlArg::Text(contains_pattern(value))],
        )
    }

    /// AND of the given predicates; `None` when empty
    pub fn all(mut predicates: Vec<Predicate>) -> Option<Self> {
        match predicates.len() {
            0 => None,
            1 => predicates.pop(),
            _ => Some(Self::And(predicates)),
        }
    }

    fn write_sql(&self, dialect: &dyn SqlDialect, out: &mut String, args: &mut Vec<SqlArg>) {
        match self {
            Self::Expr { sql, args: own } => {
                let mut pending = own.iter();
                for ch in sql.chars() {
                    if ch == '?'
                        && let Some(arg) = pending.next()
                    {
                        args.push(arg.clone());
                        out.push_str(&dialect.placeholder(args.len()));
                        continue;
                    }
                    out.push(ch);
                }
            }
            Self::TextEq { column, value } => {
                args.push(SqlArg::Text(value.clone()));
                out.push_str(&dialect.cast_to_string(column));
                out.push_str(" = ");
                out.push_str(&dialect.placeholder(args.len()));
            }
            Self::And(parts) => {
                out.push('(');
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" AND ");
                    }
                    part.write_sql(dialect, out, args);
                }
                out.push(')');
            }
        }
    }
}

/// Join clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    kind: &'static str,
    table: String,
    on: Predicate,
}

/// SELECT statement under construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectQuery {
    columns: Vec<String>,
    from: String,
    joins: Vec<Join>,
    predicates: Vec<Predicate>,
    group_by: Vec<String>,
    order_by: Vec<String>,
    limit: Option<u32>,
}

impl SelectQuery {
    pub fn from(table: &str) -> Self {
        Self {
            from: table.to_string(),
            ..Default::default()
        }
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns
            .extend(columns.iter().map(|c| c.to_string()));
        self
    }

    pub fn join(mut self, table: &str, on: Predicate) -> Self {
        self.joins.push(Join {
            kind: "JOIN",
            table: table.to_string(),
            on,
        });
        self
    }

    pub fn left_join(mut self, table: &str, on: Predicate) -> Self {
        self.joins.push(Join {
            kind: "LEFT JOIN",
            table: table.to_string(),
            on,
        });
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn group_by(mut self, column: &str) -> Self {
        self.group_by.push(column.to_string());
        self
    }

    pub fn order_by(mut self, column: &str) -> Self {
        self.order_by.push(column.to_string());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// WHERE predicates in application order
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn limit_value(&self) -> Option<u32> {
        self.limit
    }

    /// Render SQL and the ordered argument list for a dialect
    pub fn to_sql(&self, dialect: &dyn SqlDialect) -> (String, Vec<SqlArg>) {
        let mut sql = String::with_capacity(256);
        let mut args = Vec::new();

        sql.push_str("SELECT ");
        sql.push_str(&self.columns.join(", "));
        sql.push_str(" FROM ");
        sql.push_str(&self.from);

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join.kind);
            sql.push(' ');
            sql.push_str(&join.table);
            sql.push_str(" ON ");
            join.on.write_sql(dialect, &mut sql, &mut args);
        }

        for (i, predicate) in self.predicates.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            predicate.write_sql(dialect, &mut sql, &mut args);
        }

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }
        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }
        if let Some(limit) = self.limit {
            sql.push(' ');
            sql.push_str(&dialect.limit(limit));
        }

        (sql, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sql::{PostgresDialect, SqliteDialect};

    fn sample() -> SelectQuery {
        SelectQuery::from("wod")
            .columns(&["wod.id", "COUNT(activity.id)"])
            .left_join(
                "activity",
                Predicate::expr(
                    "activity.wod_id = wod.id AND activity.user_id = ?",
                    vec![SqlArg::Int(7)],
                ),
            )
            .filter(Predicate::eq("wod.type", "Hero"))
            .filter(Predicate::gte("wod.creation_t", 100))
            .group_by("wod.id")
            .order_by("wod.id")
            .limit(10)
    }

    #[test]
    fn test_render_sqlite() {
        let (sql, args) = sample().to_sql(&SqliteDialect);
        assert_eq!(
            sql,
            "SELECT wod.id, COUNT(activity.id) FROM wod \
             LEFT JOIN activity ON activity.wod_id = wod.id AND activity.user_id = ? \
             WHERE wod.type = ? AND wod.creation_t >= ? \
             GROUP BY wod.id ORDER BY wod.id LIMIT 10"
        );
        assert_eq!(
            args,
            vec![
                SqlArg::Int(7),
                SqlArg::Text("Hero".to_string()),
                SqlArg::Int(100)
            ]
        );
    }

    #[test]
    fn test_render_postgres_numbers_placeholders_in_order() {
        let (sql, args) = sample().to_sql(&PostgresDialect);
        assert!(sql.contains("activity.user_id = $1"));
        assert!(sql.contains("wod.type = $2 AND wod.creation_t >= $3"));
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn test_contains_ci_escapes_value() {
        let (sql, args) = SelectQuery::from("wod")
            .columns(&["id"])
            .filter(Predicate::contains_ci("wod.wod", "100%"))
            .to_sql(&SqliteDialect);
        assert_eq!(
            sql,
            "SELECT id FROM wod WHERE LOWER(wod.wod) LIKE LOWER(?) ESCAPE '\\'"
        );
        assert_eq!(args, vec![SqlArg::Text("%100\\%%".to_string())]);
    }

    #[test]
    fn test_and_group_is_parenthesized() {
        let group = Predicate::all(vec![
            Predicate::contains_ci("wod.wod", "row"),
            Predicate::contains_ci("wod.wod", "run"),
        ])
        .unwrap();
        let (sql, args) = SelectQuery::from("wod")
            .columns(&["id"])
            .filter(group)
            .to_sql(&PostgresDialect);
        assert!(sql.ends_with(
            "WHERE (LOWER(wod.wod) LIKE LOWER($1) ESCAPE '\\' AND LOWER(wod.wod) LIKE LOWER($2) ESCAPE '\\')"
        ));
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_all_collapses_small_lists() {
        assert_eq!(Predicate::all(Vec::new()), None);
        let single = Predicate::is_null("wod.picture");
        assert_eq!(Predicate::all(vec![single.clone()]), Some(single));
    }

    #[test]
    fn test_presence() {
        assert_eq!(
            Predicate::presence("wod.picture", true),
            Predicate::is_not_null("wod.picture")
        );
        assert_eq!(
            Predicate::presence("wod.picture", false),
            Predicate::is_null("wod.picture")
        );
    }

    #[test]
    fn test_text_eq_uses_dialect_cast() {
        let query = SelectQuery::from("activity")
            .columns(&["id"])
            .filter(Predicate::text_eq("activity.wod_id", "42"));
        let (sqlite_sql, _) = query.to_sql(&SqliteDialect);
        let (pg_sql, pg_args) = query.to_sql(&PostgresDialect);
        assert!(sqlite_sql.ends_with("WHERE CAST(activity.wod_id AS TEXT) = ?"));
        assert!(pg_sql.ends_with("WHERE activity.wod_id::TEXT = $1"));
        assert_eq!(pg_args, vec![SqlArg::Text("42".to_string())]);
    }
}
