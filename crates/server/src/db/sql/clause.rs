use crate::db::SqlValue;

/// How a column is compared with a bound value of any type.
///
/// Substring matching is text-only and goes through [`Clause::contains`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equals,
    GreaterOrEqual,
    LessOrEqual,
}

impl Comparison {
    const fn operator(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Compare(Comparison),
    Like,
}

impl Operator {
    const fn sql(self) -> &'static str {
        match self {
            Self::Compare(comparison) => comparison.operator(),
            Self::Like => "LIKE",
        }
    }
}

/// One predicate with its bound value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    column: &'static str,
    operator: Operator,
    value: SqlValue,
}

impl Clause {
    /// Build a clause, or nothing when `value` is absent.
    #[must_use]
    pub fn build<V: Into<SqlValue>>(
        column: &'static str,
        comparison: Comparison,
        value: Option<V>,
    ) -> Option<Self> {
        value.map(|value| Self {
            column,
            operator: Operator::Compare(comparison),
            value: value.into(),
        })
    }

    /// Substring match: `LIKE` with `text` wrapped in `%` on both sides.
    ///
    /// `%` and `_` inside `text` keep their wildcard meaning.
    #[must_use]
    pub fn contains<T: AsRef<str>>(column: &'static str, text: Option<T>) -> Option<Self> {
        text.map(|text| Self {
            column,
            operator: Operator::Like,
            value: SqlValue::Text(format!("%{}%", text.as_ref())),
        })
    }

    /// Predicate text using placeholder `$position`.
    #[must_use]
    pub fn render(&self, position: usize) -> String {
        format!("{} {} ${position}", self.column, self.operator.sql())
    }

    #[must_use]
    pub const fn value(&self) -> &SqlValue {
        &self.value
    }
}

/// `WHERE` text plus the parameters for its placeholders, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedClauses {
    /// Empty when there are no clauses.
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Ordered `AND` of clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseSet {
    clauses: Vec<Clause>,
}

impl ClauseSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    /// Append a clause; an absent value leaves the set untouched.
    #[must_use]
    pub fn and<V: Into<SqlValue>>(
        mut self,
        column: &'static str,
        comparison: Comparison,
        value: Option<V>,
    ) -> Self {
        self.clauses.extend(Clause::build(column, comparison, value));
        self
    }

    /// Append a substring match; an absent value leaves the set untouched.
    #[must_use]
    pub fn contains<T: AsRef<str>>(mut self, column: &'static str, text: Option<T>) -> Self {
        self.clauses.extend(Clause::contains(column, text));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Render as `WHERE c1 AND c2 ...`, numbering placeholders from
    /// `first_position`.
    #[must_use]
    pub fn render(&self, first_position: usize) -> RenderedClauses {
        if self.clauses.is_empty() {
            return RenderedClauses::default();
        }
        let predicates: Vec<String> = self
            .clauses
            .iter()
            .enumerate()
            .map(|(offset, clause)| clause.render(first_position + offset))
            .collect();
        RenderedClauses {
            sql: format!("WHERE {}", predicates.join(" AND ")),
            params: self.clauses.iter().map(|c| c.value.clone()).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_absent_value_builds_nothing() {
        assert!(Clause::build("email", Comparison::Equals, None::<String>).is_none());
    }

    #[test]
    fn test_contains_wraps_value() {
        let clause = Clause::contains("first_name", Some("Jo")).unwrap();
        assert_eq!(clause.render(1), "first_name LIKE $1");
        assert_eq!(clause.value(), &SqlValue::Text("%Jo%".to_string()));
    }

    #[test]
    fn test_contains_binds_text_for_owned_and_borrowed_input() {
        let owned = Clause::contains("last_name", Some("Doe".to_string())).unwrap();
        let borrowed = Clause::contains("last_name", Some("Doe")).unwrap();
        assert_eq!(owned, borrowed);
        assert!(matches!(owned.value(), SqlValue::Text(text) if text == "%Doe%"));
        assert!(Clause::contains("last_name", None::<&str>).is_none());
    }

    #[test]
    fn test_contains_keeps_wildcards_in_input() {
        let clause = Clause::contains("first_name", Some("J_")).unwrap();
        assert_eq!(clause.value(), &SqlValue::Text("%J_%".to_string()));
    }

    #[test]
    fn test_other_comparisons_bind_unchanged() {
        let date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let ge = Clause::build("birth_date", Comparison::GreaterOrEqual, Some(date)).unwrap();
        let le = Clause::build("birth_date", Comparison::LessOrEqual, Some(date)).unwrap();
        let eq = Clause::build("email", Comparison::Equals, Some("a@b.c")).unwrap();
        assert_eq!(ge.render(2), "birth_date >= $2");
        assert_eq!(le.render(3), "birth_date <= $3");
        assert_eq!(eq.render(4), "email = $4");
        assert_eq!(ge.value(), &SqlValue::Date(date));
        assert_eq!(eq.value(), &SqlValue::Text("a@b.c".to_string()));
    }

    #[test]
    fn test_empty_set_renders_nothing() {
        let rendered = ClauseSet::new().render(1);
        assert!(rendered.sql.is_empty());
        assert!(rendered.params.is_empty());
    }

    #[test]
    fn test_absent_clause_does_not_shift_order() {
        let rendered = ClauseSet::new()
            .contains("first_name", Some("A"))
            .contains("last_name", None::<String>)
            .and("email", Comparison::Equals, Some("x@y.z"))
            .render(1);
        assert_eq!(rendered.sql, "WHERE first_name LIKE $1 AND email = $2");
        assert_eq!(
            rendered.params,
            vec![
                SqlValue::Text("%A%".to_string()),
                SqlValue::Text("x@y.z".to_string())
            ]
        );
    }

    #[test]
    fn test_render_offset() {
        let rendered = ClauseSet::new()
            .and("city", Comparison::Equals, Some("Paris"))
            .render(3);
        assert_eq!(rendered.sql, "WHERE city = $3");
    }

    proptest! {
        #[test]
        fn prop_params_match_present_values(
            values in proptest::collection::vec(proptest::option::of("[a-z]{1,8}"), 0..8)
        ) {
            const COLUMNS: [&str; 8] = ["c0", "c1", "c2", "c3", "c4", "c5", "c6", "c7"];
            let set = values
                .iter()
                .zip(COLUMNS)
                .fold(ClauseSet::new(), |set, (value, column)| {
                    set.and(column, Comparison::Equals, value.clone())
                });
            let rendered = set.render(1);
            let present: Vec<SqlValue> =
                values.iter().flatten().cloned().map(SqlValue::Text).collect();

            prop_assert_eq!(rendered.params.len(), present.len());
            prop_assert_eq!(&rendered.params, &present);
            prop_assert_eq!(rendered.sql.matches('$').count(), present.len());
            prop_assert_eq!(rendered.sql.is_empty(), present.is_empty());
            prop_assert_eq!(set.render(1), rendered);
        }
    }
}
