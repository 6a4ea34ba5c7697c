//! Typed filter predicates and the query builder that renders them to SQL.
//!
//! Predicates form a closed set: equality, substring, suffix, inclusive range,
//! and join filters that reach across the director or cast link. A query is
//! the conjunction of its filters plus one ordering, rendered as a single
//! statement with numbered parameters.

use cinedex_catalog::types::{Film, Person};
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, params_from_iter};

use crate::store::{Record, StoreError};

// ── Match values ────────────────────────────────────────────────────────────

/// A scalar compared by an equality predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Text(String),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Value> for SqlValue {
    fn from(v: Value) -> Self {
        match v {
            Value::Int(i) => SqlValue::Integer(i),
            Value::Text(s) => SqlValue::Text(s),
        }
    }
}

/// Inclusive numeric bounds with at least one side present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    min: Option<i64>,
    max: Option<i64>,
}

impl Bounds {
    /// Returns `None` when both bounds are absent: an unbounded range is not a
    /// valid query.
    pub fn new(min: Option<i64>, max: Option<i64>) -> Option<Self> {
        if min.is_none() && max.is_none() {
            None
        } else {
            Some(Self { min, max })
        }
    }

    pub fn between(min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: i64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: i64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn min(&self) -> Option<i64> {
        self.min
    }

    pub fn max(&self) -> Option<i64> {
        self.max
    }

    pub fn contains(&self, v: i64) -> bool {
        self.min.is_none_or(|lo| v >= lo) && self.max.is_none_or(|hi| v <= hi)
    }
}

/// How a field is compared.
#[derive(Debug, Clone, PartialEq)]
pub enum Match {
    Equals(Value),
    /// Field contains the text anywhere.
    Contains(String),
    /// Field ends with the text.
    EndsWith(String),
    Range(Bounds),
}

// ── Fields ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilmField {
    Id,
    Title,
    Year,
    Duration,
}

impl FilmField {
    fn expr(self, alias: &str) -> String {
        let column = match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Year => "year",
            Self::Duration => "duration",
        };
        format!("{alias}.{column}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonField {
    Id,
    Name,
    /// Year part of the stored birthdate.
    BirthYear,
}

impl PersonField {
    fn expr(self, alias: &str) -> String {
        match self {
            Self::Id => format!("{alias}.id"),
            Self::Name => format!("{alias}.name"),
            Self::BirthYear => format!("CAST(strftime('%Y', {alias}.birthdate) AS INTEGER)"),
        }
    }
}

// ── Filters ─────────────────────────────────────────────────────────────────

/// A predicate over films.
#[derive(Debug, Clone, PartialEq)]
pub enum FilmFilter {
    Field(FilmField, Match),
    /// The film's director satisfies the predicate.
    Director(Box<PersonFilter>),
    /// At least one cast member satisfies the predicate.
    Cast(Box<PersonFilter>),
}

impl FilmFilter {
    pub fn id(id: i64) -> Self {
        Self::Field(FilmField::Id, Match::Equals(id.into()))
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self::Field(FilmField::Title, Match::Equals(Value::Text(title.into())))
    }

    pub fn title_contains(part: impl Into<String>) -> Self {
        Self::Field(FilmField::Title, Match::Contains(part.into()))
    }

    pub fn title_ends_with(suffix: impl Into<String>) -> Self {
        Self::Field(FilmField::Title, Match::EndsWith(suffix.into()))
    }

    pub fn year(year: i32) -> Self {
        Self::Field(FilmField::Year, Match::Equals(year.into()))
    }

    pub fn year_in(bounds: Bounds) -> Self {
        Self::Field(FilmField::Year, Match::Range(bounds))
    }

    /// Films whose running time falls within the bounds. Films without a
    /// duration never match.
    pub fn duration_in(bounds: Bounds) -> Self {
        Self::Field(FilmField::Duration, Match::Range(bounds))
    }

    pub fn director(filter: PersonFilter) -> Self {
        Self::Director(Box::new(filter))
    }

    pub fn cast(filter: PersonFilter) -> Self {
        Self::Cast(Box::new(filter))
    }

    fn render(&self, sql: &mut SqlBuilder, alias: &str) -> String {
        match self {
            Self::Field(field, m) => sql.compare(&field.expr(alias), m),
            Self::Director(inner) => {
                let p = sql.alias("d");
                let cond = inner.render(sql, &p);
                format!(
                    "EXISTS (SELECT 1 FROM people {p} WHERE {p}.id = {alias}.director_id AND {cond})"
                )
            }
            Self::Cast(inner) => {
                let c = sql.alias("c");
                let p = sql.alias("p");
                let cond = inner.render(sql, &p);
                format!(
                    "EXISTS (SELECT 1 FROM cast_members {c} JOIN people {p} ON {p}.id = {c}.person_id \
                     WHERE {c}.film_id = {alias}.id AND {cond})"
                )
            }
        }
    }
}

/// A predicate over people.
#[derive(Debug, Clone, PartialEq)]
pub enum PersonFilter {
    Field(PersonField, Match),
    /// The person directed at least one film satisfying the predicate.
    Directed(Box<FilmFilter>),
    /// The person is in the cast of at least one film satisfying the predicate.
    ActedIn(Box<FilmFilter>),
}

impl PersonFilter {
    pub fn id(id: i64) -> Self {
        Self::Field(PersonField::Id, Match::Equals(id.into()))
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::Field(PersonField::Name, Match::Equals(Value::Text(name.into())))
    }

    pub fn name_contains(part: impl Into<String>) -> Self {
        Self::Field(PersonField::Name, Match::Contains(part.into()))
    }

    pub fn name_ends_with(suffix: impl Into<String>) -> Self {
        Self::Field(PersonField::Name, Match::EndsWith(suffix.into()))
    }

    pub fn birth_year(year: i32) -> Self {
        Self::Field(PersonField::BirthYear, Match::Equals(year.into()))
    }

    pub fn birth_year_in(bounds: Bounds) -> Self {
        Self::Field(PersonField::BirthYear, Match::Range(bounds))
    }

    pub fn directed(filter: FilmFilter) -> Self {
        Self::Directed(Box::new(filter))
    }

    pub fn acted_in(filter: FilmFilter) -> Self {
        Self::ActedIn(Box::new(filter))
    }

    fn render(&self, sql: &mut SqlBuilder, alias: &str) -> String {
        match self {
            Self::Field(field, m) => sql.compare(&field.expr(alias), m),
            Self::Directed(inner) => {
                let f = sql.alias("f");
                let cond = inner.render(sql, &f);
                format!(
                    "EXISTS (SELECT 1 FROM films {f} WHERE {f}.director_id = {alias}.id AND {cond})"
                )
            }
            Self::ActedIn(inner) => {
                let c = sql.alias("c");
                let f = sql.alias("f");
                let cond = inner.render(sql, &f);
                format!(
                    "EXISTS (SELECT 1 FROM cast_members {c} JOIN films {f} ON {f}.id = {c}.film_id \
                     WHERE {c}.person_id = {alias}.id AND {cond})"
                )
            }
        }
    }
}

// ── Orderings ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilmOrder {
    /// Natural store order.
    #[default]
    Id,
    YearAsc,
    YearDesc,
    TitleAsc,
}

impl FilmOrder {
    fn render(self, alias: &str) -> String {
        match self {
            Self::Id => format!("{alias}.id"),
            Self::YearAsc => format!("{alias}.year ASC, {alias}.id"),
            Self::YearDesc => format!("{alias}.year DESC, {alias}.id"),
            Self::TitleAsc => format!("{alias}.title ASC, {alias}.id"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PersonOrder {
    #[default]
    Id,
    NameAsc,
}

impl PersonOrder {
    fn render(self, alias: &str) -> String {
        match self {
            Self::Id => format!("{alias}.id"),
            Self::NameAsc => format!("{alias}.name ASC, {alias}.id"),
        }
    }
}

// ── Rendering ───────────────────────────────────────────────────────────────

/// Accumulates bound parameters and hands out unique table aliases while a
/// filter tree is rendered.
#[derive(Debug, Default)]
pub struct SqlBuilder {
    params: Vec<SqlValue>,
    aliases: usize,
}

impl SqlBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn alias(&mut self, prefix: &str) -> String {
        self.aliases += 1;
        format!("{prefix}{}", self.aliases)
    }

    fn bind(&mut self, value: impl Into<SqlValue>) -> String {
        self.params.push(value.into());
        format!("?{}", self.params.len())
    }

    fn compare(&mut self, expr: &str, m: &Match) -> String {
        match m {
            Match::Equals(v) => {
                let p = self.bind(v.clone());
                format!("{expr} = {p}")
            }
            Match::Contains(s) => {
                let p = self.bind(format!("%{}%", escape_like(s)));
                format!("{expr} LIKE {p} ESCAPE '\\'")
            }
            Match::EndsWith(s) => {
                let p = self.bind(format!("%{}", escape_like(s)));
                format!("{expr} LIKE {p} ESCAPE '\\'")
            }
            Match::Range(b) => match (b.min, b.max) {
                (Some(lo), Some(hi)) => {
                    let lo = self.bind(lo);
                    let hi = self.bind(hi);
                    format!("{expr} BETWEEN {lo} AND {hi}")
                }
                (Some(lo), None) => {
                    let lo = self.bind(lo);
                    format!("{expr} >= {lo}")
                }
                (None, Some(hi)) => {
                    let hi = self.bind(hi);
                    format!("{expr} <= {hi}")
                }
                // Bounds::new never builds this.
                (None, None) => "1 = 1".to_string(),
            },
        }
    }

    /// Render a film filter conjunction rooted at `alias`.
    pub(crate) fn film_conditions(&mut self, filters: &[FilmFilter], alias: &str) -> String {
        let parts: Vec<String> = filters.iter().map(|f| f.render(self, alias)).collect();
        join_conditions(parts)
    }

    pub(crate) fn person_conditions(&mut self, filters: &[PersonFilter], alias: &str) -> String {
        let parts: Vec<String> = filters.iter().map(|f| f.render(self, alias)).collect();
        join_conditions(parts)
    }

    pub(crate) fn bind_value(&mut self, value: impl Into<SqlValue>) -> String {
        self.bind(value)
    }

    pub(crate) fn into_params(self) -> Vec<SqlValue> {
        self.params
    }
}

fn join_conditions(parts: Vec<String>) -> String {
    if parts.is_empty() {
        "1 = 1".to_string()
    } else {
        parts.join(" AND ")
    }
}

/// Escape `LIKE` wildcards so user text only matches literally.
pub fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Prefix every column of a `Record::COLUMNS` list with a table alias.
pub(crate) fn qualified_columns(alias: &str, columns: &str) -> String {
    columns
        .split(',')
        .map(|c| format!("{alias}.{}", c.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Query builder ───────────────────────────────────────────────────────────

/// An entity kind that the query builder can filter and order.
pub trait Queryable: Record {
    type Filter: std::fmt::Debug + Clone;
    type Order: std::fmt::Debug + Copy + Default;

    const ALIAS: &'static str;

    fn conditions(sql: &mut SqlBuilder, filters: &[Self::Filter]) -> String;

    fn order_clause(order: Self::Order) -> String;
}

impl Queryable for Film {
    type Filter = FilmFilter;
    type Order = FilmOrder;

    const ALIAS: &'static str = "f0";

    fn conditions(sql: &mut SqlBuilder, filters: &[FilmFilter]) -> String {
        sql.film_conditions(filters, Self::ALIAS)
    }

    fn order_clause(order: FilmOrder) -> String {
        order.render(Self::ALIAS)
    }
}

impl Queryable for Person {
    type Filter = PersonFilter;
    type Order = PersonOrder;

    const ALIAS: &'static str = "p0";

    fn conditions(sql: &mut SqlBuilder, filters: &[PersonFilter]) -> String {
        sql.person_conditions(filters, Self::ALIAS)
    }

    fn order_clause(order: PersonOrder) -> String {
        order.render(Self::ALIAS)
    }
}

/// A conjunction of filters with one ordering and optional paging.
#[derive(Debug, Clone)]
pub struct Query<R: Queryable> {
    filters: Vec<R::Filter>,
    order: R::Order,
    page: Option<(u32, u32)>,
}

pub type FilmQuery = Query<Film>;
pub type PersonQuery = Query<Person>;

impl<R: Queryable> Default for Query<R> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            order: R::Order::default(),
            page: None,
        }
    }
}

impl<R: Queryable> Query<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: R::Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, order: R::Order) -> Self {
        self.order = order;
        self
    }

    /// Offset+limit paging.
    pub fn page(mut self, skip: u32, limit: u32) -> Self {
        self.page = Some((skip, limit));
        self
    }

    /// Render the `SELECT` statement and its parameters.
    pub fn to_sql(&self) -> (String, Vec<SqlValue>) {
        let mut sql = SqlBuilder::new();
        let cond = R::conditions(&mut sql, &self.filters);
        let mut text = format!(
            "SELECT {} FROM {} {} WHERE {} ORDER BY {}",
            qualified_columns(R::ALIAS, R::COLUMNS),
            R::TABLE,
            R::ALIAS,
            cond,
            R::order_clause(self.order),
        );
        if let Some((skip, limit)) = self.page {
            let limit = sql.bind_value(i64::from(limit));
            let skip = sql.bind_value(i64::from(skip));
            text.push_str(&format!(" LIMIT {limit} OFFSET {skip}"));
        }
        (text, sql.into_params())
    }

    /// Run the query.
    pub fn fetch(&self, conn: &Connection) -> Result<Vec<R>, StoreError> {
        let (text, params) = self.to_sql();
        log::trace!("{text}");
        let mut stmt = conn.prepare(&text)?;
        let rows = stmt.query_map(params_from_iter(params), R::from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Count matching rows, ignoring ordering and paging.
    pub fn count(&self, conn: &Connection) -> Result<i64, StoreError> {
        let mut sql = SqlBuilder::new();
        let cond = R::conditions(&mut sql, &self.filters);
        let text = format!(
            "SELECT COUNT(*) FROM {} {} WHERE {}",
            R::TABLE,
            R::ALIAS,
            cond
        );
        let n = conn.query_row(&text, params_from_iter(sql.into_params()), |r| r.get(0))?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_range_is_rejected() {
        assert_eq!(Bounds::new(None, None), None);
        assert_eq!(Bounds::new(Some(2000), None), Some(Bounds::at_least(2000)));
        assert_eq!(Bounds::new(None, Some(2010)), Some(Bounds::at_most(2010)));
    }

    #[test]
    fn bounds_are_inclusive() {
        let b = Bounds::between(2000, 2010);
        assert!(b.contains(2000));
        assert!(b.contains(2010));
        assert!(!b.contains(1999));
        assert!(!b.contains(2011));
        assert!(Bounds::at_most(1990).contains(-5));
    }

    #[test]
    fn escape_like_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\x"), "c:\\\\x");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn two_sided_range_renders_between() {
        let (sql, params) = FilmQuery::new()
            .filter(FilmFilter::year_in(Bounds::between(1990, 1999)))
            .order_by(FilmOrder::YearAsc)
            .to_sql();
        assert!(sql.contains("f0.year BETWEEN ?1 AND ?2"), "{sql}");
        assert!(sql.ends_with("ORDER BY f0.year ASC, f0.id"), "{sql}");
        assert_eq!(params, vec![SqlValue::Integer(1990), SqlValue::Integer(1999)]);
    }

    #[test]
    fn filters_are_conjoined_in_order() {
        let (sql, params) = FilmQuery::new()
            .filter(FilmFilter::title_contains("cept"))
            .filter(FilmFilter::year(2010))
            .to_sql();
        assert!(
            sql.contains("f0.title LIKE ?1 ESCAPE '\\' AND f0.year = ?2"),
            "{sql}"
        );
        assert_eq!(
            params,
            vec![SqlValue::Text("%cept%".into()), SqlValue::Integer(2010)]
        );
    }

    #[test]
    fn suffix_match_anchors_at_end() {
        let (_, params) = PersonQuery::new()
            .filter(PersonFilter::name_ends_with("son"))
            .to_sql();
        assert_eq!(params, vec![SqlValue::Text("%son".into())]);
    }

    #[test]
    fn join_filter_uses_fresh_aliases() {
        let (sql, _) = FilmQuery::new()
            .filter(FilmFilter::cast(PersonFilter::name_ends_with("son")))
            .filter(FilmFilter::director(PersonFilter::name("Nolan")))
            .to_sql();
        assert!(sql.contains("FROM cast_members c1 JOIN people p2"), "{sql}");
        assert!(sql.contains("FROM people d3 WHERE d3.id = f0.director_id"), "{sql}");
    }

    #[test]
    fn paging_binds_after_filters() {
        let (sql, params) = PersonQuery::new()
            .filter(PersonFilter::birth_year(1974))
            .page(5, 10)
            .to_sql();
        assert!(sql.ends_with("LIMIT ?2 OFFSET ?3"), "{sql}");
        assert_eq!(params[1], SqlValue::Integer(10));
        assert_eq!(params[2], SqlValue::Integer(5));
    }

    #[test]
    fn empty_query_selects_everything() {
        let (sql, params) = PersonQuery::new().to_sql();
        assert_eq!(
            sql,
            "SELECT p0.id, p0.name, p0.birthdate FROM people p0 WHERE 1 = 1 ORDER BY p0.id"
        );
        assert!(params.is_empty());
    }
}
