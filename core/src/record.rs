use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Identifier as it appears in the snapshot, whatever its JSON type.
///
/// Lookups never compare the raw values; they compare [`MovieId::key`], so a
/// client asking for `"42"` finds a record stored as `42`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub Value);

impl MovieId {
    /// Canonical string form used for loose-equality matching.
    pub fn key(&self) -> String {
        value_text(&self.0)
    }

    /// `null` never matches anything.
    pub fn matches(&self, requested: &str) -> bool {
        !self.0.is_null() && self.key() == requested
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl From<&str> for MovieId {
    fn from(s: &str) -> Self {
        MovieId(Value::String(s.to_string()))
    }
}

impl From<i64> for MovieId {
    fn from(n: i64) -> Self {
        MovieId(Value::Number(n.into()))
    }
}

/// Text of a JSON value as a browser would print it: strings verbatim,
/// integral numbers without a fraction, `null` as `"null"`.
pub fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        // 42.0 and 42 are the same id
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Numeric reading of a JSON value with the coercions a relational compare
/// applies: numeric strings parse (blank is 0), booleans are 0/1. Anything else
/// has no numeric value.
pub fn numeric_value(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse().ok().filter(|f: &f64| !f.is_nan()),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        _ => None,
    }
}

fn field_text(v: &Option<Value>) -> Option<String> {
    v.as_ref().map(value_text)
}

/// One entry of the snapshot file.
///
/// Nothing is validated. Named fields keep whatever JSON value the snapshot
/// has (`null` reads as absent), fields this type does not name are carried in
/// `extra`, and an entry that is not an object becomes an empty record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct MovieRecord {
    pub id: Option<MovieId>,
    pub title: Option<Value>,
    pub tagline: Option<Value>,
    pub vote_average: Option<Value>,
    pub runtime: Option<Value>,
    /// `DD/MM/YY` or `DD/MM/YYYY`
    pub release_date: Option<Value>,
    pub overview: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Value> for MovieRecord {
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };
        let mut take = |key: &str| map.shift_remove(key).filter(|v| !v.is_null());
        Self {
            id: take("id").map(MovieId),
            title: take("title"),
            tagline: take("tagline"),
            vote_average: take("vote_average"),
            runtime: take("runtime"),
            release_date: take("release_date"),
            overview: take("overview"),
            extra: map,
        }
    }
}

impl MovieRecord {
    pub fn rating(&self) -> Option<f64> {
        self.vote_average.as_ref().and_then(numeric_value)
    }

    pub fn has_id(&self, requested: &str) -> bool {
        self.id.as_ref().is_some_and(|id| id.matches(requested))
    }

    pub fn list_item(&self) -> ListItemView {
        ListItemView::from(self)
    }

    pub fn title_text(&self) -> Option<String> {
        field_text(&self.title)
    }

    pub fn tagline_text(&self) -> Option<String> {
        field_text(&self.tagline)
    }

    pub fn runtime_text(&self) -> Option<String> {
        field_text(&self.runtime)
    }

    pub fn rating_text(&self) -> Option<String> {
        field_text(&self.vote_average)
    }

    pub fn release_date_text(&self) -> Option<String> {
        field_text(&self.release_date)
    }

    pub fn overview_text(&self) -> Option<String> {
        field_text(&self.overview)
    }
}

/// Reduced projection served by the list endpoint. Always serializes exactly
/// these four keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItemView {
    pub id: Option<MovieId>,
    pub title: Option<Value>,
    pub tagline: Option<Value>,
    pub vote_average: Option<Value>,
}

impl ListItemView {
    pub fn rating(&self) -> Option<f64> {
        self.vote_average.as_ref().and_then(numeric_value)
    }

    pub fn title_text(&self) -> Option<String> {
        field_text(&self.title)
    }

    pub fn tagline_text(&self) -> Option<String> {
        field_text(&self.tagline)
    }

    pub fn rating_text(&self) -> Option<String> {
        field_text(&self.vote_average)
    }
}

impl From<&MovieRecord> for ListItemView {
    fn from(m: &MovieRecord) -> Self {
        Self {
            id: m.id.clone(),
            title: m.title.clone(),
            tagline: m.tagline.clone(),
            vote_average: m.vote_average.clone(),
        }
    }
}
