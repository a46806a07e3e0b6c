//! Request parameter model
//!
//! A closed set of scalar kinds plus lists of them. Every value renders to
//! one canonical string; lists join their elements with commas.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::Value;

use crate::error::{GitHubError, Result};

/// A single request parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Fixed vocabulary value such as a sort key
    Enum(&'static str),
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Canonical string form used in paths and query strings
    pub fn render(&self) -> String {
        match self {
            ParamValue::Str(s) => s.clone(),
            ParamValue::Int(i) => i.to_string(),
            ParamValue::Float(f) => f.to_string(),
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Enum(e) => (*e).to_string(),
            ParamValue::List(items) => items
                .iter()
                .map(ParamValue::render)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// JSON form used in write-call bodies
    pub fn to_json(&self) -> Result<Value> {
        Ok(match self {
            ParamValue::Str(s) => Value::String(s.clone()),
            ParamValue::Int(i) => Value::from(*i),
            ParamValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .ok_or_else(|| {
                    GitHubError::Encoding(format!("{f} has no JSON representation"))
                })?,
            ParamValue::Bool(b) => Value::Bool(*b),
            ParamValue::Enum(e) => Value::String((*e).to_string()),
            ParamValue::List(items) => Value::Array(
                items
                    .iter()
                    .map(ParamValue::to_json)
                    .collect::<Result<Vec<_>>>()?,
            ),
        })
    }

    /// Integer view, used by the pagination rules
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            ParamValue::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Conversion into a [`ParamValue`]
pub trait ToParam {
    fn to_param(&self) -> ParamValue;
}

impl ToParam for ParamValue {
    fn to_param(&self) -> ParamValue {
        self.clone()
    }
}

impl ToParam for str {
    fn to_param(&self) -> ParamValue {
        ParamValue::Str(self.to_string())
    }
}

impl ToParam for String {
    fn to_param(&self) -> ParamValue {
        ParamValue::Str(self.clone())
    }
}

impl ToParam for bool {
    fn to_param(&self) -> ParamValue {
        ParamValue::Bool(*self)
    }
}

impl ToParam for f64 {
    fn to_param(&self) -> ParamValue {
        ParamValue::Float(*self)
    }
}

macro_rules! int_param {
    ($($t:ty),*) => {
        $(
            impl ToParam for $t {
                fn to_param(&self) -> ParamValue {
                    ParamValue::Int(*self as i64)
                }
            }
        )*
    };
}

int_param!(i32, i64, u8, u16, u32, usize);

impl ToParam for u64 {
    fn to_param(&self) -> ParamValue {
        match i64::try_from(*self) {
            Ok(i) => ParamValue::Int(i),
            Err(_) => ParamValue::Str(self.to_string()),
        }
    }
}

impl ToParam for DateTime<Utc> {
    fn to_param(&self) -> ParamValue {
        ParamValue::Str(self.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

impl ToParam for NaiveDate {
    fn to_param(&self) -> ParamValue {
        ParamValue::Str(self.format("%Y-%m-%d").to_string())
    }
}

impl<T: ToParam> ToParam for [T] {
    fn to_param(&self) -> ParamValue {
        ParamValue::List(self.iter().map(ToParam::to_param).collect())
    }
}

impl<T: ToParam> ToParam for Vec<T> {
    fn to_param(&self) -> ParamValue {
        self.as_slice().to_param()
    }
}

impl<T: ToParam + ?Sized> ToParam for &T {
    fn to_param(&self) -> ParamValue {
        (**self).to_param()
    }
}

/// Named parameters for one call
///
/// Keys are unique; inserting an existing key replaces its value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: BTreeMap<String, ParamValue>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl ToParam) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder-style insert that skips `None`
    pub fn with_opt<T: ToParam>(mut self, key: impl Into<String>, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToParam) {
        self.values.insert(key.into(), value.to_param());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.values.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// JSON object of every parameter, for write-call bodies
    pub fn to_json_object(&self) -> Result<serde_json::Map<String, Value>> {
        self.values
            .iter()
            .map(|(k, v)| Ok((k.clone(), v.to_json()?)))
            .collect()
    }
}

impl IntoIterator for Params {
    type Item = (String, ParamValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
