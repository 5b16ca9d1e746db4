//! Filter fields and the per-field selection map.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::record::{category_label, RecordFields};

/// Label of the implicit "no constraint" option shown first in every control.
pub const ALL_OPTION: &str = "All";

/// A categorical record field the dashboard can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    EndYear,
    Topic,
    Sector,
    Region,
    Pest,
    Source,
    Swot,
    Country,
    City,
}

impl FilterField {
    /// All filter fields in display order.
    pub const ALL: [FilterField; 9] = [
        FilterField::EndYear,
        FilterField::Topic,
        FilterField::Sector,
        FilterField::Region,
        FilterField::Pest,
        FilterField::Source,
        FilterField::Swot,
        FilterField::Country,
        FilterField::City,
    ];

    /// Wire name of the field, as used in the JSON records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EndYear => "end_year",
            Self::Topic => "topic",
            Self::Sector => "sector",
            Self::Region => "region",
            Self::Pest => "pest",
            Self::Source => "source",
            Self::Swot => "swot",
            Self::Country => "country",
            Self::City => "city",
        }
    }

    /// Human label for filter controls ("end_year" -> "End year").
    pub fn label(&self) -> String {
        let spaced = self.as_str().replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Raw value of this field on a record.
    pub fn raw_value<'a>(&self, fields: &'a RecordFields) -> Option<&'a str> {
        let value = match self {
            Self::EndYear => &fields.end_year,
            Self::Topic => &fields.topic,
            Self::Sector => &fields.sector,
            Self::Region => &fields.region,
            Self::Pest => &fields.pest,
            Self::Source => &fields.source,
            Self::Swot => &fields.swot,
            Self::Country => &fields.country,
            Self::City => &fields.city,
        };
        value.as_deref()
    }

    /// Normalized value of this field on a record.
    pub fn category<'a>(&self, fields: &'a RecordFields) -> &'a str {
        category_label(self.raw_value(fields))
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown filter field '{s}'"))
    }
}

/// One `field=value` selection, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub field: FilterField,
    pub value: String,
}

impl FromStr for FilterSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
        Ok(Self {
            field: field.trim().parse()?,
            value: value.to_string(),
        })
    }
}

/// Current selection per filter field. An empty value means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    selections: BTreeMap<FilterField, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a value for a field. An empty value or [`ALL_OPTION`] clears the constraint.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() || value == ALL_OPTION {
            self.selections.remove(&field);
        } else {
            self.selections.insert(field, value);
        }
    }

    /// Builder-style [`FilterSet::set`].
    pub fn with(mut self, field: FilterField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Selected value for a field, or `""` when unconstrained.
    pub fn get(&self, field: FilterField) -> &str {
        self.selections.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Fields with a non-empty selection.
    pub fn active(&self) -> impl Iterator<Item = (FilterField, &str)> {
        self.selections
            .iter()
            .map(|(field, value)| (*field, value.as_str()))
    }

    /// Whether a record passes every active constraint.
    pub fn matches(&self, fields: &RecordFields) -> bool {
        self.active()
            .all(|(field, selected)| field.category(fields) == selected)
    }
}
