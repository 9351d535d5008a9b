// Screener sort keys, e.g. "change_pct_desc"
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::fields::RangeField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A registered field plus a direction, serialized as `<field>_<asc|desc>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SortKey {
    pub field: RangeField,
    pub direction: SortDirection,
}

impl SortKey {
    pub const fn new(field: RangeField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::new(RangeField::ChangePct, SortDirection::Desc)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}_{}", self.field.name(), direction)
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s
            .trim()
            .rsplit_once('_')
            .ok_or_else(|| format!("Invalid sort key '{}'", s))?;
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => return Err(format!("Unknown sort direction '{}' in '{}'", other, s)),
        };
        let field = RangeField::from_name(field)
            .ok_or_else(|| format!("Unknown sort field '{}' in '{}'", field, s))?;
        Ok(SortKey::new(field, direction))
    }
}

impl TryFrom<String> for SortKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.to_string()
    }
}
