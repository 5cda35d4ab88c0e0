//! References to range-valued attributes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::error::Error;

/// Identifies one attribute of one relation, e.g. `bookings.during`.
///
/// This is the key statistics are looked up by. It carries no catalog
/// identity of its own; two references are equal when both names match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttributeRef {
    /// Relation (table) name.
    pub relation: String,
    /// Attribute (column) name.
    pub attribute: String,
}

impl AttributeRef {
    /// Creates a new attribute reference.
    #[must_use]
    pub fn new(relation: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            attribute: attribute.into(),
        }
    }
}

impl fmt::Display for AttributeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.relation, self.attribute)
    }
}

impl FromStr for AttributeRef {
    type Err = Error;

    /// Parses `relation.attribute`. The split happens at the last dot so
    /// schema-qualified relations such as `public.bookings.during` work.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (relation, attribute) = s
            .rsplit_once('.')
            .ok_or_else(|| Error::InvalidAttributeRef(s.to_string()))?;
        if relation.is_empty() || attribute.is_empty() {
            return Err(Error::InvalidAttributeRef(s.to_string()));
        }
        Ok(Self::new(relation, attribute))
    }
}
