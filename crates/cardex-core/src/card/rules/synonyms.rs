//! Ordered synonym table shared by the plain-text and JSON extractors.
//!
//! Labels and property names resolve to a [`CanonicalField`] by
//! case-insensitive substring containment. Rules are checked top to bottom and
//! the first applicable rule wins, so the order below is the precedence.

use serde_json::Value;

use crate::models::card::CanonicalField;

/// JSON value shapes a rule accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// A string (numbers are stringified).
    Scalar,
    /// A string, or an array whose first non-blank element is taken.
    FirstOf,
    /// Arrays only; every non-blank element is kept.
    List,
    /// A string, or an object flattened to `key:value` pairs.
    Address,
    /// A string, or an object carrying a nested `phone_number`.
    Fax,
}

impl ValueShape {
    /// Whether a rule with this shape claims a property holding `value`.
    ///
    /// A rule that does not claim the property lets later rules try it.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ValueShape::List => value.is_array(),
            _ => true,
        }
    }
}

/// One synonym rule for a canonical field.
#[derive(Debug, Clone, Copy)]
pub struct SynonymRule {
    pub field: CanonicalField,
    /// Any of these contained in the label selects the rule.
    pub include: &'static [&'static str],
    /// Any of these contained in the label vetoes the rule.
    pub exclude: &'static [&'static str],
    pub shape: ValueShape,
}

impl SynonymRule {
    /// Whether a lower-cased label selects this rule.
    pub fn matches(&self, label: &str) -> bool {
        self.include.iter().any(|p| label.contains(p))
            && !self.exclude.iter().any(|p| label.contains(p))
    }
}

const SURNAME_PHRASES: &[&str] = &["surname", "last name", "last_name", "lastname"];

/// The synonym table in precedence order.
pub static SYNONYM_RULES: &[SynonymRule] = &[
    SynonymRule {
        field: CanonicalField::Name,
        include: &["full name", "name"],
        exclude: &[
            "surname",
            "last name",
            "last_name",
            "lastname",
            "organization",
            "company",
        ],
        shape: ValueShape::Scalar,
    },
    SynonymRule {
        field: CanonicalField::Surname,
        include: SURNAME_PHRASES,
        exclude: &[],
        shape: ValueShape::Scalar,
    },
    SynonymRule {
        field: CanonicalField::Titles,
        include: &["title"],
        exclude: &[],
        shape: ValueShape::Scalar,
    },
    SynonymRule {
        field: CanonicalField::Organization,
        include: &["organization", "organisation", "company"],
        exclude: &[],
        shape: ValueShape::Scalar,
    },
    SynonymRule {
        field: CanonicalField::Phone,
        include: &["phone", "telefon", "mobile", "gsm"],
        exclude: &[],
        shape: ValueShape::FirstOf,
    },
    SynonymRule {
        field: CanonicalField::Emails,
        include: &["email", "e-mail"],
        exclude: &[],
        shape: ValueShape::List,
    },
    SynonymRule {
        field: CanonicalField::Address,
        include: &["address", "adres"],
        exclude: &["web", "email", "e-mail"],
        shape: ValueShape::Address,
    },
    SynonymRule {
        field: CanonicalField::WebAddress,
        include: &["webaddress", "web address", "web"],
        exclude: &[],
        shape: ValueShape::Scalar,
    },
    SynonymRule {
        field: CanonicalField::Fax,
        include: &["fax"],
        exclude: &[],
        shape: ValueShape::Fax,
    },
];

/// Normalize a label or property name for matching.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Resolve a plain-text label, ignoring value shapes.
pub fn resolve_label(label: &str) -> Option<CanonicalField> {
    let label = normalize_label(label);
    SYNONYM_RULES
        .iter()
        .find(|rule| rule.matches(&label))
        .map(|rule| rule.field)
}

/// Resolve a JSON property to the rule that claims it.
pub fn resolve_property(name: &str, value: &Value) -> Option<&'static SynonymRule> {
    let name = normalize_label(name);
    SYNONYM_RULES
        .iter()
        .find(|rule| rule.matches(&name) && rule.shape.accepts(value))
}
