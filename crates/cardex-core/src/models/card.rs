//! Business card record produced by the extraction pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A business card extracted from a model response.
///
/// Every field is independently optional; an empty card is a valid result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessCard {
    /// Given name, or full name when no surname was reported separately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,

    /// Academic or professional titles.
    #[serde(alias = "title", skip_serializing_if = "Option::is_none")]
    pub titles: Option<String>,

    /// Company or institution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    /// Phone number as written on the card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Email addresses in the order they were found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<String>>,

    /// Postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Website.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_address: Option<String>,

    /// Fax number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,

    /// Raw text kept when extraction degraded to a fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

/// Canonical fields a label or JSON property can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalField {
    Name,
    Surname,
    Titles,
    Organization,
    Phone,
    Emails,
    Address,
    WebAddress,
    Fax,
}

impl CanonicalField {
    /// All fields in record order.
    pub const ALL: [CanonicalField; 9] = [
        CanonicalField::Name,
        CanonicalField::Surname,
        CanonicalField::Titles,
        CanonicalField::Organization,
        CanonicalField::Phone,
        CanonicalField::Emails,
        CanonicalField::Address,
        CanonicalField::WebAddress,
        CanonicalField::Fax,
    ];

    /// Serialized name of the field on [`BusinessCard`].
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Name => "name",
            CanonicalField::Surname => "surname",
            CanonicalField::Titles => "titles",
            CanonicalField::Organization => "organization",
            CanonicalField::Phone => "phone",
            CanonicalField::Emails => "emails",
            CanonicalField::Address => "address",
            CanonicalField::WebAddress => "webAddress",
            CanonicalField::Fax => "fax",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BusinessCard {
    /// Create an empty card.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a single value into a canonical field, replacing what was there.
    ///
    /// `Emails` is stored as a one-element sequence.
    pub fn set(&mut self, field: CanonicalField, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            CanonicalField::Name => self.name = value,
            CanonicalField::Surname => self.surname = value,
            CanonicalField::Titles => self.titles = value,
            CanonicalField::Organization => self.organization = value,
            CanonicalField::Phone => self.phone = value,
            CanonicalField::Emails => self.emails = value.map(|v| vec![v]),
            CanonicalField::Address => self.address = value,
            CanonicalField::WebAddress => self.web_address = value,
            CanonicalField::Fax => self.fax = value,
        }
    }

    /// Scalar value of a field. For `Emails` this is the first address.
    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        match field {
            CanonicalField::Name => self.name.as_deref(),
            CanonicalField::Surname => self.surname.as_deref(),
            CanonicalField::Titles => self.titles.as_deref(),
            CanonicalField::Organization => self.organization.as_deref(),
            CanonicalField::Phone => self.phone.as_deref(),
            CanonicalField::Emails => self
                .emails
                .as_ref()
                .and_then(|e| e.first())
                .map(String::as_str),
            CanonicalField::Address => self.address.as_deref(),
            CanonicalField::WebAddress => self.web_address.as_deref(),
            CanonicalField::Fax => self.fax.as_deref(),
        }
    }

    /// True when no contact field was extracted. `additionalInfo` is ignored.
    pub fn is_empty(&self) -> bool {
        CanonicalField::ALL.iter().all(|f| self.get(*f).is_none())
            && self.emails.as_ref().is_none_or(|e| e.is_empty())
    }

    /// Names of the fields that carry a value.
    pub fn present_fields(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_some())
            .collect()
    }

    /// Emails joined with `"; "`, for flat output formats.
    pub fn emails_joined(&self) -> String {
        self.emails
            .as_ref()
            .map(|e| e.join("; "))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serializes_camel_case_and_skips_absent() {
        let card = BusinessCard {
            name: Some("Ada".to_string()),
            web_address: Some("ada.dev".to_string()),
            emails: Some(vec!["ada@example.com".to_string()]),
            ..Default::default()
        };

        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Ada","emails":["ada@example.com"],"webAddress":"ada.dev"}"#
        );
    }

    #[test]
    fn test_title_alias_on_input() {
        let card: BusinessCard = serde_json::from_str(r#"{"title":"Dr."}"#).unwrap();
        assert_eq!(card.titles.as_deref(), Some("Dr."));
    }

    #[test]
    fn test_set_emails_wraps_single_value() {
        let mut card = BusinessCard::new();
        card.set(CanonicalField::Emails, "a@x.com");
        card.set(CanonicalField::Emails, "b@x.com");
        assert_eq!(card.emails, Some(vec!["b@x.com".to_string()]));
    }

    #[test]
    fn test_is_empty_ignores_additional_info() {
        let mut card = BusinessCard::new();
        card.additional_info = Some("raw".to_string());
        assert!(card.is_empty());

        card.emails = Some(Vec::new());
        assert!(card.is_empty());

        card.set(CanonicalField::Fax, "123");
        assert!(!card.is_empty());
        assert_eq!(card.present_fields(), vec![CanonicalField::Fax]);
    }
}
