//! Pipeline stages for business card extraction.

pub mod assemble;
pub mod envelope;
pub mod format;
pub mod json_fields;
pub mod patterns;
pub mod plain_text;
pub mod repair;
pub mod synonyms;

pub use assemble::{RecordAssembler, UNPARSABLE_JSON_PREFIX, UNRECOGNIZED_PREFIX};
pub use envelope::unwrap_envelope;
pub use format::{classify, ResponseFormat};
pub use json_fields::map_json;
pub use plain_text::{FieldTable, PlainTextExtractor};
pub use repair::{balance_braces, parse_repaired, quote_phone_numbers, repair};
pub use synonyms::{resolve_label, resolve_property, SynonymRule, ValueShape, SYNONYM_RULES};
