mod document;
mod field;
mod relationship;
mod schema;

pub use document::{preview_string, CollectionInfo, SampleBatch, SampledDocument};
pub use field::{humanize_field_name, FormField, GeneratedFieldsResponse, LookupConfig};
pub use relationship::DetectedRelationship;
pub use schema::{CollectionSchema, FieldSchema, TypeTag};
