//! Transformation core for the order migration: decodes embedded payloads
//! (address, variants, metadata) and produces target-schema records with
//! per-record failure isolation.

pub mod address;
pub mod assemble;
pub mod error;
pub mod meta;
pub mod record;
pub mod text;
pub mod variants;

pub use address::{normalize_address, normalize_phone};
pub use assemble::assemble_line_items;
pub use error::ValidationError;
pub use meta::{expand_meta, parse_meta_pairs};
pub use record::{TransformOutcome, transform_record};
pub use text::{collapse_whitespace, slugify, title_case};
pub use variants::decode_variants;
