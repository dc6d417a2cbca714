//! Record loading and writing: the CSV collaborators behind the batch
//! processor's source/sink seams, plus the meta mapping rule loader.

pub mod error;
pub mod reader;
pub mod rules;
pub mod writer;

pub use error::IngestError;
pub use reader::CsvOrderSource;
pub use rules::load_meta_mapping;
pub use writer::ShopifyCsvSink;
