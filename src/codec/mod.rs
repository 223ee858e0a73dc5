//! Hand-written tagged-text codec for the vehicle collection.
//!
//! This is deliberately not an XML parser: the writer emits one fixed layout
//! and the reader pulls known tags out by name.

pub mod reader;
pub mod tags;
pub mod writer;

pub use reader::{parse_document, parse_vehicle};
pub use tags::extract_tag;
pub use writer::{escape_xml, to_document, unescape_xml};
