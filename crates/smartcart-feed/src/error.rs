use thiserror::Error;

/// Errors while parsing feed XML into raw records.
///
/// Only document-level problems surface here. A garbage *record* inside
/// well-formed XML is delivered raw; judging field corruption is the
/// normalizer's job, not the adapter's.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("malformed feed XML: {0}")]
    Xml(#[from] quick_xml::Error),
}
