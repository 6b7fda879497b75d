use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Cannot find type \"{0}\"")]
    UnknownType(String),

    #[error("The type \"{0}\" is defined twice")]
    DuplicateType(String),

    #[error("Signature of type \"{0}\" is unknown")]
    OpaqueSignature(String),

    #[error("Unsupported backend: {0}")]
    UnknownBackend(String),
}
