#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid catalogue: {0}")]
    InvalidCatalogue(String),
    #[error("duplicate {collection} id: {id}")]
    DuplicateId {
        collection: &'static str,
        id: String,
    },
    #[error("{collection} not found: {id}")]
    NotFound {
        collection: &'static str,
        id: String,
    },
    #[error("failed to read file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to serialize JSON: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize JSON: {0}")]
    Deserialization(serde_json::Error),
    #[error("catalogue schema mismatch at {path}: {source}")]
    YamlDeserialization {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid {field}: {source}")]
    Text {
        field: &'static str,
        #[source]
        source: citas_types::TextError,
    },
    #[error("authentication failed: {0}")]
    Auth(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
