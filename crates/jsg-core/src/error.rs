use thiserror::Error;

/// Errors reading or decoding an input schema document. serde_json reports
/// the line and column of syntax and shape errors, derived from the byte
/// offset of the failure.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read input file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse JSON schema {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("input file {0} has no $schema key")]
    MissingSchemaKey(String),
}

/// Errors resolving a `$ref` against the indexed documents.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("schema at {0} has an empty $ref")]
    EmptyReference(String),

    #[error("reference {reference:?} not found at {at:?}")]
    RefNotFound { reference: String, at: String },

    #[error("duplicate schema identity {0}")]
    DuplicateIdentity(String),
}

/// Errors producing the output type model.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("schema at {at}: {detail}")]
    Inconsistent { at: String, detail: String },
}

/// Any failure of the whole pipeline. There is no partial output: the first
/// error aborts the run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}
