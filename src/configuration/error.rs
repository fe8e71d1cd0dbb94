use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("formatter configuration '{path}' file does not exist.")]
    NotFound { path: String },

    #[error("unable to open formatter configuration '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("XML-Error: {0}")]
    Xml(#[from] xml::reader::Error),

    #[error("invalid unit base {0}, it must be greater than 1")]
    InvalidBase(u64),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("invalid unit kind value '{0}'.")]
    UnknownUnitKind(String),

    #[error("the {kind} units need exactly 4 labels, got {count}")]
    InvalidUnitCount { kind: String, count: usize },
}
