use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown style field `{0}`")]
    UnknownField(String),
    #[error("style field `{0}` is not a number")]
    NotNumeric(String),
}
