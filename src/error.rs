#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A pattern's regex source failed to compile.
    #[error("pattern {id}: invalid regex {regex:?}: {source}")]
    InvalidPattern {
        id: u32,
        regex: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    /// A required string field was empty.
    #[error("{kind} {id}: field `{field}` must not be empty")]
    EmptyField {
        kind: &'static str,
        id: u32,
        field: &'static str,
    },

    /// Two records (or two patterns in one set) share an id.
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u32 },

    /// A record references an id that does not exist in the catalogue.
    #[error("{kind} {id} references unknown {target} id {target_id}")]
    UnknownReference {
        kind: &'static str,
        id: u32,
        target: &'static str,
        target_id: u32,
    },

    /// A device category token is not one of the known category names.
    #[error("unknown device category token {token:?}")]
    UnknownCategory { token: String },

    /// Two device-category records resolve to the same category.
    #[error("duplicate device category {category:?}")]
    DuplicateCategory { category: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    AhoCorasick(#[from] aho_corasick::BuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
