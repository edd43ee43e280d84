use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

/// The result type used across the appraiser crate.
pub type Result<T> = std::result::Result<T, AppraisalError>;

/// Everything that can go wrong while loading assets, predicting or training.
#[derive(Debug)]
pub enum AppraisalError {
    /// A file could not be read or written.
    Io { path: PathBuf, source: io::Error },

    /// A file was read but its JSON could not be decoded.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A feature the pipeline or the form needs is absent.
    MissingFeature(String),

    /// A feature is present but holds the wrong kind of value.
    FeatureKind {
        name: String,
        expected: &'static str,
    },

    /// A shape invariant was violated (e.g. coefficient count vs encoded width).
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },

    /// The model artifact is structurally broken.
    InvalidModel(String),

    /// The training CSV could not be used.
    Dataset { line: usize, msg: String },
}

impl AppraisalError {
    /// Returns true when the underlying cause is a file that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

impl Display for AppraisalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot access '{}': {source}", path.display()),
            Self::Parse { path, source } => {
                write!(f, "invalid JSON in '{}': {source}", path.display())
            }
            Self::MissingFeature(name) => write!(f, "missing feature: {name}"),
            Self::FeatureKind { name, expected } => {
                write!(f, "feature {name} must be {expected}")
            }
            Self::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(f, "shape mismatch for {what}: got {got}, expected {expected}"),
            Self::InvalidModel(msg) => write!(f, "invalid model: {msg}"),
            Self::Dataset { line, msg } => write!(f, "dataset line {line}: {msg}"),
        }
    }
}

impl Error for AppraisalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}
