use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core and its drivers.
///
/// A missing collision is never an error: predictors report it as `f64::INFINITY`.
/// Variants here are either bad input or a broken contract that must stop the run.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// `resolve` was asked to collide two particles that are not in contact.
    #[error("particles aren't colliding: separation {separation} is not below the contact radius")]
    NotColliding { separation: f64 },

    /// An error attributed to the particle pair `(i, j)`.
    #[error("pair ({i}, {j}): {source}")]
    Pair {
        i: usize,
        j: usize,
        #[source]
        source: Box<Error>,
    },

    /// Run configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Propagated I/O errors (e.g., reading a config file).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Attach the indices of the offending pair.
    pub fn for_pair(self, i: usize, j: usize) -> Self {
        Error::Pair {
            i,
            j,
            source: Box::new(self),
        }
    }
}
