use russell_lab::StrError;
use thiserror::Error;

/// Classifies the root cause of a [StressError]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Mismatched vector or matrix sizes
    Dimension,

    /// Mathematically invalid input (e.g., non-positive J or zero denominator)
    Domain,

    /// Degenerate normalization of a gradient
    SingularNormal,
}

/// Defines the failure returned by all operations
///
/// A failure raised by an inner call is wrapped by the caller using [ResultExt::context],
/// thus the whole causal sequence is available via [StressError::chain].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum StressError {
    #[error("dimension error: {0}")]
    Dimension(String),

    #[error("domain error: {0}")]
    Domain(String),

    #[error("singular normal: {0}")]
    SingularNormal(String),

    #[error("{context}")]
    Context {
        context: String,
        #[source]
        source: Box<StressError>,
    },
}

impl StressError {
    /// Allocates a new dimension error
    pub fn dimension(message: impl Into<String>) -> Self {
        StressError::Dimension(message.into())
    }

    /// Allocates a new domain error
    pub fn domain(message: impl Into<String>) -> Self {
        StressError::Domain(message.into())
    }

    /// Allocates a new singular-normal error
    pub fn singular_normal(message: impl Into<String>) -> Self {
        StressError::SingularNormal(message.into())
    }

    /// Wraps this error with the context of the caller
    pub fn wrap(self, context: impl Into<String>) -> Self {
        StressError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the error that originated the chain
    pub fn root(&self) -> &StressError {
        let mut current = self;
        while let StressError::Context { source, .. } = current {
            current = source;
        }
        current
    }

    /// Returns the kind of the originating error
    pub fn kind(&self) -> ErrorKind {
        match self.root() {
            StressError::Dimension(_) => ErrorKind::Dimension,
            StressError::Domain(_) => ErrorKind::Domain,
            StressError::SingularNormal(_) => ErrorKind::SingularNormal,
            StressError::Context { .. } => unreachable!("root is never a context"),
        }
    }

    /// Returns the messages from the outermost context down to the root
    pub fn chain(&self) -> Vec<String> {
        let mut messages = Vec::new();
        let mut current = self;
        loop {
            match current {
                StressError::Context { context, source } => {
                    messages.push(context.clone());
                    current = source;
                }
                _ => {
                    messages.push(current.to_string());
                    return messages;
                }
            }
        }
    }
}

/// Converts a failure of the linear-algebra routines (mismatched sizes) into a dimension error
impl From<StrError> for StressError {
    fn from(message: StrError) -> Self {
        StressError::Dimension(format!("linear algebra: {}", message))
    }
}

/// Adds caller context to failed results
pub trait ResultExt<T> {
    /// Wraps the error (if any) with the given context
    fn context(self, context: &str) -> Result<T, StressError>;
}

impl<T> ResultExt<T> for Result<T, StressError> {
    fn context(self, context: &str) -> Result<T, StressError> {
        self.map_err(|e| e.wrap(context))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
