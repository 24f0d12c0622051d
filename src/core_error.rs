use super::*;

/// Every failure the core can report. Most operations are total, so this is short.
#[derive(Debug, PartialEq, Clone)]
pub enum CoreError {
    /// A class was created with a base that was never registered
    InvalidBase(String),
    /// An operation was called without its precondition holding. The string names the
    /// precondition.
    PreconditionViolation(String),
    /// No class in the chain defines the method
    UnknownMethod { class: String, method: String },
    /// A class or entity id is already taken
    DuplicateName(String),
    /// A dynamic value is not of the type it was read as
    BadValue(String),
    /// A component exists but holds a different type than was asked for
    ComponentType { key: String, expected: &'static str },
    /// A listener returned an error or panicked while a signal was firing. Only ever reported to
    /// an ErrorReporter, never returned from fire().
    Listener(String),
    /// Bad configuration value or file
    Config(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InvalidBase(name) => write!(f, "{:?} is not a registered class", name),
            Self::PreconditionViolation(what) => write!(f, "precondition violated: {}", what),
            Self::UnknownMethod { class, method } => {
                write!(f, "{} has no method {:?}", class, method)
            }
            Self::DuplicateName(name) => write!(f, "{:?} is already in use", name),
            Self::BadValue(msg) => write!(f, "{}", msg),
            Self::ComponentType { key, expected } => {
                write!(f, "component {:?} is not a {}", key, expected)
            }
            Self::Listener(msg) => write!(f, "listener failed: {}", msg),
            Self::Config(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for CoreError {}
