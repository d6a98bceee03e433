use std::io;

/// Everything a rover command, a script or a display sink can fail with.
///
/// Validation errors are raised before any state is touched, so a failed
/// command always leaves the scene exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum RoverError {
    /// Wrong value for a command: out of range, negative coordinate,
    /// oversized label, unknown color.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A render was requested before any mission was started.
    #[error("Display has not been initialized yet. Start a mission before driving the rover.")]
    NotInitialized,

    /// A script line could not be understood.
    #[error("Script error on line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

impl RoverError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        RoverError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, RoverError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            RoverError::invalid("speed should be an integer in the interval [0,10]").to_string(),
            "Invalid argument: speed should be an integer in the interval [0,10]"
        );
        let err = RoverError::Script {
            line: 3,
            message: "unknown command 'jump'".into(),
        };
        assert_eq!(err.to_string(), "Script error on line 3: unknown command 'jump'");
    }
}
