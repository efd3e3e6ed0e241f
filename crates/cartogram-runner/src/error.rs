use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write stdin of `{command}`: {source}")]
    Stdin {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for `{command}`: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RunnerError>;
