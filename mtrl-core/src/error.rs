use thiserror::Error;

/// Failures surfaced by environment construction and task switching. Both
/// are immediate caller mistakes, nothing here is worth retrying.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("task index {idx} is out of range for a pool of {len} tasks")]
    IndexOutOfRange { idx: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no environment registered under `{0}`")]
    UnknownEnv(String),
    #[error("an environment is already registered under `{0}`")]
    DuplicateEnv(String),
}
