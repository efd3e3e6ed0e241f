use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("dataset path has no file name: {}", path.display())]
    InvalidDataset { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, ModelError>;
