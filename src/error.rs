use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("SMBIOS: {0}")]
    Smbios(#[from] smbios::error::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}
