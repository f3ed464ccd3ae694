use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown marketplace: {0}")]
    UnknownMarketplace(String),

    #[error("marketplace not supported: {0}")]
    UnsupportedMarketplace(String),

    #[error("a compile pass is already running")]
    Busy,

    #[error("page script failed: {0}")]
    Script(String),

    #[error("browser error: {0}")]
    Driver(String),

    #[error("unexpected page reply: {0}")]
    Protocol(String),
}

pub type Result<T> = std::result::Result<T, Error>;
