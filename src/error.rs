use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Host input is incomplete; the engine renders nothing.
    #[error("input not ready: {0}")]
    NotReady(String),

    #[error("unknown panel index: {0}")]
    UnknownPanel(usize),

    #[error("no style entry for name={name:?}, category={category:?}")]
    UnknownStyleEntry { name: String, category: String },

    #[error("serialization failed: {0}")]
    Serialization(String),
}
