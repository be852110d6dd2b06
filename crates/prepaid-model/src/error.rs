use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("input has {width} columns but the layout needs at least {required}")]
    LayoutMismatch { width: usize, required: usize },
    #[error("slot index {0} is out of range (expected 0 or 1)")]
    InvalidSlot(usize),
    #[error("column positions overlap: {0}")]
    OverlappingColumns(usize),
}

pub type Result<T> = std::result::Result<T, ModelError>;
