use thiserror::Error;

pub type CanvasResult<T> = core::result::Result<T, CanvasError>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CanvasError {
    #[error("Framebuffer allocation failed ({requested} bytes)")]
    AllocationFailure { requested: usize },

    #[error("Canvas is not initialized")]
    NotInitialized,

    #[error("Invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },

    #[error("Display error: {0}")]
    Display(#[from] DisplayError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    #[error("Display initialization failed")]
    InitFailed,

    #[error("Bitmap transfer failed")]
    TransferFailed,
}
