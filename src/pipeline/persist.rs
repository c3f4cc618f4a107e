//! Shared artifact persistence
//!
//! Both stages write their tables through this helper so "did the write land
//! on disk" is verified the same way everywhere instead of trusted implicitly.

use std::path::Path;

use tracing::info;

use crate::data::Frame;
use crate::error::{PrepError, Result};

/// Write one frame to one path and verify the file exists afterwards
pub fn persist(frame: &Frame, path: &Path) -> Result<()> {
    frame.to_csv(path)?;

    if !path.is_file() {
        return Err(PrepError::WriteNotVerified(path.to_path_buf()));
    }

    info!("wrote {} rows to {}", frame.n_rows(), path.display());
    Ok(())
}
