use std::fs;
use std::path::Path;

use crate::domain::session::{AudioBuffer, SlotState};
use crate::error::AppResult;

/// Concatenate every ready segment in index order into one artifact.
///
/// Runs only once all slots settled: returns `None` while any conversion is
/// still in flight. Failed slots are logged and leave a gap in the merged
/// audio.
pub fn assemble(buffer: &AudioBuffer) -> Option<Vec<u8>> {
    if !buffer.all_settled() {
        return None;
    }

    let mut merged = Vec::new();
    for (index, slot) in buffer.slots().iter().enumerate() {
        match slot {
            SlotState::Ready(audio) => merged.extend_from_slice(audio),
            SlotState::Failed => {
                tracing::warn!(segment = index, "Segment missing from merged audio");
            }
            SlotState::Pending => return None,
        }
    }

    Some(merged)
}

/// Write the merged audio to disk
pub fn write_artifact(path: &Path, audio: &[u8]) -> AppResult<()> {
    fs::write(path, audio)?;
    tracing::info!(
        path = %path.display(),
        bytes = audio.len(),
        "Merged audio written"
    );
    Ok(())
}
