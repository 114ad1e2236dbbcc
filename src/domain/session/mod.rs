pub mod buffer;
pub mod error;
pub mod sequencer;
pub mod service;

pub use buffer::{AudioBuffer, SlotState};
pub use error::SessionError;
pub use sequencer::{
    PlaybackSequencer, SequencerAction, SequencerEvent, SequencerState, StallPolicy,
};
pub use service::{ConversionOutcome, ConversionService};
