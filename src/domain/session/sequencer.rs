/// Where the sequencer is in the playback of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    /// No segment played yet
    Idle,
    /// Segment `i` is currently playing
    Playing(usize),
    /// Segment `i` is needed next but its audio has not arrived
    Buffering(usize),
    /// Every segment was visited
    Complete,
    /// Sequencing halted at segment `i`
    Failed(usize),
}

/// Discrete events that drive the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    /// Segment `i`'s audio became available
    SegmentReady(usize),
    /// Segment `i`'s conversion failed permanently
    SegmentFailed(usize),
    /// The segment that was playing reached its natural end
    PlaybackEnded,
}

/// What the caller should do after feeding an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerAction {
    /// Start playing segment `i`
    Play(usize),
    /// Nothing to do yet; feed the next event when it arrives
    Wait,
    /// All segments played
    Finish,
    /// Sequencing halted at segment `i`
    Abort(usize),
}

/// What to do when the segment the sequencer needs has failed permanently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StallPolicy {
    /// Keep buffering for as long as any conversion is still in flight.
    /// Matches the historical behavior of waiting on the missing slot.
    #[default]
    Wait,
    /// Skip the failed segment and move to the next index
    Skip,
    /// Halt the whole session
    Abort,
}

impl std::str::FromStr for StallPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wait" => Ok(Self::Wait),
            "skip" => Ok(Self::Skip),
            "abort" => Ok(Self::Abort),
            other => Err(format!(
                "unknown stall policy: {other} (expected wait, skip or abort)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotStatus {
    Pending,
    Ready,
    Failed,
}

/// Strict in-order playback over an index-addressed segment buffer.
///
/// Segments play in index order exactly once each: segment i+1 never starts
/// before segment i has finished, no matter in which order audio arrives.
/// The machine owns no audio and performs no I/O; transitions are driven
/// entirely by the events fed to `handle`.
pub struct PlaybackSequencer {
    state: SequencerState,
    policy: StallPolicy,
    slots: Vec<SlotStatus>,
}

impl PlaybackSequencer {
    /// `total` is the number of segments in the session (at least one;
    /// empty input is rejected upstream).
    pub fn new(total: usize, policy: StallPolicy) -> Self {
        Self {
            state: SequencerState::Idle,
            policy,
            slots: vec![SlotStatus::Pending; total],
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Feed one event and learn what to do next
    pub fn handle(&mut self, event: SequencerEvent) -> SequencerAction {
        let action = match event {
            SequencerEvent::SegmentReady(index) => {
                self.slots[index] = SlotStatus::Ready;
                self.on_slot_settled(index)
            }
            SequencerEvent::SegmentFailed(index) => {
                self.slots[index] = SlotStatus::Failed;
                self.on_slot_settled(index)
            }
            SequencerEvent::PlaybackEnded => self.on_playback_ended(),
        };

        tracing::debug!(state = ?self.state, ?event, ?action, "Sequencer step");
        action
    }

    fn on_slot_settled(&mut self, index: usize) -> SequencerAction {
        match self.state {
            // First segment unlocks playback
            SequencerState::Idle if index == 0 => self.advance_to(0),
            // The slot we were stalled on settled
            SequencerState::Buffering(needed) if needed == index => self.advance_to(needed),
            // A later (or already consumed) slot settled; just record it
            _ => SequencerAction::Wait,
        }
    }

    fn on_playback_ended(&mut self) -> SequencerAction {
        match self.state {
            SequencerState::Playing(index) if index + 1 == self.slots.len() => {
                self.state = SequencerState::Complete;
                SequencerAction::Finish
            }
            SequencerState::Playing(index) => self.advance_to(index + 1),
            // A stray end event outside playback changes nothing
            _ => SequencerAction::Wait,
        }
    }

    /// Move the cursor to `index`, resolving ready, pending and failed
    /// slots. The cursor only ever moves forward.
    fn advance_to(&mut self, mut index: usize) -> SequencerAction {
        loop {
            if index >= self.slots.len() {
                self.state = SequencerState::Complete;
                return SequencerAction::Finish;
            }

            match self.slots[index] {
                SlotStatus::Ready => {
                    self.state = SequencerState::Playing(index);
                    return SequencerAction::Play(index);
                }
                SlotStatus::Pending => {
                    self.state = SequencerState::Buffering(index);
                    return SequencerAction::Wait;
                }
                SlotStatus::Failed => match self.policy {
                    StallPolicy::Wait => {
                        tracing::warn!(
                            segment = index,
                            "Segment failed; stall policy keeps buffering"
                        );
                        self.state = SequencerState::Buffering(index);
                        return SequencerAction::Wait;
                    }
                    StallPolicy::Skip => {
                        tracing::warn!(segment = index, "Segment failed; skipping");
                        index += 1;
                    }
                    StallPolicy::Abort => {
                        self.state = SequencerState::Failed(index);
                        return SequencerAction::Abort(index);
                    }
                },
            }
        }
    }
}
