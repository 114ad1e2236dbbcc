/// State of one segment's audio slot. Each slot is written at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotState {
    /// Conversion still in flight
    Pending,
    /// Audio payload available
    Ready(Vec<u8>),
    /// Conversion failed permanently; the slot will never fill
    Failed,
}

/// Index-addressed audio buffer, one slot per text segment.
///
/// Invariant: the buffer has exactly as many slots as the session has text
/// segments, and slot i holds the audio for text segment i.
#[derive(Debug)]
pub struct AudioBuffer {
    slots: Vec<SlotState>,
}

impl AudioBuffer {
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![SlotState::Pending; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[SlotState] {
        &self.slots
    }

    /// Store a segment's audio. Single writer per slot.
    pub fn fill(&mut self, index: usize, audio: Vec<u8>) {
        debug_assert!(matches!(self.slots[index], SlotState::Pending));
        self.slots[index] = SlotState::Ready(audio);
    }

    /// Mark a segment as permanently failed
    pub fn fail(&mut self, index: usize) {
        debug_assert!(matches!(self.slots[index], SlotState::Pending));
        self.slots[index] = SlotState::Failed;
    }

    /// The audio for a segment, if it has arrived
    pub fn audio(&self, index: usize) -> Option<&[u8]> {
        match self.slots.get(index) {
            Some(SlotState::Ready(audio)) => Some(audio),
            _ => None,
        }
    }

    /// True once every slot is either ready or failed
    pub fn all_settled(&self) -> bool {
        !self
            .slots
            .iter()
            .any(|slot| matches!(slot, SlotState::Pending))
    }

    /// Indices of permanently failed segments, in order
    pub fn failed_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| matches!(slot, SlotState::Failed))
            .map(|(index, _)| index)
            .collect()
    }
}
