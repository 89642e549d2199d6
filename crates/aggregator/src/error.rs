/// Contract violations surfaced to callers.
///
/// Reads never fail: out-of-range reads return an empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
	/// A write targeted a slot outside the shifted visible window.
	#[error("slot out of bounds for set: index {index} shifted by {shift}, {len} slots visible")]
	OutOfRange { index: usize, shift: usize, len: usize },
}
