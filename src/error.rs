use derive_more::Display;

/// Rejection of a hint passed to one of the checked `try_*_with_after_hint` operations.
///
/// The unchecked operations never report these; they clamp the hint and trust the caller.
#[derive(Debug, Display, derive_more::Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[display("hint {hint} is past the end of a sequence of length {len}")]
    HintOutOfBounds { hint: usize, len: usize },
    #[display("hint {hint} is not a lower bound for the searched key")]
    HintPastTarget { hint: usize },
}
