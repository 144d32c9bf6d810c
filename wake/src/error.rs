use crate::geometry::{Corner, WakeShape};

#[derive(thiserror::Error, Debug)]
pub enum WakeError {
    #[error("wake contains no panels ({0})")]
    EmptyWake(WakeShape),
    #[error("{what} has shape {found}, expected {expected}")]
    ShapeMismatch {
        what: String,
        expected: String,
        found: String,
    },
    #[error("propeller {prop} requested, but the wake only holds {props} propellers")]
    PropellerOutOfRange { prop: usize, props: usize },
    #[error(
        "scalar field `{name}` has {found} samples, expected {expected} (one per ring boundary)"
    )]
    FieldLength {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("scalar field `{name}` cannot be written: {reason}")]
    FieldName { name: String, reason: &'static str },
    #[error("corner {corner:?} at [{prop}, {time_step}, {blade}, {ring}] is outside the wake")]
    OutOfRange {
        corner: Corner,
        prop: usize,
        time_step: usize,
        blade: usize,
        ring: usize,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
