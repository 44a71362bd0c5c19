use std::fmt;

use thiserror::Error;

use crate::RideStatus;

/// A lifecycle request that names which transition was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RideAction {
    Start,
    Pause,
    Resume,
    Stop,
}

impl fmt::Display for RideAction {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let verb = match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Stop => "stop",
        };
        f.write_str(verb)
    }
}

/// Requests the meter refuses. None of them change any state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MeterError {
    #[error("cannot {action} while the meter is {status}")]
    InvalidTransition { action: RideAction, status: RideStatus },

    #[error("the previous ride is still waiting for payment")]
    SettlementPending,

    #[error("no payment is open")]
    NoOpenSettlement,

    #[error("there is no stopped ride to settle")]
    NothingToSettle,

    #[error("a {0}% tip is not one of the offered options")]
    TipNotOffered(u8),
}
