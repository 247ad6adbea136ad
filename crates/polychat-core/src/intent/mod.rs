//! Rule-based intent responder and its clock capability.

mod clock;
mod responder;

pub use clock::{Clock, FixedClock, SystemClock};
pub use responder::{DEFAULT_SHORT_TURN_THRESHOLD, Intent, IntentResponder};
