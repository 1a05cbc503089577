//! The attendtrack calculation engine.
//!
//! Everything in here is pure: no storage, no clocks unless one is passed in.
//! The stateful services live in `attendtrack-collab`.

mod friends;
mod ledger;
mod poll;
mod projection;
mod time;
mod validation;

pub use friends::*;
pub use ledger::*;
pub use poll::*;
pub use projection::*;
pub use time::*;
pub use validation::*;
