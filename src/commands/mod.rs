// Text command handling
mod command;
mod router;

pub use command::Command;
pub use router::{CommandRouter, InboundMessage};
