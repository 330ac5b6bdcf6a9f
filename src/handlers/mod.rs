/// Handler modules for Discord events
mod message;

pub use message::handle_message;
