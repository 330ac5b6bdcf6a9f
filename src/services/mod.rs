/// Services backed by external systems
mod greeting;
mod notifier;

pub use greeting::{Greeter, HuggingFaceGreeter, StaticGreeter, fallback_greeting};
pub use notifier::DiscordNotifier;
