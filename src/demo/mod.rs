// Conversation demos built on the step player.
// The autonomous and chat demos behave differently and stay separate.

pub mod autonomous;
pub mod chat;

pub use autonomous::AutonomousDemo;
pub use chat::{ChatSession, SubmitOutcome};
