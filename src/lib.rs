//! Reframe — guided belief-change dialogues with a scripted chat assistant.

pub mod api;
pub mod channels;
pub mod chat;
pub mod config;
pub mod credentials;
pub mod error;
pub mod router;
pub mod scripts;
pub mod session;
pub mod speech;
