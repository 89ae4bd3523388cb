//! Channel abstraction for user I/O.
//!
//! The render layer is deliberately thin: a channel turns platform input
//! into a stream of text lines and displays replies. All business logic
//! lives in `chat`/`session`.

pub mod cli;

pub use cli::CliChannel;

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::ChannelError;

/// Stream of user-submitted input lines.
pub type InputStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// A user-facing channel.
#[async_trait]
pub trait Channel: Send + Sync {
    fn name(&self) -> &str;

    /// Start reading input.
    async fn start(&self) -> Result<InputStream, ChannelError>;

    /// Display an assistant reply.
    async fn respond(&self, content: &str) -> Result<(), ChannelError>;

    /// Display a transient status note (banner, hint), outside the
    /// transcript.
    async fn notify(&self, note: &str) -> Result<(), ChannelError>;
}
