//! Outbound message seam.
//!
//! Implemented by the transport collaborator. The core hands over finished
//! display strings; splitting, truncation and protocol framing happen on the
//! other side of this trait.

/// Outbound messages for one room.
pub trait Announcer: Send + Sync {
    /// Send to the shared channel.
    fn broadcast(&self, text: &str);

    /// Send privately to one player.
    fn notice(&self, player: &str, text: &str);

    /// Send to the shared channel, addressed at one player.
    fn reply(&self, player: &str, text: &str);
}
