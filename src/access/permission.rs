use std::collections::HashMap;
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Platform level from which the narrow audio-read permission applies.
pub const NARROW_AUDIO_LEVEL: u32 = 33;

/// Permission guarding enumeration of the media library.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Read access to audio media only.
    ReadMediaAudio,
    /// Read access to shared storage as a whole.
    ReadExternalStorage,
}

impl Permission {
    /// The single permission needed to enumerate media on `platform_level`.
    pub fn required_for(platform_level: u32) -> Self {
        if platform_level >= NARROW_AUDIO_LEVEL {
            Self::ReadMediaAudio
        } else {
            Self::ReadExternalStorage
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadMediaAudio => f.write_str("read-media-audio"),
            Self::ReadExternalStorage => f.write_str("read-external-storage"),
        }
    }
}

/// Answer to a permission request: identifier -> granted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantResponse(pub HashMap<Permission, bool>);

impl GrantResponse {
    /// A response answering every permission in `perms` with `granted`.
    pub fn uniform(perms: &[Permission], granted: bool) -> Self {
        Self(perms.iter().map(|&p| (p, granted)).collect())
    }

    /// True when every requested permission was accepted.
    ///
    /// An empty response counts as refused.
    pub fn all_granted(&self) -> bool {
        !self.0.is_empty() && self.0.values().all(|&g| g)
    }
}

/// Resolving side of a [`GrantRequest`]. Consumed on use, so it fires once.
pub struct GrantResolver(Sender<GrantResponse>);

impl GrantResolver {
    pub fn resolve(self, response: GrantResponse) {
        // The requester may already be gone; nothing to deliver to then.
        let _ = self.0.send(response);
    }
}

/// A pending permission request, resolved at most once.
pub struct GrantRequest(Receiver<GrantResponse>);

/// What polling a [`GrantRequest`] produced.
#[derive(Debug, PartialEq, Eq)]
pub enum GrantPoll {
    Pending,
    Ready(GrantResponse),
    /// The platform dropped the request without answering.
    Abandoned,
}

impl GrantRequest {
    /// Create a linked request/resolver pair.
    pub fn channel() -> (Self, GrantResolver) {
        let (tx, rx) = mpsc::channel();
        (Self(rx), GrantResolver(tx))
    }

    /// A request that is already answered.
    pub fn resolved(response: GrantResponse) -> Self {
        let (request, resolver) = Self::channel();
        resolver.resolve(response);
        request
    }

    pub fn poll(&self) -> GrantPoll {
        match self.0.try_recv() {
            Ok(response) => GrantPoll::Ready(response),
            Err(TryRecvError::Empty) => GrantPoll::Pending,
            Err(TryRecvError::Disconnected) => GrantPoll::Abandoned,
        }
    }
}
