/// Identifies one issued request in a monotonically increasing sequence.
///
/// Small and copyable so it can travel alongside an in-flight fetch and be
/// compared when the response resolves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

/// Issues request tokens and decides which response is still wanted.
///
/// Ordering contract:
/// - Every `issue()` returns a token strictly greater than all earlier ones.
/// - Only the most recently issued token is current; responses carrying any
///   other token are stale and must be dropped by the caller.
#[derive(Debug, Default, Clone)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest != 0 && token.0 == self.latest
    }
}
