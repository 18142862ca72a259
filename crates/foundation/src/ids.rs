use serde::{Deserialize, Serialize};

/// Identifier of an encyclopedia page as issued by the upstream content API.
///
/// Opaque to the viewer: only compared, hashed and echoed back upstream.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u64);

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
