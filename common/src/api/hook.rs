use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field-level validation errors, keyed by field name. Values are message
/// keys resolved by the host's locale layer.
pub type ValidationErrors = BTreeMap<String, Vec<String>>;

/// Envelope every hook endpoint answers with. `halt` mirrors the host hook
/// protocol's "stop further handlers" signal; this service never halts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HookReply<T> {
    pub halt: bool,
    pub payload: T,
}

impl<T> HookReply<T> {
    pub fn proceed(payload: T) -> Self {
        Self {
            halt: false,
            payload,
        }
    }
}
