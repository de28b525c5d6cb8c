//! Evaluation Snapshots
//!
//! A compact record of what one evaluation concluded, with a digest over
//! the per-program outcomes. Two evaluations of the same household against
//! the same catalog must produce the same digest; the digest is how
//! determinism is verified across releases.

use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// One program's outcome as recorded in the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramSnapshot {
    pub code: String,
    pub eligible: bool,
    pub value: i64,
}

/// The recorded outcome of one evaluation
#[derive(Debug, Clone, Serialize)]
pub struct EligibilitySnapshot {
    /// Unique per evaluation; excluded from the digest
    pub id: Uuid,
    /// Hex sha256 over the serialized program outcomes
    pub digest: String,
    pub programs: Vec<ProgramSnapshot>,
}

impl EligibilitySnapshot {
    pub fn new(programs: Vec<ProgramSnapshot>) -> Self {
        Self {
            id: Uuid::new_v4(),
            digest: digest_of(&programs),
            programs,
        }
    }
}

fn digest_of(programs: &[ProgramSnapshot]) -> String {
    // Serialization of these plain derive types cannot fail
    let serialized = serde_json::to_vec(programs).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(&serialized);
    format!("{:x}", hasher.finalize())
}
