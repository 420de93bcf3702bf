//! Strike model: a per-user infraction counter.

use serde::{Deserialize, Serialize};

/// A strike record. Read-only from this system's perspective; counts are
/// maintained by the moderation bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strike {
    pub user_id: String,
    pub count: i64,
}
