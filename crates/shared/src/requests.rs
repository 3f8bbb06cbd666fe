use serde::{Deserialize, Serialize};

use crate::responses::NounData;

/// Body of `POST /api/rooms/{room_id}/craft`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftNounRequest {
    pub a: NounData,
    pub b: NounData,
}

/// Query string of `GET /api/rooms/{room_id}/nouns`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNounsQuery {
    /// `alphabetical` (default), `emoji` or `time`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}
