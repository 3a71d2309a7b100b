//! Query encoder for the GraphQL read endpoints
//!
//! Every read carries two JSON blobs in the query string: `variables`
//! (selection and pagination) and `features` (capability flags pinned to the
//! upstream query version).

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::upstream::{FOLLOW_LIST_FEATURES, MAX_PAGE_SIZE, USER_LOOKUP_FEATURES};

/// The two serialized blobs of a GraphQL read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedQuery {
    pub variables: String,
    pub features: String,
}

impl EncodedQuery {
    /// Query-string pairs, unescaped
    pub fn into_params(self) -> Vec<(String, String)> {
        vec![
            ("variables".to_string(), self.variables),
            ("features".to_string(), self.features),
        ]
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FollowListVariables<'a> {
    user_id: &'a str,
    include_promoted_content: bool,
    count: u32,
    // Omitted on the first page; an empty string is not the same request upstream
    #[serde(skip_serializing_if = "Option::is_none")]
    cursor: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserLookupVariables<'a> {
    #[serde(rename = "screen_name")]
    screen_name: &'a str,
    with_safety_mode_user_fields: bool,
}

/// Serializes a flag table as a JSON object in declaration order
struct FlagTable(&'static [(&'static str, bool)]);

impl Serialize for FlagTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, enabled) in self.0 {
            map.serialize_entry(name, enabled)?;
        }
        map.end()
    }
}

/// Saturate a requested page size at the upstream maximum
pub fn clamp_page_size(requested: u32) -> u32 {
    requested.min(MAX_PAGE_SIZE)
}

/// Encode a Following/Followers read
///
/// `count` is clamped to [`MAX_PAGE_SIZE`]. An empty `cursor` requests the
/// first page and leaves the field out of `variables` entirely.
pub fn encode_follow_list(user_id: &str, count: u32, cursor: &str) -> Result<EncodedQuery> {
    let variables = FollowListVariables {
        user_id,
        include_promoted_content: false,
        count: clamp_page_size(count),
        cursor: (!cursor.is_empty()).then_some(cursor),
    };

    Ok(EncodedQuery {
        variables: serde_json::to_string(&variables)?,
        features: serde_json::to_string(&FlagTable(FOLLOW_LIST_FEATURES))?,
    })
}

/// Encode a UserByScreenName lookup
pub fn encode_user_lookup(screen_name: &str) -> Result<EncodedQuery> {
    let variables = UserLookupVariables {
        screen_name,
        with_safety_mode_user_fields: true,
    };

    Ok(EncodedQuery {
        variables: serde_json::to_string(&variables)?,
        features: serde_json::to_string(&FlagTable(USER_LOOKUP_FEATURES))?,
    })
}
