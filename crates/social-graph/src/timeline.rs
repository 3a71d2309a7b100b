//! Timeline parser for Following/Followers responses
//!
//! The response is an instruction list whose entries mix user items, cursor
//! sentinels and whatever else upstream decides to inject (modules, prompts,
//! promoted items). Every level that carries a discriminator is modelled as
//! an internally tagged enum with an `Unknown` fallback. Instructions and
//! entries are decoded one at a time, so a new kind or a malformed entry is
//! dropped instead of failing the page.
//!
//! Shape: `data.user.result.timeline.timeline.instructions[].entries[]`

use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::error::{GraphError, Result};
use crate::types::{Profile, UserResult};

const BOTTOM_CURSOR: &str = "Bottom";

#[derive(Debug, Deserialize)]
struct TimelineResponse {
    data: Option<TimelineData>,
    #[serde(default)]
    errors: Vec<UpstreamError>,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct TimelineData {
    user: TimelineUser,
}

#[derive(Debug, Deserialize)]
struct TimelineUser {
    result: TimelineOwner,
}

#[derive(Debug, Deserialize)]
struct TimelineOwner {
    timeline: TimelineEnvelope,
}

#[derive(Debug, Deserialize)]
struct TimelineEnvelope {
    timeline: Timeline,
}

#[derive(Debug, Deserialize)]
struct Timeline {
    instructions: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Instruction {
    TimelineAddEntries {
        entries: Vec<Value>,
    },
    TimelineReplaceEntry {
        entry: Value,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Entry {
    #[serde(default)]
    entry_id: String,
    content: EntryContent,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "entryType")]
enum EntryContent {
    TimelineTimelineItem {
        #[serde(rename = "itemContent")]
        item_content: ItemContent,
    },
    TimelineTimelineCursor {
        #[serde(rename = "cursorType")]
        cursor_type: String,
        value: String,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "itemType")]
enum ItemContent {
    TimelineUser { user_results: UserResults },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct UserResults {
    result: Option<UserResult>,
}

/// Accumulates profiles and the bottom cursor while walking entries
#[derive(Default)]
struct Collector {
    profiles: Vec<Profile>,
    cursor: String,
    skipped: usize,
}

impl Collector {
    fn visit_instruction(&mut self, raw: Value) {
        match serde_json::from_value::<Instruction>(raw) {
            Ok(Instruction::TimelineAddEntries { entries }) => {
                entries.into_iter().for_each(|entry| self.visit_raw(entry));
            }
            Ok(Instruction::TimelineReplaceEntry { entry }) => self.visit_raw(entry),
            Ok(Instruction::Unknown) => {}
            Err(e) => {
                trace!(error = %e, "Skipping undecodable timeline instruction");
                self.skipped += 1;
            }
        }
    }

    fn visit_raw(&mut self, raw: Value) {
        match serde_json::from_value::<Entry>(raw) {
            Ok(entry) => self.visit(entry),
            Err(e) => {
                trace!(error = %e, "Skipping undecodable timeline entry");
                self.skipped += 1;
            }
        }
    }

    fn visit(&mut self, entry: Entry) {
        match entry.content {
            EntryContent::TimelineTimelineItem {
                item_content:
                    ItemContent::TimelineUser {
                        user_results:
                            UserResults {
                                result: Some(UserResult::User(user)),
                            },
                    },
            } => self.profiles.push(Profile::from(user)),
            EntryContent::TimelineTimelineCursor { cursor_type, value } => {
                if cursor_type == BOTTOM_CURSOR {
                    self.cursor = value;
                }
            }
            _ => {
                trace!(entry_id = %entry.entry_id, "Skipping non-user timeline entry");
                self.skipped += 1;
            }
        }
    }
}

/// Extract the profiles and the raw bottom cursor from a follow-list response
///
/// Profiles come back in entry order. The cursor is the last `Bottom` cursor
/// seen, or empty if there was none; the "exhausted" sentinel is not
/// interpreted here.
pub fn parse_timeline(body: Value) -> Result<(Vec<Profile>, String)> {
    let response: TimelineResponse = serde_json::from_value(body)?;

    let data = match response.data {
        Some(data) => data,
        None => {
            let message = response
                .errors
                .into_iter()
                .next()
                .map(|e| e.message)
                .unwrap_or_else(|| "response has no data".to_string());
            return Err(GraphError::Parse(message));
        }
    };

    let mut collector = Collector::default();
    for instruction in data.user.result.timeline.timeline.instructions {
        collector.visit_instruction(instruction);
    }

    if collector.skipped > 0 {
        trace!(skipped = collector.skipped, "Skipped timeline entries");
    }

    Ok((collector.profiles, collector.cursor))
}
