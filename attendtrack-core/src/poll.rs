use serde::{Deserialize, Serialize};

/// Agreement at or above this means a mass bunk is likely to happen
pub const LIKELY_THRESHOLD: u32 = 75;

/// A single answer to a mass bunk poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VoteStatus {
    Yes,
    No,
    Maybe,
}

impl VoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Maybe => "maybe",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub user_id: String,
    pub status: VoteStatus,
}

/// Replaces the vote of `user_id` if it exists, otherwise appends it.
/// A replaced vote moves to the end, so the list stays in order of last change.
pub fn upsert_vote(votes: &mut Vec<Vote>, user_id: &str, status: VoteStatus) {
    votes.retain(|v| v.user_id != user_id);
    votes.push(Vote {
        user_id: user_id.to_string(),
        status,
    });
}

/// Counts the votes with the given status
pub fn tally(votes: &[Vote], status: VoteStatus) -> usize {
    votes.iter().filter(|v| v.status == status).count()
}

/// The percentage of votes that are "yes", or [None] if nobody voted
pub fn agreement(votes: &[Vote]) -> Option<u32> {
    if votes.is_empty() {
        return None;
    }

    let yes = tally(votes, VoteStatus::Yes);
    Some((yes as f64 / votes.len() as f64 * 100.).round() as u32)
}

/// What the votes say about the mass bunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PollOutlook {
    /// Mass bunk is likely to happen
    Likely,
    /// Not enough agreement yet
    NotEnough,
}

impl PollOutlook {
    pub fn from_votes(votes: &[Vote]) -> Self {
        match agreement(votes) {
            Some(p) if p >= LIKELY_THRESHOLD => Self::Likely,
            _ => Self::NotEnough,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Likely => "Mass bunk is likely to happen!",
            Self::NotEnough => "Not enough agreement yet",
        }
    }
}
