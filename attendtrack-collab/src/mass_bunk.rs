use attendtrack_core::{
    agreement, short_date, tally, transition, upsert_vote, FriendAction, FriendError,
    FriendOutcome, FriendStatus, PollOutlook, Vote, VoteStatus,
};
use chrono::{DateTime, Utc};
use log::info;
use thiserror::Error;

use crate::{
    demo, util::new_id, FriendData, Key, MassBunkPollData, NewNotification, NotificationKind,
    Notifications, RecordId, Storage, StorageError, StorageExt, TrackerContext, UserData,
};

/// Mass bunk polls and the friend lists they are shared with
pub struct MassBunk<S> {
    context: TrackerContext<S>,
    notifications: Notifications<S>,
}

#[derive(Debug, Error)]
pub enum MassBunkError {
    #[error(transparent)]
    Friend(#[from] FriendError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type MassBunkResult<T> = std::result::Result<T, MassBunkError>;

#[derive(Debug, Clone)]
pub struct NewPoll {
    pub course_id: RecordId,
    pub date: DateTime<Utc>,
    pub description: String,
}

impl MassBunkPollData {
    /// Counts the votes with the given status
    pub fn tally(&self, status: VoteStatus) -> usize {
        tally(&self.votes, status)
    }

    /// The percentage of "yes" votes, or [None] if nobody voted
    pub fn agreement(&self) -> Option<u32> {
        agreement(&self.votes)
    }

    pub fn outlook(&self) -> PollOutlook {
        PollOutlook::from_votes(&self.votes)
    }

    pub fn vote_of(&self, user_id: &str) -> Option<VoteStatus> {
        self.votes
            .iter()
            .find(|v| v.user_id == user_id)
            .map(|v| v.status)
    }
}

impl<S> MassBunk<S>
where
    S: Storage,
{
    const POLL_LINK: &'static str = "/massbunk";
    const PROFILE_LINK: &'static str = "/profile";

    pub fn new(context: &TrackerContext<S>, notifications: &Notifications<S>) -> Self {
        Self {
            context: context.clone(),
            notifications: notifications.clone(),
        }
    }

    /// Returns every poll the user can see
    pub fn polls(&self, user: &UserData) -> MassBunkResult<Vec<MassBunkPollData>> {
        Ok(self
            .context
            .load_list(&Key::MassBunks(user.id.clone()), || demo::polls(Utc::now()))?)
    }

    pub fn poll_by_id(
        &self,
        user: &UserData,
        poll_id: &str,
    ) -> MassBunkResult<Option<MassBunkPollData>> {
        Ok(self.polls(user)?.into_iter().find(|p| p.id == poll_id))
    }

    /// Creates a poll with the creator already voting yes, and lets accepted friends know
    pub fn create_poll(&self, user: &UserData, new_poll: NewPoll) -> MassBunkResult<MassBunkPollData> {
        let poll = MassBunkPollData {
            id: new_id(),
            course_id: new_poll.course_id,
            date: new_poll.date,
            creator_id: user.id.clone(),
            description: new_poll.description,
            votes: vec![Vote {
                user_id: user.id.clone(),
                status: VoteStatus::Yes,
            }],
        };

        let mut polls = self.polls(user)?;
        polls.push(poll.clone());
        self.save_polls(user, &polls)?;

        info!("{} created mass bunk poll {}", user.display_name(), poll.id);

        for friend in self.accepted_friends(user)? {
            self.notifications.notify(NewNotification {
                user_id: friend.id,
                message: format!(
                    "{} created a new mass bunk poll for {}",
                    user.username,
                    short_date(&poll.date)
                ),
                kind: NotificationKind::Info,
                link: Some(format!("{}/{}", Self::POLL_LINK, poll.id)),
            })?;
        }

        Ok(poll)
    }

    /// Casts or replaces the vote of the user.
    ///
    /// Returns the updated poll, or [None] if the poll doesn't exist.
    pub fn vote(
        &self,
        user: &UserData,
        poll_id: &str,
        status: VoteStatus,
    ) -> MassBunkResult<Option<MassBunkPollData>> {
        let mut polls = self.polls(user)?;

        let Some(poll) = polls.iter_mut().find(|p| p.id == poll_id) else {
            return Ok(None);
        };

        upsert_vote(&mut poll.votes, &user.id, status);
        let poll = poll.clone();

        self.save_polls(user, &polls)?;

        if poll.creator_id != user.id {
            self.notifications.notify(NewNotification {
                user_id: poll.creator_id.clone(),
                message: format!(
                    "{} voted \"{}\" on your mass bunk poll",
                    user.username,
                    status.as_str()
                ),
                kind: NotificationKind::Info,
                link: Some(format!("{}/{}", Self::POLL_LINK, poll.id)),
            })?;
        }

        Ok(Some(poll))
    }

    /// Returns the friend list of the user, pending requests included
    pub fn friends(&self, user: &UserData) -> MassBunkResult<Vec<FriendData>> {
        Ok(self
            .context
            .load_list(&Key::Friends(user.id.clone()), demo::friends)?)
    }

    pub fn accepted_friends(&self, user: &UserData) -> MassBunkResult<Vec<FriendData>> {
        self.friends_with_status(user, FriendStatus::Accepted)
    }

    pub fn pending_friends(&self, user: &UserData) -> MassBunkResult<Vec<FriendData>> {
        self.friends_with_status(user, FriendStatus::Pending)
    }

    /// Sends a friend request to the student with the given roll number.
    ///
    /// Students that haven't registered get a placeholder profile in the same class as the user.
    pub fn add_friend(&self, user: &UserData, roll_number: &str) -> MassBunkResult<FriendData> {
        let status = FriendStatus::Pending;
        let registered: Option<UserData> = self
            .context
            .storage
            .load(&Key::UserData(roll_number.to_string()))?;

        let friend = match registered {
            Some(other) => FriendData {
                id: other.id,
                username: other.username,
                roll_number: other.roll_number,
                year: other.year,
                course: other.course,
                section: other.section,
                status,
            },
            None => FriendData {
                id: new_id(),
                username: format!("user_{roll_number}"),
                roll_number: roll_number.to_string(),
                year: user.year,
                course: user.course.clone(),
                section: user.section.clone(),
                status,
            },
        };

        let mut friends = self.friends(user)?;
        friends.push(friend.clone());
        self.save_friends(user, &friends)?;

        self.notifications.notify(NewNotification {
            user_id: friend.id.clone(),
            message: format!("{} sent you a friend request", user.username),
            kind: NotificationKind::Info,
            link: Some(Self::PROFILE_LINK.to_string()),
        })?;

        Ok(friend)
    }

    /// Accepts a pending friend request. Unknown friends are ignored.
    pub fn accept_friend(&self, user: &UserData, friend_id: &str) -> MassBunkResult<()> {
        if !self.apply(user, friend_id, FriendAction::Accept)? {
            return Ok(());
        }

        self.notifications.notify(NewNotification {
            user_id: friend_id.to_string(),
            message: format!("{} accepted your friend request", user.username),
            kind: NotificationKind::Success,
            link: Some(Self::PROFILE_LINK.to_string()),
        })?;

        Ok(())
    }

    /// Rejects a pending friend request, removing it entirely. Unknown friends are ignored.
    pub fn reject_friend(&self, user: &UserData, friend_id: &str) -> MassBunkResult<()> {
        self.apply(user, friend_id, FriendAction::Reject)?;
        Ok(())
    }

    /// Applies an action to every friend record with the id, duplicate requests included.
    /// Returns whether such a record existed.
    fn apply(&self, user: &UserData, friend_id: &str, action: FriendAction) -> MassBunkResult<bool> {
        let friends = self.friends(user)?;

        if !friends.iter().any(|f| f.id == friend_id) {
            return Ok(false);
        }

        let mut updated = Vec::with_capacity(friends.len());

        for mut friend in friends {
            if friend.id != friend_id {
                updated.push(friend);
                continue;
            }

            match transition(Some(friend.status), action)? {
                FriendOutcome::Store(status) => {
                    friend.status = status;
                    updated.push(friend);
                }
                FriendOutcome::Remove => {}
            }
        }

        self.save_friends(user, &updated)?;

        Ok(true)
    }

    fn friends_with_status(
        &self,
        user: &UserData,
        status: FriendStatus,
    ) -> MassBunkResult<Vec<FriendData>> {
        let mut friends = self.friends(user)?;
        friends.retain(|f| f.status == status);

        Ok(friends)
    }

    fn save_polls(&self, user: &UserData, polls: &[MassBunkPollData]) -> MassBunkResult<()> {
        Ok(self
            .context
            .save_list(&Key::MassBunks(user.id.clone()), polls)?)
    }

    fn save_friends(&self, user: &UserData, friends: &[FriendData]) -> MassBunkResult<()> {
        Ok(self
            .context
            .save_list(&Key::Friends(user.id.clone()), friends)?)
    }
}
