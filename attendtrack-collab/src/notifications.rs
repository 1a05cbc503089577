use chrono::Utc;
use log::debug;

use crate::{
    demo, util::new_id, Key, NotificationData, NotificationKind, RecordId, Result, Storage,
    TrackerContext, UserData,
};

/// Per-user notification lists, newest first
pub struct Notifications<S> {
    context: TrackerContext<S>,
}

impl<S> Clone for Notifications<S> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

/// A notification to deliver
#[derive(Debug)]
pub struct NewNotification {
    /// The recipient
    pub user_id: RecordId,
    pub message: String,
    pub kind: NotificationKind,
    pub link: Option<String>,
}

impl<S> Notifications<S>
where
    S: Storage,
{
    pub fn new(context: &TrackerContext<S>) -> Self {
        Self {
            context: context.clone(),
        }
    }

    /// Delivers a notification to the recipient's list
    pub fn notify(&self, new_notification: NewNotification) -> Result<NotificationData> {
        let notification = NotificationData {
            id: new_id(),
            user_id: new_notification.user_id,
            message: new_notification.message,
            kind: new_notification.kind,
            read: false,
            created_at: Utc::now(),
            link: new_notification.link,
        };

        let key = Key::Notifications(notification.user_id.clone());
        let mut list = self.load(&key, &notification.user_id)?;

        list.insert(0, notification.clone());
        self.context.save_list(&key, &list)?;

        debug!("Notified {}: {}", notification.user_id, notification.message);

        Ok(notification)
    }

    pub fn list(&self, user: &UserData) -> Result<Vec<NotificationData>> {
        self.load(&Key::Notifications(user.id.clone()), &user.id)
    }

    pub fn unread_count(&self, user: &UserData) -> Result<usize> {
        Ok(self.list(user)?.iter().filter(|n| !n.read).count())
    }

    /// Marks a single notification as read, unknown ids are ignored
    pub fn mark_as_read(&self, user: &UserData, notification_id: &str) -> Result<()> {
        self.update(user, |list| {
            list.iter_mut()
                .filter(|n| n.id == notification_id)
                .for_each(|n| n.read = true)
        })
    }

    pub fn mark_all_as_read(&self, user: &UserData) -> Result<()> {
        self.update(user, |list| list.iter_mut().for_each(|n| n.read = true))
    }

    /// Removes every notification of the user
    pub fn clear(&self, user: &UserData) -> Result<()> {
        self.update(user, |list| list.clear())
    }

    fn update<F>(&self, user: &UserData, f: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<NotificationData>),
    {
        let key = Key::Notifications(user.id.clone());
        let mut list = self.load(&key, &user.id)?;

        f(&mut list);
        self.context.save_list(&key, &list)
    }

    fn load(&self, key: &Key, user_id: &str) -> Result<Vec<NotificationData>> {
        self.context
            .load_list(key, || demo::notifications(user_id, Utc::now()))
    }
}

#[cfg(test)]
mod test {
    use crate::testing::{student, tracker};

    use super::*;

    fn info(user: &UserData, message: &str) -> NewNotification {
        NewNotification {
            user_id: user.id.clone(),
            message: message.to_string(),
            kind: NotificationKind::Info,
            link: None,
        }
    }

    #[test]
    fn newest_first() {
        let tracker = tracker();
        let alice = student(&tracker, "20CS101");

        tracker.notifications.notify(info(&alice, "first")).unwrap();
        tracker.notifications.notify(info(&alice, "second")).unwrap();

        let messages: Vec<_> = tracker
            .notifications
            .list(&alice)
            .unwrap()
            .into_iter()
            .map(|n| n.message)
            .collect();

        assert_eq!(messages, vec!["second".to_string(), "first".to_string()]);
    }

    #[test]
    fn read_state() {
        let tracker = tracker();
        let alice = student(&tracker, "20CS101");

        let first = tracker.notifications.notify(info(&alice, "first")).unwrap();
        tracker.notifications.notify(info(&alice, "second")).unwrap();
        assert_eq!(tracker.notifications.unread_count(&alice).unwrap(), 2);

        tracker.notifications.mark_as_read(&alice, &first.id).unwrap();
        tracker.notifications.mark_as_read(&alice, "missing").unwrap();
        assert_eq!(tracker.notifications.unread_count(&alice).unwrap(), 1);

        tracker.notifications.mark_all_as_read(&alice).unwrap();
        assert_eq!(tracker.notifications.unread_count(&alice).unwrap(), 0);

        tracker.notifications.clear(&alice).unwrap();
        assert!(tracker.notifications.list(&alice).unwrap().is_empty());
    }

    #[test]
    fn lists_are_per_user() {
        let tracker = tracker();
        let alice = student(&tracker, "20CS101");
        let bob = student(&tracker, "20CS102");

        tracker.notifications.notify(info(&bob, "for bob")).unwrap();

        assert!(tracker.notifications.list(&alice).unwrap().is_empty());
        assert_eq!(tracker.notifications.list(&bob).unwrap().len(), 1);
    }
}
