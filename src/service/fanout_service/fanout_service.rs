use crate::{dto::input, error::Error};
use axum::async_trait;
use uuid::Uuid;

///
/// Service turning domain events into stored notifications
/// and pushing them to live subscribers.
///
/// Every fanout first writes to the database
/// and publishes only what was actually written.
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FanoutService: Send + Sync {
    ///
    /// Notifies followee about the new follower.
    /// Notification is created at most once per follower and followee pair.
    ///
    /// ### Errors
    /// - [Error::Database] when database query fails
    ///
    async fn follow_fanout(&self, follower: &input::Actor, followee_id: Uuid)
        -> Result<(), Error>;

    ///
    /// Notifies every subscriber of the commented post except the comment author.
    ///
    /// ### Errors
    /// - [Error::Database] when database query fails
    ///
    async fn comment_fanout(&self, comment: &input::Comment) -> Result<(), Error>;

    ///
    /// Notifies users mentioned in the comment.
    /// Does not touch database when the comment has no mentions.
    ///
    /// ### Errors
    /// - [Error::Database] when database query fails
    ///
    async fn comment_mention_fanout(&self, comment: &input::Comment) -> Result<(), Error>;

    ///
    /// Notifies users mentioned in the post.
    /// Does not touch database when the post has no mentions.
    ///
    /// ### Errors
    /// - [Error::Database] when database query fails
    ///
    async fn post_mention_fanout(&self, post: &input::Post) -> Result<(), Error>;

    ///
    /// Puts the post in timelines of all author's followers.
    ///
    /// ### Errors
    /// - [Error::Database] when database query fails
    ///
    async fn feed_fanout(&self, post: &input::Post) -> Result<(), Error>;

    ///
    /// Pushes the comment to everyone watching the post. Nothing is stored.
    ///
    fn broadcast_comment(&self, comment: &input::Comment);
}
