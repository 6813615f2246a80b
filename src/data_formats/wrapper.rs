use serde::{Deserialize, Serialize};

use crate::models::{Article, Comment, Topic, User};

// Envelope keys are part of the public contract and must not change:
// clients read `article` for lists as well as single articles, and the
// article vote patch responds under `addedVotes`.

#[derive(Debug, Deserialize, Serialize)]
pub struct TopicsWrapper {
    pub topics: Vec<Topic>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TopicWrapper {
    pub topic: Topic,
}

#[derive(Debug, Serialize)]
pub struct ArticleWrapper<T> {
    pub article: T,
}

#[derive(Debug, Serialize)]
pub struct AddedVotesWrapper {
    #[serde(rename = "addedVotes")]
    pub added_votes: Article,
}

#[derive(Debug, Serialize)]
pub struct CommentWrapper {
    pub comment: Comment,
}

#[derive(Debug, Serialize)]
pub struct CommentsWrapper {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UsersWrapper {
    pub users: Vec<User>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UserWrapper {
    pub user: User,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct EndpointsWrapper {
    pub endpoints: serde_json::Value,
}
