use serde::{Deserialize, Serialize};

// Required fields are Options so presence can be checked before any query
// runs, with the API's own 400 body instead of a deserialization rejection

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct CreateCommentRequest {
    pub username: Option<String>,
    pub body: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct CreateArticleRequest {
    pub author: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub topic: Option<String>,
    pub article_img_url: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct CreateTopicRequest {
    pub slug: Option<String>,
    pub description: Option<String>,
}
