use {
    serde::{Deserialize, Serialize},
    std::collections::BTreeMap,
};

/// `{ "users": { "<id>": "<name>" } }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersPayload {
    pub users: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    #[serde(rename = "userid")]
    pub user_id: u64,
    pub content: String,
}

/// `{ "posts": [...] }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostsPayload {
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    #[serde(rename = "postid")]
    pub post_id: u64,
    pub content: String,
}

/// `{ "comments": [...] }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentsPayload {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPostCount {
    pub id: String,
    pub name: String,
    pub post_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWithComments {
    #[serde(flatten)]
    pub post: Post,
    pub comment_count: usize,
}
