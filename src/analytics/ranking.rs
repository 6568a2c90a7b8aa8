//! Pure ranking over already-fetched users, posts and comment counts

use {
    super::types::{Post, PostWithComments, UserPostCount},
    std::cmp::Ordering,
};

/// Numeric ids sort numerically, anything else after them lexically
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Users with the most posts first, ties by id ascending
pub fn rank_users(mut counts: Vec<UserPostCount>, limit: usize) -> Vec<UserPostCount> {
    counts.sort_by(|a, b| {
        b.post_count
            .cmp(&a.post_count)
            .then_with(|| compare_ids(&a.id, &b.id))
    });
    counts.truncate(limit);
    counts
}

/// Highest post id first
pub fn latest(mut posts: Vec<Post>, limit: usize) -> Vec<Post> {
    posts.sort_by(|a, b| b.id.cmp(&a.id));
    posts.truncate(limit);
    posts
}

/// Every post sharing the maximum comment count, by post id
pub fn most_commented(mut posts: Vec<PostWithComments>) -> Vec<PostWithComments> {
    let Some(max) = posts.iter().map(|p| p.comment_count).max() else {
        return Vec::new();
    };

    posts.retain(|p| p.comment_count == max);
    posts.sort_by_key(|p| p.post.id);
    posts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, post_count: usize) -> UserPostCount {
        UserPostCount {
            id: id.to_string(),
            name: format!("user {}", id),
            post_count,
        }
    }

    fn post(id: u64, user_id: u64) -> Post {
        Post {
            id,
            user_id,
            content: format!("post {}", id),
        }
    }

    #[test]
    fn test_rank_users_by_post_count() {
        let ranked = rank_users(
            vec![user("1", 2), user("2", 5), user("10", 3), user("3", 3), user("4", 0)],
            3,
        );

        let ids: Vec<&str> = ranked.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "10"]);
    }

    #[test]
    fn test_latest_posts() {
        let posts = vec![post(3, 1), post(9, 2), post(1, 1), post(7, 3)];

        let ids: Vec<u64> = latest(posts, 2).iter().map(|p| p.id).collect();

        assert_eq!(ids, vec![9, 7]);
    }

    #[test]
    fn test_most_commented_keeps_ties() {
        let posts = vec![
            PostWithComments { post: post(4, 1), comment_count: 2 },
            PostWithComments { post: post(2, 1), comment_count: 5 },
            PostWithComments { post: post(8, 2), comment_count: 5 },
        ];

        let ids: Vec<u64> = most_commented(posts).iter().map(|p| p.post.id).collect();

        assert_eq!(ids, vec![2, 8]);
    }

    #[test]
    fn test_most_commented_empty() {
        assert!(most_commented(Vec::new()).is_empty());
    }
}
