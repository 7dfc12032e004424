use crate::domain::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct PostId(pub u32);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A feed post doubling as a product listing.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Post {
    pub id: PostId,
    pub seller: String,
    pub caption: String,
    pub price: Money,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub likes: u32,
    pub comments: u32,
}

/// Copy-on-write set of liked posts.
///
/// Each toggle builds a new set and swaps the `Arc`, so readers holding a
/// `snapshot()` observe either the state before the toggle or after it,
/// never a partially mutated set.
#[derive(Debug, Default, Clone)]
pub struct LikedPosts {
    posts: Arc<HashSet<PostId>>,
}

impl LikedPosts {
    pub fn new(initial: impl IntoIterator<Item = PostId>) -> Self {
        Self {
            posts: Arc::new(initial.into_iter().collect()),
        }
    }

    pub fn contains(&self, post: PostId) -> bool {
        self.posts.contains(&post)
    }

    /// Flips the liked state of `post` and returns the new state.
    pub fn toggle(&mut self, post: PostId) -> bool {
        let mut next: HashSet<PostId> = (*self.posts).clone();
        let liked = if next.remove(&post) {
            false
        } else {
            next.insert(post);
            true
        };
        self.posts = Arc::new(next);
        liked
    }

    pub fn snapshot(&self) -> Arc<HashSet<PostId>> {
        Arc::clone(&self.posts)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// The mock feed the storefront demo ships with.
pub fn demo_posts() -> Vec<Post> {
    vec![
        Post {
            id: PostId(1),
            seller: "fashion_studio_kz".to_string(),
            caption: "New spring/summer collection, pure cotton dress".to_string(),
            price: Money::from_tenge(25_000),
            sizes: ["XS", "S", "M", "L", "XL"].map(String::from).to_vec(),
            colors: ["Black", "White", "Beige"].map(String::from).to_vec(),
            likes: 234,
            comments: 18,
        },
        Post {
            id: PostId(2),
            seller: "street_style_almaty".to_string(),
            caption: "Denim jacket, the must-have of the season".to_string(),
            price: Money::from_tenge(18_500),
            sizes: ["S", "M", "L", "XL"].map(String::from).to_vec(),
            colors: ["Blue", "Black"].map(String::from).to_vec(),
            likes: 156,
            comments: 12,
        },
        Post {
            id: PostId(3),
            seller: "luxury_boutique".to_string(),
            caption: "Elegant leather heels".to_string(),
            price: Money::from_tenge(45_000),
            sizes: ["36", "37", "38", "39", "40"].map(String::from).to_vec(),
            colors: ["Black", "Brown", "Red"].map(String::from).to_vec(),
            likes: 89,
            comments: 7,
        },
    ]
}
