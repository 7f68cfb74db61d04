use rocket::serde::{Serialize, Serializer};

/// Ranked collection that serializes as a plain json array.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaderboard<T: LeaderboardItem> {
    collection: Vec<T>,
}

impl<T: LeaderboardItem> Leaderboard<T> {
    pub fn new(collection: Vec<T>) -> Self {
        Self { collection }
    }

    /// Keeps the `n` greatest items, greatest first.
    pub fn top(mut self, n: usize) -> Self {
        self.collection.sort_by(|a, b| b.cmp(a));
        self.collection.truncate(n);
        self
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }
}

impl<T: LeaderboardItem> Serialize for Leaderboard<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.collection)
    }
}

pub trait LeaderboardItem: Ord + Serialize {}

impl<T: Ord + Serialize> LeaderboardItem for T {}
