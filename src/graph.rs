//! Undirected friendship graph and the friend-suggestion query.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::GraphError;

/// A second-degree contact together with the number of direct friends that
/// connect the queried user to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub name: String,
    pub mutual_friends: usize,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.mutual_friends)
    }
}

/// Users and their symmetric friendships.
///
/// Every name stored in a friend set is also a key of the adjacency map, and
/// `v` is in `friends_of(u)` exactly when `u` is in `friends_of(v)`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SocialGraph {
    adjacency: HashMap<String, HashSet<String>>, // user -> friends
}

impl SocialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` with no friends.
    pub fn add_user(&mut self, name: &str) -> Result<(), GraphError> {
        if name.is_empty() {
            return Err(GraphError::EmptyName);
        }
        if self.adjacency.contains_key(name) {
            return Err(GraphError::UserAlreadyExists);
        }
        self.adjacency.insert(name.to_string(), HashSet::new());
        Ok(())
    }

    /// Connects two registered users. Never creates nodes.
    pub fn add_friendship(&mut self, u: &str, v: &str) -> Result<(), GraphError> {
        if !self.adjacency.contains_key(u) || !self.adjacency.contains_key(v) {
            return Err(GraphError::UsersNotFound);
        }
        if u == v {
            return Err(GraphError::SelfFriendship);
        }
        if self.adjacency[u].contains(v) {
            return Err(GraphError::FriendshipAlreadyExists); // symmetric, so checking one side is enough
        }
        self.link(u, v);
        Ok(())
    }

    /// Inserts an edge read back from persistence, creating either endpoint
    /// if it was never declared as a user. Returns `false` for a self-edge,
    /// which is not inserted.
    pub fn insert_loaded_edge(&mut self, u: &str, v: &str) -> bool {
        if u == v {
            return false;
        }
        self.link(u, v);
        true
    }

    /// Registers a persisted user name; a repeated name is ignored.
    pub fn insert_loaded_user(&mut self, name: &str) {
        self.node_mut(name);
    }

    /// Ranks every friend-of-a-friend of `user` that is neither `user` nor
    /// already a direct friend, by mutual-friend count (descending) then name.
    pub fn suggest(&self, user: &str) -> Result<Vec<Suggestion>, GraphError> {
        let friends = self.adjacency.get(user).ok_or(GraphError::UserNotFound)?;

        let mut mutuals: HashMap<&str, usize> = HashMap::new();
        for friend in friends {
            if let Some(second_degree) = self.adjacency.get(friend) {
                for candidate in second_degree {
                    if candidate != user && !friends.contains(candidate) {
                        *mutuals.entry(candidate.as_str()).or_default() += 1;
                    }
                }
            }
        }

        if mutuals.is_empty() {
            return Err(GraphError::NoSuggestions);
        }

        let mut suggestions: Vec<Suggestion> = mutuals
            .into_iter()
            .map(|(name, mutual_friends)| Suggestion {
                name: name.to_string(),
                mutual_friends,
            })
            .collect();
        suggestions.sort_by(|a, b| {
            b.mutual_friends
                .cmp(&a.mutual_friends)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(suggestions)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    pub fn friends_of(&self, name: &str) -> Option<&HashSet<String>> {
        self.adjacency.get(name)
    }

    pub fn user_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn friendship_count(&self) -> usize {
        self.adjacency.values().map(HashSet::len).sum::<usize>() / 2 // each edge is stored twice
    }

    /// All user names in ascending order.
    pub fn users(&self) -> Vec<&str> {
        let mut users: Vec<&str> = self.adjacency.keys().map(String::as_str).collect();
        users.sort_unstable();
        users
    }

    /// Every undirected edge once, as `(smaller, larger)`, sorted.
    pub fn friendships(&self) -> Vec<(&str, &str)> {
        let mut edges: Vec<(&str, &str)> = self
            .adjacency
            .iter()
            .flat_map(|(user, friends)| {
                friends
                    .iter()
                    .filter(move |friend| user.as_str() < friend.as_str())
                    .map(move |friend| (user.as_str(), friend.as_str()))
            })
            .collect();
        edges.sort_unstable();
        edges
    }

    // get-or-create
    fn node_mut(&mut self, name: &str) -> &mut HashSet<String> {
        self.adjacency.entry(name.to_string()).or_default()
    }

    fn link(&mut self, u: &str, v: &str) {
        self.node_mut(u).insert(v.to_string());
        self.node_mut(v).insert(u.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(users: &[&str], edges: &[(&str, &str)]) -> SocialGraph {
        let mut graph = SocialGraph::new();
        for user in users {
            graph.add_user(user).unwrap();
        }
        for (u, v) in edges {
            graph.add_friendship(u, v).unwrap();
        }
        graph
    }

    fn assert_symmetric(graph: &SocialGraph) {
        for user in graph.users() {
            for friend in graph.friends_of(user).unwrap() {
                let back = graph.friends_of(friend).expect("friend must be a node");
                assert!(back.contains(user), "{} -> {} has no reverse edge", user, friend);
            }
        }
    }

    #[test]
    fn test_add_user_twice() {
        let mut graph = SocialGraph::new();
        assert_eq!(graph.add_user("alice"), Ok(()));
        assert_eq!(graph.add_user("alice"), Err(GraphError::UserAlreadyExists));
        assert_eq!(graph.user_count(), 1);
        assert!(graph.friends_of("alice").unwrap().is_empty());
    }

    #[test]
    fn test_add_user_keeps_existing_friends() {
        let mut graph = graph_with(&["alice", "bob"], &[("alice", "bob")]);
        assert_eq!(graph.add_user("alice"), Err(GraphError::UserAlreadyExists));
        assert_eq!(graph.friends_of("alice").unwrap().len(), 1);
    }

    #[test]
    fn test_add_user_rejects_empty_name() {
        let mut graph = SocialGraph::new();
        assert_eq!(graph.add_user(""), Err(GraphError::EmptyName));
        assert_eq!(graph.user_count(), 0);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut graph = SocialGraph::new();
        graph.add_user("Alice").unwrap();
        assert_eq!(graph.add_user("alice"), Ok(()));
        assert_eq!(graph.user_count(), 2);
    }

    #[test]
    fn test_add_friendship_is_symmetric() {
        let graph = graph_with(&["a", "b", "c"], &[("a", "b"), ("c", "a")]);
        assert!(graph.friends_of("b").unwrap().contains("a"));
        assert!(graph.friends_of("a").unwrap().contains("c"));
        assert_eq!(graph.friendship_count(), 2);
        assert_symmetric(&graph);
    }

    #[test]
    fn test_add_friendship_twice() {
        let mut graph = graph_with(&["a", "b"], &[("a", "b")]);
        assert_eq!(
            graph.add_friendship("a", "b"),
            Err(GraphError::FriendshipAlreadyExists)
        );
        assert_eq!(
            graph.add_friendship("b", "a"),
            Err(GraphError::FriendshipAlreadyExists)
        ); // reverse direction is the same edge
        assert_eq!(graph.friendships(), vec![("a", "b")]);
    }

    #[test]
    fn test_add_friendship_missing_user() {
        let mut graph = graph_with(&["a"], &[]);
        assert_eq!(graph.add_friendship("a", "ghost"), Err(GraphError::UsersNotFound));
        assert_eq!(graph.add_friendship("ghost", "a"), Err(GraphError::UsersNotFound));
        assert_eq!(graph.add_friendship("a", ""), Err(GraphError::UsersNotFound));
        assert!(!graph.contains("ghost")); // no node introduced
        assert_eq!(graph.user_count(), 1);
        assert_eq!(graph.friendship_count(), 0);
    }

    #[test]
    fn test_add_friendship_with_self() {
        let mut graph = graph_with(&["a"], &[]);
        assert_eq!(graph.add_friendship("a", "a"), Err(GraphError::SelfFriendship));
        assert!(graph.friends_of("a").unwrap().is_empty());
        // existence is checked first
        assert_eq!(graph.add_friendship("z", "z"), Err(GraphError::UsersNotFound));
    }

    #[test]
    fn test_insert_loaded_edge_creates_nodes() {
        let mut graph = SocialGraph::new();
        assert!(graph.insert_loaded_edge("x", "y"));
        assert!(graph.contains("x"));
        assert!(graph.contains("y"));
        assert!(!graph.insert_loaded_edge("x", "x"));
        assert_eq!(graph.friendship_count(), 1);
        assert_symmetric(&graph);
    }

    #[test]
    fn test_suggest_counts_mutual_friends() {
        let graph = graph_with(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
        );
        let suggestions = graph.suggest("A").unwrap();
        assert_eq!(
            suggestions,
            vec![Suggestion {
                name: "D".to_string(),
                mutual_friends: 2
            }]
        ); // B and C are direct friends, A is the user
    }

    #[test]
    fn test_suggest_order() {
        let graph = graph_with(
            &["me", "f1", "f2", "x", "y", "z"],
            &[
                ("me", "f1"),
                ("me", "f2"),
                ("f1", "z"),
                ("f1", "y"),
                ("f2", "y"),
                ("f2", "x"),
            ],
        );
        let rendered: Vec<String> = graph
            .suggest("me")
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered, vec!["y (2)", "x (1)", "z (1)"]);
    }

    #[test]
    fn test_suggest_excludes_direct_friends() {
        // triangle plus a tail: a-b, b-c, a-c, c-d
        let graph = graph_with(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("a", "c"), ("c", "d")],
        );
        let names: Vec<String> = graph
            .suggest("a")
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["d"]);
    }

    #[test]
    fn test_suggest_nothing() {
        let graph = graph_with(&["alice", "bob", "carol", "loner"], &[("alice", "bob"), ("alice", "carol")]);
        assert_eq!(graph.suggest("loner"), Err(GraphError::NoSuggestions));
        assert_eq!(graph.suggest("alice"), Err(GraphError::NoSuggestions));
        assert_eq!(graph.suggest("bob").unwrap()[0].name, "carol");
    }

    #[test]
    fn test_suggest_unknown_user() {
        let graph = SocialGraph::new();
        assert_eq!(graph.suggest("ghost"), Err(GraphError::UserNotFound));
        assert_eq!(graph.suggest(""), Err(GraphError::UserNotFound));
    }

    #[test]
    fn test_users_and_friendships_sorted() {
        let graph = graph_with(&["c", "a", "b"], &[("c", "a"), ("b", "c")]);
        assert_eq!(graph.users(), vec!["a", "b", "c"]);
        assert_eq!(graph.friendships(), vec![("a", "c"), ("b", "c")]);
    }
}
