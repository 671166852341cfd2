// src/search/mod.rs
//! In-memory post filtering and the listing page's search states.
//!
//! No indexing, no ranking: a linear scan that preserves the relative
//! order of the input list. The state machine is synchronous and has no
//! terminal state — it transitions on every input change.

use crate::model::Post;

/// Case-insensitive substring filter over title, description, and tags.
/// An empty or whitespace-only term returns the full list unfiltered.
pub fn filter_posts<'a>(posts: &'a [Post], term: &str) -> Vec<&'a Post> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return posts.iter().collect();
    }

    posts
        .iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&needle)
                || post.description.to_lowercase().contains(&needle)
                || post
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle))
        })
        .collect()
}

/// The search box's state: idle until a term is entered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Filtering {
        term: String,
    },
}

/// What the listing renders for a given state and post list.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchView<'a> {
    /// Post cards, in list order.
    Results(Vec<&'a Post>),
    /// "No posts found" with the offending term and a clear-search action.
    EmptyWithTerm(&'a str),
    /// The coming-soon placeholder: no posts exist and nothing was searched.
    Placeholder,
}

impl SearchState {
    /// Transition taken on every keystroke. A blanked-out term returns
    /// to idle; anything else filters.
    #[allow(dead_code)] // Library surface; the generated page drives this client-side
    pub fn on_input(&mut self, term: &str) {
        if term.trim().is_empty() {
            *self = SearchState::Idle;
        } else {
            *self = SearchState::Filtering {
                term: term.to_string(),
            };
        }
    }

    /// Resolves the state against a post list into the rendered outcome.
    pub fn view<'a>(&'a self, posts: &'a [Post]) -> SearchView<'a> {
        match self {
            SearchState::Idle => {
                if posts.is_empty() {
                    SearchView::Placeholder
                } else {
                    SearchView::Results(posts.iter().collect())
                }
            }
            SearchState::Filtering { term } => {
                let matches = filter_posts(posts, term);
                if matches.is_empty() {
                    SearchView::EmptyWithTerm(term)
                } else {
                    SearchView::Results(matches)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NotionId;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn post(n: u8, title: &str, description: &str, tags: &[&str]) -> Post {
        let id = NotionId::parse(&format!("{:032x}", n as u128)).unwrap();
        Post {
            url: id.to_public_url(),
            id,
            title: title.to_string(),
            slug: slug::slugify(title),
            description: description.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            status: "Published".to_string(),
            published_at: Utc.with_ymd_and_hms(2024, 1, n as u32, 0, 0, 0).unwrap(),
            cover: None,
            author: None,
        }
    }

    fn fixture() -> Vec<Post> {
        vec![
            post(1, "Building With Rust", "Systems programming notes", &["rust"]),
            post(2, "CSS Grid Deep Dive", "Layout techniques", &["css", "frontend"]),
            post(3, "My Year In Review", "Looking back at 2023", &["personal"]),
        ]
    }

    #[test]
    fn matches_title_description_and_tags_case_insensitively() {
        let posts = fixture();

        let by_title = filter_posts(&posts, "RUST");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "Building With Rust");

        let by_description = filter_posts(&posts, "layout");
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].title, "CSS Grid Deep Dive");

        let by_tag = filter_posts(&posts, "personal");
        assert_eq!(by_tag.len(), 1);
        assert_eq!(by_tag[0].title, "My Year In Review");
    }

    #[test]
    fn empty_query_returns_the_full_list_in_order() {
        let posts = fixture();
        let all = filter_posts(&posts, "");
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].title, "Building With Rust");
        assert_eq!(all[2].title, "My Year In Review");

        // Whitespace-only is the same as empty.
        assert_eq!(filter_posts(&posts, "   ").len(), 3);
    }

    #[test]
    fn no_match_returns_nothing() {
        let posts = fixture();
        assert!(filter_posts(&posts, "quantum").is_empty());
    }

    #[test]
    fn state_machine_transitions_on_every_input() {
        let posts = fixture();
        let mut state = SearchState::default();
        assert_eq!(state, SearchState::Idle);

        state.on_input("css");
        match state.view(&posts) {
            SearchView::Results(matches) => assert_eq!(matches.len(), 1),
            other => panic!("Expected results, got {:?}", other),
        }

        state.on_input("quantum");
        assert_eq!(state.view(&posts), SearchView::EmptyWithTerm("quantum"));

        state.on_input("");
        assert_eq!(state, SearchState::Idle);
        match state.view(&posts) {
            SearchView::Results(matches) => assert_eq!(matches.len(), 3),
            other => panic!("Expected full list, got {:?}", other),
        }
    }

    #[test]
    fn idle_with_no_posts_shows_the_placeholder() {
        let state = SearchState::default();
        assert_eq!(state.view(&[]), SearchView::Placeholder);
    }
}
