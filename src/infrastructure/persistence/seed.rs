use crate::domain::errors::TrackError;
use crate::domain::repositories::ProblemRepository;
use tracing::info;

/// The built-in practice catalog: (slug, title, difficulty, topic).
const CATALOG: &[(&str, &str, &str, &str)] = &[
    ("two-sum", "Two Sum", "easy", "arrays"),
    ("valid-parentheses", "Valid Parentheses", "easy", "stack"),
    ("merge-two-sorted-lists", "Merge Two Sorted Lists", "easy", "linked-list"),
    ("best-time-to-buy-and-sell-stock", "Best Time to Buy and Sell Stock", "easy", "arrays"),
    ("valid-anagram", "Valid Anagram", "easy", "hashing"),
    ("binary-search", "Binary Search", "easy", "binary-search"),
    ("linked-list-cycle", "Linked List Cycle", "easy", "linked-list"),
    ("invert-binary-tree", "Invert Binary Tree", "easy", "trees"),
    ("three-sum", "3Sum", "medium", "two-pointers"),
    ("longest-substring-without-repeating", "Longest Substring Without Repeating Characters", "medium", "sliding-window"),
    ("product-of-array-except-self", "Product of Array Except Self", "medium", "arrays"),
    ("group-anagrams", "Group Anagrams", "medium", "hashing"),
    ("top-k-frequent-elements", "Top K Frequent Elements", "medium", "heap"),
    ("coin-change", "Coin Change", "medium", "dynamic-programming"),
    ("course-schedule", "Course Schedule", "medium", "graphs"),
    ("number-of-islands", "Number of Islands", "medium", "graphs"),
    ("lru-cache", "LRU Cache", "medium", "design"),
    ("word-break", "Word Break", "medium", "dynamic-programming"),
    ("trapping-rain-water", "Trapping Rain Water", "hard", "two-pointers"),
    ("median-of-two-sorted-arrays", "Median of Two Sorted Arrays", "hard", "binary-search"),
    ("merge-k-sorted-lists", "Merge k Sorted Lists", "hard", "heap"),
    ("sliding-window-maximum", "Sliding Window Maximum", "hard", "sliding-window"),
];

/// Seed the problem catalog. Idempotent: entries whose slug already exists
/// are left untouched.
pub async fn seed_catalog(repo: &dyn ProblemRepository) -> Result<usize, TrackError> {
    let mut inserted = 0;

    for (slug, title, difficulty, topic) in CATALOG {
        if repo.find_by_slug(slug).await?.is_none() {
            repo.insert(slug, title, difficulty, topic).await?;
            inserted += 1;
        }
    }

    info!(inserted, total = CATALOG.len(), "Catalog seeded");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::problem::Difficulty;
    use std::str::FromStr;

    #[test]
    fn test_catalog_slugs_unique() {
        let mut slugs: Vec<&str> = CATALOG.iter().map(|(s, _, _, _)| *s).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), CATALOG.len());
    }

    #[test]
    fn test_catalog_difficulties_valid() {
        for (slug, _, difficulty, _) in CATALOG {
            assert!(
                Difficulty::from_str(difficulty).is_ok(),
                "bad difficulty for {}",
                slug
            );
        }
    }
}
