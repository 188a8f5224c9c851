/// Review filter-and-aggregate engine behind the admin moderation view.
///
/// Pure functions over the in-memory snapshot: the component feeds the
/// full review list plus the active criteria and renders whatever comes
/// back. Filters compose with AND; only the free-text search is an OR
/// across its three fields. Order of the input is preserved.
use std::collections::HashMap;

use chrono::{DateTime, Duration, Months, Utc};

use crate::models::book::Book;
use crate::models::review::Review;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingFilter {
    #[default]
    All,
    Exactly(u8),
}

impl RatingFilter {
    /// Parse the admin select's value (`"all"` or `"1"`..`"5"`).
    /// Anything unrecognized falls back to `All`.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<u8>() {
            Ok(n) if (1..=5).contains(&n) => RatingFilter::Exactly(n),
            _ => RatingFilter::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFilter {
    #[default]
    All,
    Today,
    Week,
    Month,
    Year,
}

impl DateFilter {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "today" => DateFilter::Today,
            "week" => DateFilter::Week,
            "month" => DateFilter::Month,
            "year" => DateFilter::Year,
            _ => DateFilter::All,
        }
    }

    /// The oldest `date` a review may have and still pass. `None` means
    /// no constraint. `Today` means the start of the current UTC day;
    /// `Month`/`Year` subtract calendar units, not fixed day counts.
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            DateFilter::All => None,
            DateFilter::Today => now
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .map(|start| start.and_utc()),
            DateFilter::Week => Some(now - Duration::days(7)),
            DateFilter::Month => Some(
                now.checked_sub_months(Months::new(1))
                    .unwrap_or_else(|| now - Duration::days(30)),
            ),
            DateFilter::Year => Some(
                now.checked_sub_months(Months::new(12))
                    .unwrap_or_else(|| now - Duration::days(365)),
            ),
        }
    }
}

/// The active criteria of the admin review view. Empty strings mean
/// "no constraint", never "match nothing".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewFilters {
    pub rating: RatingFilter,
    pub search: String,
    pub book_title: String,
    pub author: String,
    pub publisher: String,
    pub date: DateFilter,
}

impl ReviewFilters {
    pub fn is_unconstrained(&self) -> bool {
        self.rating == RatingFilter::All
            && self.search.trim().is_empty()
            && self.book_title.trim().is_empty()
            && self.author.trim().is_empty()
            && self.publisher.trim().is_empty()
            && self.date == DateFilter::All
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Apply the active criteria to the full review list. Stable: the output
/// is a subsequence of the input. Reviews whose book cannot be resolved
/// are dropped by the title/author/publisher filters but survive every
/// other criterion.
pub fn filter_reviews(
    reviews: &[Review],
    books: &[Book],
    filters: &ReviewFilters,
    now: DateTime<Utc>,
) -> Vec<Review> {
    let by_id: HashMap<&str, &Book> = books.iter().map(|b| (b.id.as_str(), b)).collect();
    let cutoff = filters.date.cutoff(now);
    let search = filters.search.trim();
    let book_title = filters.book_title.trim();
    let author = filters.author.trim();
    let publisher = filters.publisher.trim();

    reviews
        .iter()
        .filter(|review| {
            if let RatingFilter::Exactly(stars) = filters.rating {
                if review.rating != stars {
                    return false;
                }
            }
            if !search.is_empty() {
                let in_name = contains_ci(&review.user_name, search);
                let in_title = review
                    .title
                    .as_deref()
                    .map(|t| contains_ci(t, search))
                    .unwrap_or(false);
                let in_content = contains_ci(&review.content, search);
                if !(in_name || in_title || in_content) {
                    return false;
                }
            }
            if !book_title.is_empty() || !author.is_empty() || !publisher.is_empty() {
                let Some(book) = by_id.get(review.book_id.as_str()) else {
                    return false;
                };
                if !book_title.is_empty() && !contains_ci(&book.title, book_title) {
                    return false;
                }
                if !author.is_empty() && !contains_ci(&book.author, author) {
                    return false;
                }
                if !publisher.is_empty() && !contains_ci(&book.publisher, publisher) {
                    return false;
                }
            }
            if let Some(cutoff) = cutoff {
                if review.date < cutoff {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

/// Tally of ratings 1..=5 over the *unfiltered* review set. Index 0 is
/// one star. Out-of-range ratings never increment a bucket.
pub fn rating_distribution(reviews: &[Review]) -> [u32; 5] {
    let mut buckets = [0u32; 5];
    for review in reviews {
        if (1..=5).contains(&review.rating) {
            buckets[usize::from(review.rating) - 1] += 1;
        }
    }
    buckets
}

/// Mean of the in-range ratings, or `None` when there are none.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    let buckets = rating_distribution(reviews);
    let count: u32 = buckets.iter().sum();
    if count == 0 {
        return None;
    }
    let total: u32 = buckets
        .iter()
        .enumerate()
        .map(|(i, n)| (i as u32 + 1) * n)
        .sum();
    Some(f64::from(total) / f64::from(count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn book(id: &str, title: &str, author: &str, publisher: &str) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            genre: vec![],
            publisher: publisher.to_string(),
            published_year: 2020,
            cover_url: None,
        }
    }

    fn review(id: &str, book_id: &str, user: &str, rating: u8, days_ago: i64) -> Review {
        let now = Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();
        Review {
            id: id.to_string(),
            book_id: book_id.to_string(),
            user_name: user.to_string(),
            user_avatar: None,
            rating,
            title: None,
            content: format!("review body {id}"),
            date: now - Duration::days(days_ago),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap()
    }

    #[test]
    fn rating_filter_parses_select_values() {
        assert_eq!(RatingFilter::parse("all"), RatingFilter::All);
        assert_eq!(RatingFilter::parse("4"), RatingFilter::Exactly(4));
        assert_eq!(RatingFilter::parse("9"), RatingFilter::All);
        assert_eq!(RatingFilter::parse(""), RatingFilter::All);
    }

    #[test]
    fn unconstrained_ignores_whitespace_only_fields() {
        assert!(ReviewFilters::default().is_unconstrained());
        let spaced = ReviewFilters {
            search: "   ".to_string(),
            ..Default::default()
        };
        assert!(spaced.is_unconstrained());
        let rated = ReviewFilters {
            rating: RatingFilter::Exactly(3),
            ..Default::default()
        };
        assert!(!rated.is_unconstrained());
    }

    #[test]
    fn today_cutoff_is_start_of_day() {
        let cutoff = DateFilter::Today.cutoff(now()).unwrap();
        assert_eq!(cutoff, Utc.with_ymd_and_hms(2026, 8, 29, 0, 0, 0).unwrap());
    }

    #[test]
    fn month_cutoff_subtracts_a_calendar_month() {
        let cutoff = DateFilter::Month.cutoff(now()).unwrap();
        assert_eq!(cutoff, Utc.with_ymd_and_hms(2026, 7, 29, 12, 0, 0).unwrap());
    }

    #[test]
    fn unconstrained_filters_keep_everything_in_order() {
        let reviews = vec![
            review("r1", "b1", "alice", 5, 0),
            review("r2", "b1", "bob", 3, 2),
            review("r3", "b2", "carol", 1, 40),
        ];
        let out = filter_reviews(&reviews, &[], &ReviewFilters::default(), now());
        assert_eq!(out, reviews);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let mut titled = review("r2", "b1", "bob", 3, 0);
        titled.title = Some("An ALICE in disguise".to_string());
        let reviews = vec![review("r1", "b1", "alice", 5, 0), titled.clone()];
        let filters = ReviewFilters { search: "ALICE".to_string(), ..Default::default() };
        let out = filter_reviews(&reviews, &[], &filters, now());
        // matches user_name on r1 and title on r2
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn book_filters_drop_unresolvable_reviews() {
        let books = vec![book("b1", "The Martian", "Andy Weir", "Crown")];
        let reviews = vec![
            review("r1", "b1", "alice", 5, 0),
            review("r2", "missing", "bob", 5, 0),
        ];
        let filters = ReviewFilters { author: "weir".to_string(), ..Default::default() };
        let out = filter_reviews(&reviews, &books, &filters, now());
        assert_eq!(out.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["r1"]);
    }

    #[test]
    fn conjunctive_author_and_rating() {
        let books = vec![book("b1", "The Martian", "Andy Weir", "Crown")];
        let reviews = vec![
            review("r1", "b1", "alice", 5, 0),
            review("r2", "b1", "bob", 3, 0),
        ];
        let filters = ReviewFilters {
            author: "Weir".to_string(),
            rating: RatingFilter::Exactly(5),
            ..Default::default()
        };
        let out = filter_reviews(&reviews, &books, &filters, now());
        assert_eq!(out.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["r1"]);
    }

    #[test]
    fn date_filter_keeps_reviews_on_the_cutoff() {
        let reviews = vec![
            review("r1", "b1", "alice", 5, 0),
            review("r2", "b1", "bob", 4, 7),
            review("r3", "b1", "carol", 3, 8),
        ];
        let filters = ReviewFilters { date: DateFilter::Week, ..Default::default() };
        let out = filter_reviews(&reviews, &[], &filters, now());
        assert_eq!(
            out.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            vec!["r1", "r2"]
        );
    }

    #[test]
    fn distribution_counts_only_valid_ratings() {
        let mut reviews = vec![
            review("r1", "b1", "alice", 5, 0),
            review("r2", "b1", "bob", 5, 0),
            review("r3", "b1", "carol", 2, 0),
        ];
        reviews.push(review("r4", "b1", "mallory", 0, 0));
        reviews.push(review("r5", "b1", "mallory", 9, 0));
        let buckets = rating_distribution(&reviews);
        assert_eq!(buckets, [0, 1, 0, 0, 2]);
        assert_eq!(buckets.iter().sum::<u32>(), 3);
    }

    #[test]
    fn average_ignores_out_of_range() {
        let reviews = vec![
            review("r1", "b1", "alice", 4, 0),
            review("r2", "b1", "bob", 2, 0),
            review("r3", "b1", "mallory", 42, 0),
        ];
        assert_eq!(average_rating(&reviews), Some(3.0));
        assert_eq!(average_rating(&[]), None);
    }
}
