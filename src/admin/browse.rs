/// Search-and-sort helpers for the remaining admin tabs: books,
/// requests, reports, users, and the review orderings the moderation
/// view offers. All pure and stable, same contract as the filter engine.
use std::collections::HashMap;

use crate::models::book::Book;
use crate::models::report::ReviewReport;
use crate::models::request::{BookRequest, RequestStatus};
use crate::models::review::Review;
use crate::models::user::UserAccount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookSort {
    #[default]
    Title,
    Author,
    Year,
}

impl BookSort {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "author" => BookSort::Author,
            "year" => BookSort::Year,
            _ => BookSort::Title,
        }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive search over title, author, and publisher.
pub fn search_books(books: &[Book], query: &str) -> Vec<Book> {
    let query = query.trim();
    if query.is_empty() {
        return books.to_vec();
    }
    books
        .iter()
        .filter(|b| {
            contains_ci(&b.title, query)
                || contains_ci(&b.author, query)
                || contains_ci(&b.publisher, query)
        })
        .cloned()
        .collect()
}

/// Stable in-place sort; ties keep their relative order in either
/// direction.
pub fn sort_books(books: &mut [Book], sort: BookSort, ascending: bool) {
    books.sort_by(|a, b| {
        let ord = match sort {
            BookSort::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            BookSort::Author => a.author.to_lowercase().cmp(&b.author.to_lowercase()),
            BookSort::Year => a.published_year.cmp(&b.published_year),
        };
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}

/// Reports still awaiting disposition. Terminal reports stay in the
/// snapshot but drop out of the moderation queue.
pub fn open_reports(reports: &[ReviewReport]) -> Vec<ReviewReport> {
    reports
        .iter()
        .filter(|r| !r.status.is_resolved())
        .cloned()
        .collect()
}

pub fn filter_requests(requests: &[BookRequest], status: Option<RequestStatus>) -> Vec<BookRequest> {
    requests
        .iter()
        .filter(|r| status.map_or(true, |s| r.status == s))
        .cloned()
        .collect()
}

/// Case-insensitive search over user name and email.
pub fn search_users(users: &[UserAccount], query: &str) -> Vec<UserAccount> {
    let query = query.trim();
    if query.is_empty() {
        return users.to_vec();
    }
    users
        .iter()
        .filter(|u| contains_ci(&u.user_name, query) || contains_ci(&u.email, query))
        .cloned()
        .collect()
}

pub fn sort_reviews_newest_first(reviews: &mut [Review]) {
    reviews.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Order reviews by their book's title; reviews whose book cannot be
/// resolved sort last, keeping their relative order.
pub fn sort_reviews_by_book_title(reviews: &mut [Review], books: &[Book]) {
    let titles: HashMap<&str, String> = books
        .iter()
        .map(|b| (b.id.as_str(), b.title.to_lowercase()))
        .collect();
    reviews.sort_by(|a, b| {
        let ta = titles.get(a.book_id.as_str());
        let tb = titles.get(b.book_id.as_str());
        match (ta, tb) {
            (Some(ta), Some(tb)) => ta.cmp(tb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::ReportStatus;
    use chrono::{Duration, TimeZone, Utc};

    fn book(id: &str, title: &str, author: &str, year: i32) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            genre: vec![],
            publisher: "Crown".to_string(),
            published_year: year,
            cover_url: None,
        }
    }

    #[test]
    fn book_search_matches_any_field() {
        let books = vec![
            book("b1", "The Martian", "Andy Weir", 2011),
            book("b2", "Dune", "Frank Herbert", 1965),
        ];
        assert_eq!(search_books(&books, "WEIR").len(), 1);
        assert_eq!(search_books(&books, "crown").len(), 2);
        assert_eq!(search_books(&books, "  ").len(), 2);
        assert!(search_books(&books, "austen").is_empty());
    }

    #[test]
    fn book_sort_by_year_descending() {
        let mut books = vec![
            book("b1", "The Martian", "Andy Weir", 2011),
            book("b2", "Dune", "Frank Herbert", 1965),
            book("b3", "Artemis", "Andy Weir", 2017),
        ];
        sort_books(&mut books, BookSort::Year, false);
        assert_eq!(
            books.iter().map(|b| b.id.as_str()).collect::<Vec<_>>(),
            vec!["b3", "b1", "b2"]
        );
    }

    #[test]
    fn book_sort_descending_keeps_tie_order() {
        let mut books = vec![
            book("b1", "The Martian", "Andy Weir", 2011),
            book("b2", "Artemis", "Andy Weir", 2011),
            book("b3", "Dune", "Frank Herbert", 1965),
        ];
        sort_books(&mut books, BookSort::Year, false);
        assert_eq!(
            books.iter().map(|b| b.id.as_str()).collect::<Vec<_>>(),
            vec!["b1", "b2", "b3"]
        );
    }

    #[test]
    fn request_status_filter() {
        let base = BookRequest {
            id: String::new(),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: None,
            additional_notes: None,
            requested_by: "alice".to_string(),
            request_date: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
            status: RequestStatus::Pending,
        };
        let requests = vec![
            BookRequest { id: "q1".to_string(), ..base.clone() },
            BookRequest { id: "q2".to_string(), status: RequestStatus::Approved, ..base.clone() },
        ];
        let pending = filter_requests(&requests, Some(RequestStatus::Pending));
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, "q1");
        assert_eq!(filter_requests(&requests, None).len(), 2);
    }

    #[test]
    fn open_reports_skips_terminal_statuses() {
        let mk = |id: &str, status: ReportStatus| ReviewReport {
            id: id.to_string(),
            review_id: "r1".to_string(),
            reporter_name: "alice".to_string(),
            reason: "spam".to_string(),
            description: String::new(),
            date: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
            status,
        };
        let reports = vec![
            mk("p1", ReportStatus::Pending),
            mk("p2", ReportStatus::Dismissed),
            mk("p3", ReportStatus::Reviewed),
            mk("p4", ReportStatus::ActionTaken),
        ];
        assert_eq!(
            open_reports(&reports)
                .iter()
                .map(|r| r.id.as_str())
                .collect::<Vec<_>>(),
            vec!["p1", "p3"]
        );
    }

    #[test]
    fn reviews_sort_newest_first() {
        let now = Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();
        let mk = |id: &str, days_ago: i64| Review {
            id: id.to_string(),
            book_id: "b1".to_string(),
            user_name: "alice".to_string(),
            user_avatar: None,
            rating: 4,
            title: None,
            content: String::new(),
            date: now - Duration::days(days_ago),
        };
        let mut reviews = vec![mk("r1", 5), mk("r2", 1), mk("r3", 3)];
        sort_reviews_newest_first(&mut reviews);
        assert_eq!(
            reviews.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            vec!["r2", "r3", "r1"]
        );
    }
}
