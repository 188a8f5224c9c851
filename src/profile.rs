/// Profile page data shaping: join a user's shelf rows and reviews
/// against the locally fetched book list.
use std::collections::HashMap;

use crate::models::book::Book;
use crate::models::review::Review;
use crate::models::user::{BookStatusRow, ShelfStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct ShelfEntry {
    pub book: Book,
    pub status: ShelfStatus,
}

/// A review paired with its book's title when the book resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewWithBook {
    pub review: Review,
    pub book_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileData {
    pub shelves: Vec<ShelfEntry>,
    pub reviews: Vec<ReviewWithBook>,
}

impl ProfileData {
    pub fn shelf(&self, status: ShelfStatus) -> Vec<&ShelfEntry> {
        self.shelves.iter().filter(|e| e.status == status).collect()
    }
}

/// Shelf rows whose book cannot be resolved are dropped; the review
/// list keeps unresolved entries and renders them without a title.
pub fn build_profile(
    status_rows: &[BookStatusRow],
    reviews: &[Review],
    books: &[Book],
) -> ProfileData {
    let by_id: HashMap<&str, &Book> = books.iter().map(|b| (b.id.as_str(), b)).collect();

    let shelves = status_rows
        .iter()
        .filter_map(|row| {
            by_id.get(row.book_id.as_str()).map(|book| ShelfEntry {
                book: (*book).clone(),
                status: row.status,
            })
        })
        .collect();

    let reviews = reviews
        .iter()
        .map(|review| ReviewWithBook {
            review: review.clone(),
            book_title: by_id
                .get(review.book_id.as_str())
                .map(|b| b.title.clone()),
        })
        .collect();

    ProfileData { shelves, reviews }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn book(id: &str, title: &str) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author: "Author".to_string(),
            genre: vec![],
            publisher: "Publisher".to_string(),
            published_year: 2020,
            cover_url: None,
        }
    }

    fn row(book_id: &str, status: ShelfStatus) -> BookStatusRow {
        BookStatusRow {
            book_id: book_id.to_string(),
            status,
            updated_at: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
        }
    }

    fn review(id: &str, book_id: &str) -> Review {
        Review {
            id: id.to_string(),
            book_id: book_id.to_string(),
            user_name: "alice".to_string(),
            user_avatar: None,
            rating: 4,
            title: None,
            content: "good".to_string(),
            date: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn shelves_group_by_status_and_drop_unresolved() {
        let books = vec![book("b1", "Dune"), book("b2", "The Martian")];
        let rows = vec![
            row("b1", ShelfStatus::Reading),
            row("b2", ShelfStatus::Finished),
            row("gone", ShelfStatus::Reading),
        ];
        let profile = build_profile(&rows, &[], &books);
        assert_eq!(profile.shelves.len(), 2);
        assert_eq!(profile.shelf(ShelfStatus::Reading).len(), 1);
        assert_eq!(profile.shelf(ShelfStatus::Reading)[0].book.title, "Dune");
        assert_eq!(profile.shelf(ShelfStatus::WantToRead).len(), 0);
    }

    #[test]
    fn reviews_keep_unresolved_books_without_title() {
        let books = vec![book("b1", "Dune")];
        let reviews = vec![review("r1", "b1"), review("r2", "gone")];
        let profile = build_profile(&[], &reviews, &books);
        assert_eq!(profile.reviews.len(), 2);
        assert_eq!(profile.reviews[0].book_title.as_deref(), Some("Dune"));
        assert_eq!(profile.reviews[1].book_title, None);
    }
}
