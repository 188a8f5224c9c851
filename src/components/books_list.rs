/// Book browsing list: one card per book with its reviews, average
/// rating, and a review form.
use leptos::*;

use crate::admin::filter::average_rating;
use crate::components::review_form::ReviewForm;
use crate::components::reviews_list::ReviewsList;
use crate::models::book::Book;
use crate::models::review::Review;

#[component]
pub fn BooksList(
    #[prop(into)] books: Signal<Vec<Book>>,
    #[prop(into)] reviews: Signal<Vec<Review>>,
    on_review: Callback<(String, u8, Option<String>, String)>,
) -> impl IntoView {
    view! {
        <ul class="books">
            {move || books.get().into_iter().map(|book| {
                let book_reviews: Vec<Review> = reviews
                    .get()
                    .into_iter()
                    .filter(|r| r.book_id == book.id)
                    .collect();
                let average = average_rating(&book_reviews)
                    .map(|a| format!("{a:.1} / 5"))
                    .unwrap_or_else(|| "No ratings yet".to_string());
                let book_id = book.id.clone();
                view! {
                    <li class="book-card">
                        <div class="book-header">
                            <strong>{ book.title.clone() }</strong>
                            <span>{ format!("by {}", book.author) }</span>
                            <span class="book-meta">
                                { format!("{} · {}", book.publisher, book.published_year) }
                            </span>
                            <span class="book-genres">{ book.genre.join(", ") }</span>
                            <span class="book-average">{ average }</span>
                        </div>
                        <ReviewsList reviews=book_reviews />
                        <ReviewForm on_submit=Box::new(move |rating, title, content| {
                            on_review.call((book_id.clone(), rating, title, content));
                        }) />
                    </li>
                }
            }).collect::<Vec<_>>()}
        </ul>
    }
}
