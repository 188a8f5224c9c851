use leptos::*;
use crate::models::review::Review;

fn stars(rating: u8) -> String {
    if (1..=5).contains(&rating) {
        format!("{}/5", rating)
    } else {
        "-".to_string()
    }
}

#[component]
pub fn ReviewsList(reviews: Vec<Review>) -> impl IntoView {
    view! {
        <div class="reviews">
            <h4>{ "Reviews" }</h4>
            <ul>
                {
                    reviews.into_iter().map(|review| {
                        view! {
                            <li class="review">
                                <strong>{ review.user_name }</strong>
                                <span class="review-rating">{ stars(review.rating) }</span>
                                <span class="review-date">{ review.date.format("%Y-%m-%d").to_string() }</span>
                                { review.title.map(|t| view! { <em>{ t }</em> }) }
                                <p>{ review.content }</p>
                            </li>
                        }
                    }).collect::<Vec<_>>()
                }
            </ul>
        </div>
    }
}
