/// A reader's profile: shelves grouped by status plus their review
/// history, joined client-side against the book list.
use leptos::*;
use leptos::logging::log;
use wasm_bindgen_futures::spawn_local;

use crate::app::SessionState;
use crate::backend::BackendHandle;
use crate::catalog;
use crate::components::notice::Notices;
use crate::models::user::ShelfStatus;
use crate::profile::{build_profile, ProfileData, ShelfEntry};

#[component]
pub fn ProfilePage() -> impl IntoView {
    let backend = expect_context::<BackendHandle>();
    let notices = expect_context::<Notices>();
    let session = expect_context::<SessionState>();

    let (profile, set_profile) = create_signal(None::<ProfileData>);
    let (loading, set_loading) = create_signal(false);

    create_effect(move |_| {
        let Some(user) = session.0.get() else {
            set_profile.set(None);
            return;
        };
        let backend = backend.clone();
        set_loading.set(true);
        spawn_local(async move {
            // Sequential fetches; the join happens locally.
            let books = catalog::fetch_books(backend.api()).await;
            let rows = catalog::fetch_status_rows(backend.api(), &user.user_id).await;
            let reviews = catalog::fetch_reviews_by_user(backend.api(), &user.user_name).await;
            match (books, rows, reviews) {
                (Ok(books), Ok(rows), Ok(reviews)) => {
                    let data = build_profile(&rows, &reviews, &books);
                    let _ = set_profile.try_set(Some(data));
                }
                (books, rows, reviews) => {
                    for err in [books.err(), rows.err(), reviews.err()] {
                        if let Some(err) = err {
                            log!("[PROFILE] fetch failed: {}", err);
                        }
                    }
                    notices.error("Could not load your profile.");
                }
            }
            let _ = set_loading.try_set(false);
        });
    });

    let shelf_section = move |status: ShelfStatus, entries: Vec<ShelfEntry>| {
        view! {
            <div class="shelf">
                <h3>{ status.label() }</h3>
                <ul>
                    {entries.into_iter().map(|entry| view! {
                        <li>
                            <strong>{ entry.book.title }</strong>
                            <span>{ format!("by {}", entry.book.author) }</span>
                        </li>
                    }).collect::<Vec<_>>()}
                </ul>
            </div>
        }
    };

    view! {
        <section class="profile">
            {move || match session.0.get() {
                None => view! { <p>{ "Sign in to see your profile." }</p> }.into_view(),
                Some(user) => view! {
                    <div>
                        <h2>{ format!("{}'s shelves", user.user_name) }</h2>
                        {move || loading.get().then(|| view! { <p class="loading">{ "Loading..." }</p> })}
                        {move || profile.get().map(|data| {
                            let shelves = [
                                ShelfStatus::Reading,
                                ShelfStatus::WantToRead,
                                ShelfStatus::Finished,
                            ]
                            .into_iter()
                            .map(|status| {
                                let entries: Vec<ShelfEntry> =
                                    data.shelf(status).into_iter().cloned().collect();
                                shelf_section(status, entries)
                            })
                            .collect::<Vec<_>>();
                            view! {
                                <div>
                                    { shelves }
                                    <div class="profile-reviews">
                                        <h3>{ "Your reviews" }</h3>
                                        <ul>
                                            {data.reviews.iter().map(|entry| view! {
                                                <li>
                                                    <strong>{ entry.book_title.clone().unwrap_or_else(|| "(book no longer listed)".to_string()) }</strong>
                                                    <span>{ format!("{}/5", entry.review.rating) }</span>
                                                    <p>{ entry.review.content.clone() }</p>
                                                </li>
                                            }).collect::<Vec<_>>()}
                                        </ul>
                                    </div>
                                </div>
                            }
                        })}
                    </div>
                }.into_view(),
            }}
        </section>
    }
}
