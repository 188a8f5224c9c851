/// Book discovery page: loads the catalog, offers search, and lets a
/// signed-in reader submit reviews.
use leptos::*;
use leptos::logging::log;
use wasm_bindgen_futures::spawn_local;

use crate::admin::browse::search_books;
use crate::app::SessionState;
use crate::backend::BackendHandle;
use crate::catalog;
use crate::components::books_list::BooksList;
use crate::components::notice::Notices;
use crate::models::book::Book;
use crate::models::review::Review;

#[component]
pub fn HomePage() -> impl IntoView {
    let backend = expect_context::<BackendHandle>();
    let notices = expect_context::<Notices>();
    let session = expect_context::<SessionState>();

    let books = create_rw_signal(Vec::<Book>::new());
    let reviews = create_rw_signal(Vec::<Review>::new());
    let (loading, set_loading) = create_signal(true);
    let (query, set_query) = create_signal(String::new());

    {
        let backend = backend.clone();
        spawn_local(async move {
            match catalog::fetch_books(backend.api()).await {
                Ok(list) => {
                    let _ = books.try_set(list);
                }
                Err(err) => {
                    log!("[HOME] book fetch failed: {}", err);
                    notices.error("Could not load the catalog.");
                }
            }
            match catalog::fetch_reviews(backend.api()).await {
                Ok(list) => {
                    let _ = reviews.try_set(list);
                }
                Err(err) => {
                    log!("[HOME] review fetch failed: {}", err);
                    notices.error("Could not load reviews.");
                }
            }
            let _ = set_loading.try_set(false);
        });
    }

    let filtered = Signal::derive(move || search_books(&books.get(), &query.get()));

    let review_backend = backend.clone();
    let on_review = Callback::new(move |(book_id, rating, title, content): (String, u8, Option<String>, String)| {
        let Some(user) = session.0.get() else {
            notices.error("Sign in to review books.");
            return;
        };
        let backend = review_backend.clone();
        spawn_local(async move {
            match catalog::submit_review(backend.api(), &book_id, &user.user_name, rating, title, content).await {
                Ok(review) => {
                    let _ = reviews.try_update(|list| list.push(review));
                    notices.info("Review submitted.");
                }
                Err(err) => {
                    log!("[HOME] review submit failed: {}", err);
                    notices.error("Could not submit your review.");
                }
            }
        });
    });

    view! {
        <section class="home">
            <h2>{ "Discover books" }</h2>
            <input
                type="search"
                placeholder="Search by title, author, or publisher"
                prop:value=query
                on:input=move |e| set_query.set(event_target_value(&e))
            />
            {move || loading.get().then(|| view! { <p class="loading">{ "Loading catalog..." }</p> })}
            <BooksList books=filtered reviews=reviews on_review=on_review />
        </section>
    }
}
