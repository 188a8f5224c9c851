/// Admin moderation dashboard: reviews (filter panel + rating
/// distribution + reports), books, requests, users, and discussions.
/// The snapshot is fetched once on mount; every action patches the
/// backend first and the local signals on success.
use chrono::Utc;
use leptos::*;
use leptos::logging::log;
use wasm_bindgen_futures::spawn_local;

use crate::admin::browse::{
    filter_requests, open_reports, search_books, search_users, sort_books,
    sort_reviews_by_book_title, sort_reviews_newest_first, BookSort,
};
use crate::admin::filter::{
    filter_reviews, rating_distribution, DateFilter, RatingFilter, ReviewFilters,
};
use crate::app::SessionState;
use crate::backend::BackendHandle;
use crate::catalog;
use crate::components::migration_banner::MigrationBanner;
use crate::components::notice::Notices;
use crate::models::book::Book;
use crate::models::discussion::Discussion;
use crate::models::report::{ReportStatus, ReviewReport};
use crate::models::request::{BookRequest, RequestStatus};
use crate::models::review::Review;
use crate::models::user::UserAccount;
use crate::utils::confirm::confirm;

#[component]
pub fn AdminDashboard() -> impl IntoView {
    let session = expect_context::<SessionState>();

    view! {
        {move || if session.0.get().map(|s| s.is_admin).unwrap_or(false) {
            view! { <AdminPanel /> }.into_view()
        } else {
            view! {
                <p class="unauthorized">{ "This page is available to administrators only." }</p>
            }.into_view()
        }}
    }
}

#[component]
fn AdminPanel() -> impl IntoView {
    let backend = expect_context::<BackendHandle>();
    let notices = expect_context::<Notices>();

    let books = create_rw_signal(Vec::<Book>::new());
    let reviews = create_rw_signal(Vec::<Review>::new());
    let reports = create_rw_signal(Vec::<ReviewReport>::new());
    let requests = create_rw_signal(Vec::<BookRequest>::new());
    let users = create_rw_signal(Vec::<UserAccount>::new());
    let discussions = create_rw_signal(Vec::<Discussion>::new());
    let (tab, set_tab) = create_signal("reviews");
    let (loading, set_loading) = create_signal(true);

    {
        let backend = backend.clone();
        spawn_local(async move {
            match catalog::fetch_books(backend.api()).await {
                Ok(list) => {
                    let _ = books.try_set(list);
                }
                Err(err) => {
                    log!("[ADMIN] book fetch failed: {}", err);
                    notices.error("Could not load books.");
                }
            }
            match catalog::fetch_reviews(backend.api()).await {
                Ok(list) => {
                    let _ = reviews.try_set(list);
                }
                Err(err) => {
                    log!("[ADMIN] review fetch failed: {}", err);
                    notices.error("Could not load reviews.");
                }
            }
            match catalog::fetch_reports(backend.api()).await {
                Ok(list) => {
                    let _ = reports.try_set(list);
                }
                Err(err) => {
                    log!("[ADMIN] report fetch failed: {}", err);
                    notices.error("Could not load review reports.");
                }
            }
            match catalog::fetch_requests(backend.api()).await {
                Ok(list) => {
                    let _ = requests.try_set(list);
                }
                Err(err) => {
                    log!("[ADMIN] request fetch failed: {}", err);
                    notices.error("Could not load book requests.");
                }
            }
            match catalog::fetch_users(backend.api()).await {
                Ok(list) => {
                    let _ = users.try_set(list);
                }
                Err(err) => {
                    log!("[ADMIN] user fetch failed: {}", err);
                    notices.error("Could not load users.");
                }
            }
            match catalog::fetch_discussions(backend.api()).await {
                Ok(list) => {
                    let _ = discussions.try_set(list);
                }
                Err(err) => {
                    log!("[ADMIN] discussion fetch failed: {}", err);
                    notices.error("Could not load discussions.");
                }
            }
            let _ = set_loading.try_set(false);
        });
    }

    view! {
        <div class="admin">
            <h2>{ "Moderation" }</h2>
            <MigrationBanner
                table="books"
                column="coverUrl"
                message="The cover-art migration has not been applied; book covers are disabled."
            />
            <MigrationBanner
                table="reviews"
                column="title"
                nullable=true
                message="Review headlines require the nullable-title migration."
            />
            <nav class="admin-tabs">
                <button class:active=move || tab.get() == "reviews"
                    on:click=move |_| set_tab.set("reviews")>{ "Reviews" }</button>
                <button class:active=move || tab.get() == "books"
                    on:click=move |_| set_tab.set("books")>{ "Books" }</button>
                <button class:active=move || tab.get() == "requests"
                    on:click=move |_| set_tab.set("requests")>{ "Requests" }</button>
                <button class:active=move || tab.get() == "users"
                    on:click=move |_| set_tab.set("users")>{ "Users" }</button>
                <button class:active=move || tab.get() == "discussions"
                    on:click=move |_| set_tab.set("discussions")>{ "Discussions" }</button>
            </nav>
            {move || loading.get().then(|| view! { <p class="loading">{ "Loading snapshot..." }</p> })}
            {move || match tab.get() {
                "books" => view! { <BooksTab books=books reviews=reviews /> }.into_view(),
                "requests" => view! { <RequestsTab requests=requests /> }.into_view(),
                "users" => view! { <UsersTab users=users /> }.into_view(),
                "discussions" => view! { <DiscussionsTab discussions=discussions /> }.into_view(),
                _ => view! { <ReviewsTab books=books reviews=reviews reports=reports /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn ReviewsTab(
    books: RwSignal<Vec<Book>>,
    reviews: RwSignal<Vec<Review>>,
    reports: RwSignal<Vec<ReviewReport>>,
) -> impl IntoView {
    let backend = expect_context::<BackendHandle>();
    let notices = expect_context::<Notices>();

    let (rating_raw, set_rating_raw) = create_signal("all".to_string());
    let (search, set_search) = create_signal(String::new());
    let (book_title, set_book_title) = create_signal(String::new());
    let (author, set_author) = create_signal(String::new());
    let (publisher, set_publisher) = create_signal(String::new());
    let (date_raw, set_date_raw) = create_signal("all".to_string());
    let (sort, set_sort) = create_signal("newest");

    let active = create_memo(move |_| ReviewFilters {
        rating: RatingFilter::parse(&rating_raw.get()),
        search: search.get(),
        book_title: book_title.get(),
        author: author.get(),
        publisher: publisher.get(),
        date: DateFilter::parse(&date_raw.get()),
    });
    let filtered = create_memo(move |_| {
        let mut out = filter_reviews(&reviews.get(), &books.get(), &active.get(), Utc::now());
        match sort.get() {
            "title" => sort_reviews_by_book_title(&mut out, &books.get()),
            _ => sort_reviews_newest_first(&mut out),
        }
        out
    });
    // Distribution is always over the unfiltered set.
    let distribution = create_memo(move |_| rating_distribution(&reviews.get()));

    let clear_filters = move |_| {
        set_rating_raw.set("all".to_string());
        set_search.set(String::new());
        set_book_title.set(String::new());
        set_author.set(String::new());
        set_publisher.set(String::new());
        set_date_raw.set("all".to_string());
    };

    let delete_review = {
        let backend = backend.clone();
        move |review: Review| {
            if !confirm(&format!("Delete the review by {}?", review.user_name)) {
                return;
            }
            let backend = backend.clone();
            spawn_local(async move {
                match catalog::delete_review(backend.api(), &review.id).await {
                    Ok(()) => {
                        let _ = reviews.try_update(|list| list.retain(|r| r.id != review.id));
                        notices.info("Review deleted.");
                    }
                    Err(err) => {
                        log!("[ADMIN] review delete failed: {}", err);
                        notices.error("Could not delete the review.");
                    }
                }
            });
        }
    };

    let resolve_report = {
        let backend = backend.clone();
        move |report: ReviewReport, disposition: ReportStatus| {
            if disposition == ReportStatus::ActionTaken
                && !confirm("Take action and delete the reported review?")
            {
                return;
            }
            let backend = backend.clone();
            spawn_local(async move {
                match catalog::resolve_report(backend.api(), &report, disposition).await {
                    Ok(()) => {
                        let _ = reports.try_update(|list| {
                            if let Some(r) = list.iter_mut().find(|r| r.id == report.id) {
                                r.status = disposition;
                            }
                        });
                        if disposition == ReportStatus::ActionTaken {
                            let _ = reviews
                                .try_update(|list| list.retain(|r| r.id != report.review_id));
                        }
                    }
                    Err(err) => {
                        log!("[ADMIN] report resolution failed: {}", err);
                        notices.error("Could not resolve the report.");
                    }
                }
            });
        }
    };

    view! {
        <div class="admin-reviews">
            <div class="filter-panel">
                <select prop:value=rating_raw
                    on:change=move |e| set_rating_raw.set(event_target_value(&e))>
                    <option value="all">{ "All ratings" }</option>
                    {(1..=5u8).map(|n| view! {
                        <option value={n.to_string()}>{ format!("{n} stars") }</option>
                    }).collect::<Vec<_>>()}
                </select>
                <input type="search" placeholder="Search reviewer, headline, or text"
                    prop:value=search
                    on:input=move |e| set_search.set(event_target_value(&e)) />
                <input type="text" placeholder="Book title"
                    prop:value=book_title
                    on:input=move |e| set_book_title.set(event_target_value(&e)) />
                <input type="text" placeholder="Author"
                    prop:value=author
                    on:input=move |e| set_author.set(event_target_value(&e)) />
                <input type="text" placeholder="Publisher"
                    prop:value=publisher
                    on:input=move |e| set_publisher.set(event_target_value(&e)) />
                <select prop:value=date_raw
                    on:change=move |e| set_date_raw.set(event_target_value(&e))>
                    <option value="all">{ "Any time" }</option>
                    <option value="today">{ "Today" }</option>
                    <option value="week">{ "Past week" }</option>
                    <option value="month">{ "Past month" }</option>
                    <option value="year">{ "Past year" }</option>
                </select>
                <select on:change=move |e| {
                    if event_target_value(&e) == "title" { set_sort.set("title") } else { set_sort.set("newest") }
                }>
                    <option value="newest">{ "Newest first" }</option>
                    <option value="title">{ "By book title" }</option>
                </select>
                <button
                    on:click=clear_filters
                    disabled=move || active.get().is_unconstrained()
                >{ "Clear filters" }</button>
            </div>

            <ul class="rating-distribution">
                {move || {
                    let buckets = distribution.get();
                    (1..=5usize).rev().map(|stars| view! {
                        <li>{ format!("{} star: {}", stars, buckets[stars - 1]) }</li>
                    }).collect::<Vec<_>>()
                }}
            </ul>

            <p>{move || format!("{} of {} reviews match", filtered.get().len(), reviews.get().len())}</p>

            <ul class="moderation-list">
                {move || filtered.get().into_iter().map(|review| {
                    let delete_review = delete_review.clone();
                    let header = format!(
                        "{} · {}/5 · {}",
                        review.user_name,
                        review.rating,
                        review.date.format("%Y-%m-%d")
                    );
                    let headline = review.title.clone();
                    let content = review.content.clone();
                    view! {
                        <li>
                            <strong>{ header }</strong>
                            { headline.map(|t| view! { <em>{ t }</em> }) }
                            <p>{ content }</p>
                            <button on:click=move |_| delete_review(review.clone())>
                                { "Delete" }
                            </button>
                        </li>
                    }
                }).collect::<Vec<_>>()}
            </ul>

            <h3>{ "Open reports" }</h3>
            <ul class="report-list">
                {move || open_reports(&reports.get()).into_iter()
                    .map(|report| {
                        let resolve = resolve_report.clone();
                        let resolve_dismiss = resolve.clone();
                        let report_dismiss = report.clone();
                        let summary = format!(
                            "{} flagged a review: {} — {}",
                            report.reporter_name, report.reason, report.description
                        );
                        view! {
                            <li>
                                <span>{ summary }</span>
                                <button on:click=move |_| resolve_dismiss(report_dismiss.clone(), ReportStatus::Dismissed)>
                                    { "Dismiss" }
                                </button>
                                <button on:click=move |_| resolve(report.clone(), ReportStatus::ActionTaken)>
                                    { "Take action" }
                                </button>
                            </li>
                        }
                    }).collect::<Vec<_>>()}
            </ul>
        </div>
    }
}

#[component]
fn BooksTab(books: RwSignal<Vec<Book>>, reviews: RwSignal<Vec<Review>>) -> impl IntoView {
    let backend = expect_context::<BackendHandle>();
    let notices = expect_context::<Notices>();

    let (query, set_query) = create_signal(String::new());
    let (sort_raw, set_sort_raw) = create_signal("title".to_string());
    let (ascending, set_ascending) = create_signal(true);

    let shown = create_memo(move |_| {
        let mut out = search_books(&books.get(), &query.get());
        sort_books(&mut out, BookSort::parse(&sort_raw.get()), ascending.get());
        out
    });

    let delete_book = {
        let backend = backend.clone();
        move |book: Book| {
            if !confirm(&format!("Delete \"{}\" and all of its reviews?", book.title)) {
                return;
            }
            let backend = backend.clone();
            spawn_local(async move {
                match catalog::delete_book(backend.api(), &book.id).await {
                    Ok(()) => {
                        let _ = books.try_update(|list| list.retain(|b| b.id != book.id));
                        // The backend cascades; mirror that locally.
                        let _ = reviews.try_update(|list| list.retain(|r| r.book_id != book.id));
                        notices.info("Book deleted.");
                    }
                    Err(err) => {
                        log!("[ADMIN] book delete failed: {}", err);
                        notices.error("Could not delete the book.");
                    }
                }
            });
        }
    };

    view! {
        <div class="admin-books">
            <input type="search" placeholder="Search books"
                prop:value=query
                on:input=move |e| set_query.set(event_target_value(&e)) />
            <select on:change=move |e| set_sort_raw.set(event_target_value(&e))>
                <option value="title">{ "Title" }</option>
                <option value="author">{ "Author" }</option>
                <option value="year">{ "Year" }</option>
            </select>
            <button on:click=move |_| set_ascending.update(|a| *a = !*a)>
                {move || if ascending.get() { "Ascending" } else { "Descending" }}
            </button>
            <ul class="moderation-list">
                {move || shown.get().into_iter().map(|book| {
                    let delete_book = delete_book.clone();
                    let line = format!(
                        "{} — {} ({}, {})",
                        book.title, book.author, book.publisher, book.published_year
                    );
                    view! {
                        <li>
                            <span>{ line }</span>
                            <button on:click=move |_| delete_book(book.clone())>{ "Delete" }</button>
                        </li>
                    }
                }).collect::<Vec<_>>()}
            </ul>
        </div>
    }
}

#[component]
fn RequestsTab(requests: RwSignal<Vec<BookRequest>>) -> impl IntoView {
    let backend = expect_context::<BackendHandle>();
    let notices = expect_context::<Notices>();

    let (status_raw, set_status_raw) = create_signal("pending".to_string());

    let shown = create_memo(move |_| {
        let status = match status_raw.get().as_str() {
            "pending" => Some(RequestStatus::Pending),
            "approved" => Some(RequestStatus::Approved),
            "rejected" => Some(RequestStatus::Rejected),
            _ => None,
        };
        filter_requests(&requests.get(), status)
    });

    let resolve = {
        let backend = backend.clone();
        move |request_id: String, disposition: RequestStatus| {
            let backend = backend.clone();
            spawn_local(async move {
                match catalog::resolve_request(backend.api(), &request_id, disposition).await {
                    Ok(()) => {
                        let _ = requests.try_update(|list| {
                            if let Some(r) = list.iter_mut().find(|r| r.id == request_id) {
                                r.status = disposition;
                            }
                        });
                    }
                    Err(err) => {
                        log!("[ADMIN] request resolution failed: {}", err);
                        notices.error("Could not update the request.");
                    }
                }
            });
        }
    };

    view! {
        <div class="admin-requests">
            <select on:change=move |e| set_status_raw.set(event_target_value(&e))>
                <option value="pending">{ "Pending" }</option>
                <option value="approved">{ "Approved" }</option>
                <option value="rejected">{ "Rejected" }</option>
                <option value="all">{ "All" }</option>
            </select>
            <ul class="moderation-list">
                {move || shown.get().into_iter().map(|request| {
                    let approve = resolve.clone();
                    let reject = resolve.clone();
                    let approve_id = request.id.clone();
                    let reject_id = request.id.clone();
                    let line = format!(
                        "{} by {} — requested by {} on {}",
                        request.title,
                        request.author,
                        request.requested_by,
                        request.request_date.format("%Y-%m-%d")
                    );
                    let pending = request.status == RequestStatus::Pending;
                    view! {
                        <li>
                            <span>{ line }</span>
                            { request.isbn.clone().map(|isbn| view! { <span>{ format!("ISBN {isbn}") }</span> }) }
                            { pending.then(|| view! {
                                <span>
                                    <button on:click=move |_| approve(approve_id.clone(), RequestStatus::Approved)>
                                        { "Approve" }
                                    </button>
                                    <button on:click=move |_| reject(reject_id.clone(), RequestStatus::Rejected)>
                                        { "Reject" }
                                    </button>
                                </span>
                            })}
                        </li>
                    }
                }).collect::<Vec<_>>()}
            </ul>
        </div>
    }
}

#[component]
fn UsersTab(users: RwSignal<Vec<UserAccount>>) -> impl IntoView {
    let backend = expect_context::<BackendHandle>();
    let notices = expect_context::<Notices>();

    let (query, set_query) = create_signal(String::new());
    let shown = create_memo(move |_| search_users(&users.get(), &query.get()));

    let set_banned = {
        let backend = backend.clone();
        move |user: UserAccount, banned: bool| {
            if banned && !confirm(&format!("Ban {}?", user.user_name)) {
                return;
            }
            let backend = backend.clone();
            spawn_local(async move {
                match catalog::set_user_banned(backend.api(), &user.id, banned).await {
                    Ok(()) => {
                        let _ = users.try_update(|list| {
                            if let Some(u) = list.iter_mut().find(|u| u.id == user.id) {
                                u.banned = banned;
                            }
                        });
                    }
                    Err(err) => {
                        log!("[ADMIN] ban update failed: {}", err);
                        notices.error("Could not update the user.");
                    }
                }
            });
        }
    };

    view! {
        <div class="admin-users">
            <input type="search" placeholder="Search by name or email"
                prop:value=query
                on:input=move |e| set_query.set(event_target_value(&e)) />
            <ul class="moderation-list">
                {move || shown.get().into_iter().map(|user| {
                    let toggle = set_banned.clone();
                    let banned = user.banned;
                    let line = format!("{} <{}>", user.user_name, user.email);
                    view! {
                        <li>
                            <span>{ line }</span>
                            { banned.then(|| view! { <span class="badge">{ "banned" }</span> }) }
                            <button on:click=move |_| toggle(user.clone(), !banned)>
                                {move || if banned { "Unban" } else { "Ban" }}
                            </button>
                        </li>
                    }
                }).collect::<Vec<_>>()}
            </ul>
        </div>
    }
}

#[component]
fn DiscussionsTab(discussions: RwSignal<Vec<Discussion>>) -> impl IntoView {
    let backend = expect_context::<BackendHandle>();
    let notices = expect_context::<Notices>();

    let set_locked = {
        let backend = backend.clone();
        move |discussion_id: String, locked: bool| {
            let backend = backend.clone();
            spawn_local(async move {
                match catalog::set_discussion_locked(backend.api(), &discussion_id, locked).await {
                    Ok(()) => {
                        let _ = discussions.try_update(|list| {
                            if let Some(d) = list.iter_mut().find(|d| d.id == discussion_id) {
                                d.locked = locked;
                            }
                        });
                    }
                    Err(err) => {
                        log!("[ADMIN] lock update failed: {}", err);
                        notices.error("Could not update the discussion.");
                    }
                }
            });
        }
    };

    let delete = {
        let backend = backend.clone();
        move |discussion: Discussion| {
            if !confirm(&format!("Delete the discussion \"{}\"?", discussion.title)) {
                return;
            }
            let backend = backend.clone();
            spawn_local(async move {
                match catalog::delete_discussion(backend.api(), &discussion.id).await {
                    Ok(()) => {
                        let _ = discussions
                            .try_update(|list| list.retain(|d| d.id != discussion.id));
                        notices.info("Discussion deleted.");
                    }
                    Err(err) => {
                        log!("[ADMIN] discussion delete failed: {}", err);
                        notices.error("Could not delete the discussion.");
                    }
                }
            });
        }
    };

    view! {
        <div class="admin-discussions">
            <ul class="moderation-list">
                {move || discussions.get().into_iter().map(|discussion| {
                    let toggle = set_locked.clone();
                    let delete = delete.clone();
                    let toggle_id = discussion.id.clone();
                    let locked = discussion.locked;
                    let line = format!(
                        "{} — started by {} ({} replies)",
                        discussion.title, discussion.author_name, discussion.reply_count
                    );
                    view! {
                        <li>
                            <span>{ line }</span>
                            { locked.then(|| view! { <span class="badge">{ "locked" }</span> }) }
                            <button on:click=move |_| toggle(toggle_id.clone(), !locked)>
                                {move || if locked { "Unlock" } else { "Lock" }}
                            </button>
                            <button on:click=move |_| delete(discussion.clone())>{ "Delete" }</button>
                        </li>
                    }
                }).collect::<Vec<_>>()}
            </ul>
        </div>
    }
}
