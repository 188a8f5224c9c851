/// Application shell: shared contexts (backend handle, session,
/// notices), top navigation, and client-side routes.
use std::rc::Rc;

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::backend::{BackendHandle, RestBackend, Session};
use crate::components::admin_dashboard::AdminDashboard;
use crate::components::auth_form::AuthPage;
use crate::components::connectivity_banner::ConnectivityBanner;
use crate::components::home_page::HomePage;
use crate::components::notice::{NoticeTray, Notices};
use crate::components::profile_page::ProfilePage;

/// The signed-in session, `None` while browsing anonymously.
#[derive(Clone, Copy)]
pub struct SessionState(pub RwSignal<Option<Session>>);

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(BackendHandle(Rc::new(RestBackend::from_build_env())));
    Notices::provide();
    let session = SessionState(create_rw_signal(None));
    provide_context(session);

    view! {
        <Stylesheet id="leptos" href="/pkg/litlens.css"/>
        <Title text="LitLens"/>
        <Router>
            <ConnectivityBanner />
            <NoticeTray />
            <nav class="topbar">
                <A href="/">{ "LitLens" }</A>
                <A href="/profile">{ "My profile" }</A>
                {move || session.0.get()
                    .filter(|user| user.is_admin)
                    .map(|_| view! { <A href="/admin">{ "Moderation" }</A> })}
                {move || match session.0.get() {
                    Some(user) => view! {
                        <span class="session">
                            <span>{ user.user_name }</span>
                            <button on:click=move |_| session.0.set(None)>{ "Sign out" }</button>
                        </span>
                    }.into_view(),
                    None => view! { <A href="/login">{ "Sign in" }</A> }.into_view(),
                }}
            </nav>
            <main>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/login" view=AuthPage/>
                    <Route path="/profile" view=ProfilePage/>
                    <Route path="/admin" view=AdminDashboard/>
                </Routes>
            </main>
        </Router>
    }
}
