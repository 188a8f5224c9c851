/// Sign-in / sign-up forms over the auth gateway. Validation failures
/// and backend errors surface as notices; a success stores the session
/// and returns to the home page.
use leptos::*;
use leptos::ev::SubmitEvent;
use leptos_router::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::app::SessionState;
use crate::auth;
use crate::backend::BackendHandle;
use crate::components::notice::Notices;

#[component]
pub fn AuthPage() -> impl IntoView {
    let (mode, set_mode) = create_signal("signin");

    view! {
        <section class="auth">
            <div class="auth-tabs">
                <button
                    class:active=move || mode.get() == "signin"
                    on:click=move |_| set_mode.set("signin")
                >{ "Sign in" }</button>
                <button
                    class:active=move || mode.get() == "signup"
                    on:click=move |_| set_mode.set("signup")
                >{ "Create account" }</button>
            </div>
            {move || if mode.get() == "signin" {
                view! { <LoginForm /> }.into_view()
            } else {
                view! { <SignupForm /> }.into_view()
            }}
        </section>
    }
}

#[component]
pub fn LoginForm() -> impl IntoView {
    let backend = expect_context::<BackendHandle>();
    let notices = expect_context::<Notices>();
    let session = expect_context::<SessionState>();
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (pending, set_pending) = create_signal(false);

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get() {
            return;
        }
        set_pending.set(true);
        let backend = backend.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match auth::sign_in(backend.api(), &email.get_untracked(), &password.get_untracked()).await {
                Ok(new_session) => {
                    session.0.set(Some(new_session));
                    navigate("/", Default::default());
                }
                Err(err) => notices.error(err.to_string()),
            }
            let _ = set_pending.try_set(false);
        });
    };

    view! {
        <form class="auth-form" on:submit=handle_submit>
            <input
                type="email"
                placeholder="Email"
                prop:value=email
                on:input=move |e| set_email.set(event_target_value(&e))
            />
            <input
                type="password"
                placeholder="Password"
                prop:value=password
                on:input=move |e| set_password.set(event_target_value(&e))
            />
            <button type="submit" disabled=move || pending.get()>{ "Sign in" }</button>
        </form>
    }
}

#[component]
pub fn SignupForm() -> impl IntoView {
    let backend = expect_context::<BackendHandle>();
    let notices = expect_context::<Notices>();
    let session = expect_context::<SessionState>();
    let navigate = use_navigate();

    let (user_name, set_user_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (pending, set_pending) = create_signal(false);

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get() {
            return;
        }
        set_pending.set(true);
        let backend = backend.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = auth::sign_up(
                backend.api(),
                &email.get_untracked(),
                &password.get_untracked(),
                &user_name.get_untracked(),
            )
            .await;
            match result {
                Ok(new_session) => {
                    session.0.set(Some(new_session));
                    notices.info("Welcome to LitLens!");
                    navigate("/", Default::default());
                }
                Err(err) => notices.error(err.to_string()),
            }
            let _ = set_pending.try_set(false);
        });
    };

    view! {
        <form class="auth-form" on:submit=handle_submit>
            <input
                type="text"
                placeholder="Display name"
                prop:value=user_name
                on:input=move |e| set_user_name.set(event_target_value(&e))
            />
            <input
                type="email"
                placeholder="Email"
                prop:value=email
                on:input=move |e| set_email.set(event_target_value(&e))
            />
            <input
                type="password"
                placeholder="Password (8+ characters)"
                prop:value=password
                on:input=move |e| set_password.set(event_target_value(&e))
            />
            <button type="submit" disabled=move || pending.get()>{ "Create account" }</button>
        </form>
    }
}
