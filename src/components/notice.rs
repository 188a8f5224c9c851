/// Transient notifications. Handlers push a notice instead of letting a
/// backend failure escape; the tray renders them until they expire or
/// the user dismisses them.
use std::time::Duration;

use leptos::*;
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;

const NOTICE_TTL_SECS: u64 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: String,
    pub kind: NoticeKind,
    pub text: String,
}

/// Context handle for pushing notices from any handler.
#[derive(Clone, Copy)]
pub struct Notices(pub RwSignal<Vec<Notice>>);

impl Notices {
    pub fn provide() -> Self {
        let notices = Self(create_rw_signal(Vec::new()));
        provide_context(notices);
        notices
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(NoticeKind::Info, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NoticeKind::Error, text.into());
    }

    pub fn dismiss(&self, id: &str) {
        let id = id.to_string();
        self.0.update(|list| list.retain(|n| n.id != id));
    }

    fn push(&self, kind: NoticeKind, text: String) {
        let id = Uuid::new_v4().to_string();
        let signal = self.0;
        self.0.update(|list| {
            list.push(Notice { id: id.clone(), kind, text });
        });
        spawn_local(async move {
            gloo_timers::future::sleep(Duration::from_secs(NOTICE_TTL_SECS)).await;
            // The tray may already be gone; expiry is best-effort.
            let _ = signal.try_update(|list| list.retain(|n| n.id != id));
        });
    }
}

#[component]
pub fn NoticeTray() -> impl IntoView {
    let notices = expect_context::<Notices>();

    view! {
        <div class="notice-tray">
            {move || notices.0.get().into_iter().map(|notice| {
                let class = match notice.kind {
                    NoticeKind::Info => "notice notice-info",
                    NoticeKind::Error => "notice notice-error",
                };
                let id = notice.id.clone();
                view! {
                    <div class=class>
                        <span>{ notice.text }</span>
                        <button on:click=move |_| notices.dismiss(&id)>{ "Dismiss" }</button>
                    </div>
                }
            }).collect::<Vec<_>>()}
        </div>
    }
}
