/// Persistent banner while the backend is unreachable. Pings on a
/// 30-second loop plus a manual retry button; the loop stops when the
/// component is torn down.
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::backend::BackendHandle;
use crate::connectivity::{link_state, LinkState, CHECK_INTERVAL_SECS};

#[component]
pub fn ConnectivityBanner() -> impl IntoView {
    let backend = expect_context::<BackendHandle>();
    let (state, set_state) = create_signal(LinkState::Online);
    let alive = Rc::new(Cell::new(true));

    {
        let backend = backend.clone();
        let alive = alive.clone();
        spawn_local(async move {
            loop {
                if !alive.get() {
                    break;
                }
                let result = backend.api().ping().await;
                if set_state.try_set(link_state(&result)).is_some() {
                    break;
                }
                gloo_timers::future::sleep(Duration::from_secs(CHECK_INTERVAL_SECS)).await;
            }
        });
    }
    on_cleanup(move || alive.set(false));

    let retry = {
        let backend = backend.clone();
        move |_| {
            let backend = backend.clone();
            spawn_local(async move {
                let result = backend.api().ping().await;
                let _ = set_state.try_set(link_state(&result));
            });
        }
    };

    view! {
        {move || (state.get() == LinkState::Offline).then(|| {
            let retry = retry.clone();
            view! {
                <div class="banner banner-offline">
                    <span>{ "Connection to LitLens lost. Retrying every 30 seconds." }</span>
                    <button on:click=retry>{ "Retry now" }</button>
                </div>
            }
        })}
    }
}
