/// Banner shown while a backend schema migration is outstanding.
/// Probes on mount; any probe failure keeps the banner visible.
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::backend::BackendHandle;
use crate::migration::{
    banner_visible, dismissal_key, probe_column, probe_column_nullable, BrowserDismissals,
    DismissalStore,
};

#[component]
pub fn MigrationBanner(
    table: &'static str,
    column: &'static str,
    message: &'static str,
    /// Probe column nullability through the introspection helper
    /// instead of reading the column directly.
    #[prop(optional)]
    nullable: bool,
) -> impl IntoView {
    let backend = expect_context::<BackendHandle>();
    let (visible, set_visible) = create_signal(false);
    let key = dismissal_key(table, column);

    {
        let key = key.clone();
        spawn_local(async move {
            let outcome = if nullable {
                probe_column_nullable(backend.api(), table, column).await
            } else {
                probe_column(backend.api(), table, column).await
            };
            let _ = set_visible.try_set(banner_visible(outcome, &BrowserDismissals, &key));
        });
    }

    view! {
        {move || visible.get().then(|| {
            let key = key.clone();
            view! {
                <div class="banner banner-migration">
                    <span>{ message }</span>
                    <button on:click=move |_| {
                        BrowserDismissals.set_dismissed(&key);
                        set_visible.set(false);
                    }>{ "Dismiss" }</button>
                </div>
            }
        })}
    }
}
