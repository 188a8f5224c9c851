/// Schema probes behind the admin "migration needed" banners.
///
/// The collaborator exposes no version registry, so the banner decides
/// by issuing a bounded read against the column a migration would add:
/// an error means the migration has not been applied. Every failure
/// mode, network included, leans toward showing the banner.
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use leptos::logging::log;
use serde_json::json;

use crate::backend::{BackendApi, BackendError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Applied,
    NeedsMigration,
}

pub fn outcome_from_read<T>(result: &Result<T, BackendError>) -> ProbeOutcome {
    match result {
        Ok(_) => ProbeOutcome::Applied,
        Err(_) => ProbeOutcome::NeedsMigration,
    }
}

/// Bounded read (`limit 1`) selecting `column` from `table`.
pub async fn probe_column(api: &dyn BackendApi, table: &str, column: &str) -> ProbeOutcome {
    let result = api.select(table, column, &[], Some(1)).await;
    if let Err(err) = &result {
        log!("[MIGRATION] probe of {}.{} failed: {}", table, column, err);
    }
    outcome_from_read(&result)
}

/// Variant that asks the backend's introspection helper whether the
/// column is nullable. Unavailable or failing introspection counts as
/// not applied.
pub async fn probe_column_nullable(api: &dyn BackendApi, table: &str, column: &str) -> ProbeOutcome {
    let result = api
        .rpc(
            "column_is_nullable",
            json!({ "table_name": table, "column_name": column }),
        )
        .await;
    match result {
        Ok(value) if value.as_bool() == Some(true) => ProbeOutcome::Applied,
        Ok(_) => ProbeOutcome::NeedsMigration,
        Err(err) => {
            log!("[MIGRATION] introspection of {}.{} failed: {}", table, column, err);
            ProbeOutcome::NeedsMigration
        }
    }
}

/// Device-local persistence for an explicit banner dismissal. Scoped to
/// the browser profile; never affects other users or devices.
pub trait DismissalStore {
    fn is_dismissed(&self, key: &str) -> bool;
    fn set_dismissed(&self, key: &str);
}

pub fn dismissal_key(table: &str, column: &str) -> String {
    format!("litlens.migration.{table}.{column}.dismissed")
}

/// The banner shows only while the migration is outstanding and the
/// user has not dismissed it in this storage scope.
pub fn banner_visible(outcome: ProbeOutcome, store: &dyn DismissalStore, key: &str) -> bool {
    outcome == ProbeOutcome::NeedsMigration && !store.is_dismissed(key)
}

/// `localStorage`-backed store. Storage failures are treated as
/// "not dismissed" so the banner errs toward visible.
#[derive(Clone, Default)]
pub struct BrowserDismissals;

impl DismissalStore for BrowserDismissals {
    fn is_dismissed(&self, key: &str) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        match window.local_storage() {
            Ok(Some(storage)) => matches!(storage.get_item(key), Ok(Some(v)) if v == "true"),
            _ => false,
        }
    }

    fn set_dismissed(&self, key: &str) {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                let _ = storage.set_item(key, "true");
            }
        }
    }
}

/// Shared in-memory store. Clones share one scope, which is how tests
/// model a reload within the same browser profile.
#[derive(Clone, Default)]
pub struct MemoryDismissals(Rc<RefCell<HashSet<String>>>);

impl MemoryDismissals {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DismissalStore for MemoryDismissals {
    fn is_dismissed(&self, key: &str) -> bool {
        self.0.borrow().contains(key)
    }

    fn set_dismissed(&self, key: &str) {
        self.0.borrow_mut().insert(key.to_string());
    }
}
