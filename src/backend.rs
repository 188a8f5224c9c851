/// Adapter for the hosted backend collaborator (data, auth, file storage).
///
/// Everything above this module works with `BackendErrorKind` values;
/// the raw error text coming back from the service is classified here,
/// exactly once, and never string-matched again.
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    Network,
    NotFound,
    Conflict,
    EmailAlreadyRegistered,
    SignupsDisabled,
    InvalidCredentials,
    PermissionDenied,
    Other,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct BackendError {
    pub kind: BackendErrorKind,
    pub message: String,
}

impl BackendError {
    pub fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Network, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Other, message)
    }
}

/// Map a raw backend response onto a tagged error kind. The substrings
/// come from the collaborator's error payloads; order matters, the auth
/// messages arrive with 4xx statuses of their own.
pub fn classify_backend_error(status: u16, body: &str) -> BackendErrorKind {
    let lower = body.to_lowercase();
    if lower.contains("already registered") {
        BackendErrorKind::EmailAlreadyRegistered
    } else if lower.contains("signups not allowed") || lower.contains("signup is disabled") {
        BackendErrorKind::SignupsDisabled
    } else if lower.contains("invalid login credentials") {
        BackendErrorKind::InvalidCredentials
    } else if status == 404 || lower.contains("does not exist") || lower.contains("not found") {
        BackendErrorKind::NotFound
    } else if status == 409 || lower.contains("duplicate key") {
        BackendErrorKind::Conflict
    } else if status == 401
        || status == 403
        || lower.contains("permission denied")
        || lower.contains("row-level security")
    {
        BackendErrorKind::PermissionDenied
    } else {
        BackendErrorKind::Other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ilike,
}

/// A single predicate in a table read/write, rendered PostgREST-style
/// (`column=eq.value`).
#[derive(Debug, Clone)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: String,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self { column: column.into(), op: FilterOp::Eq, value: value.into() }
    }

    pub fn ilike(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self { column: column.into(), op: FilterOp::Ilike, value: value.into() }
    }

    pub fn to_query_pair(&self) -> String {
        let op = match self.op {
            FilterOp::Eq => "eq",
            FilterOp::Ilike => "ilike",
        };
        format!("{}={}.{}", self.column, op, urlencoding::encode(&self.value))
    }
}

/// An authenticated session as returned by the collaborator's auth surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub user_name: String,
    pub email: String,
    pub access_token: String,
    pub is_admin: bool,
}

/// The capability set the UI needs from the backend collaborator:
/// table reads/writes, server-side helpers, auth, and file upload.
/// Object-safe so components can hold an `Rc<dyn BackendApi>` and tests
/// can substitute [`MemoryBackend`].
#[async_trait(?Send)]
pub trait BackendApi {
    /// Bounded read of `columns` from `table`. `limit` caps the row count.
    async fn select(
        &self,
        table: &str,
        columns: &str,
        filters: &[Filter],
        limit: Option<u32>,
    ) -> Result<Value, BackendError>;

    async fn insert(&self, table: &str, row: Value) -> Result<Value, BackendError>;

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Value,
    ) -> Result<(), BackendError>;

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), BackendError>;

    /// Invoke a server-side helper (counter increment, column introspection).
    async fn rpc(&self, function: &str, args: Value) -> Result<Value, BackendError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        user_name: &str,
    ) -> Result<Session, BackendError>;

    /// Upload bytes to bucket-scoped object storage, returning the public URL.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
    ) -> Result<String, BackendError>;

    /// Lightweight reachability check used by the connectivity watcher.
    async fn ping(&self) -> Result<(), BackendError> {
        self.select("books", "id", &[], Some(1)).await.map(|_| ())
    }
}

/// Shareable handle stored in Leptos context.
#[derive(Clone)]
pub struct BackendHandle(pub Rc<dyn BackendApi>);

impl BackendHandle {
    pub fn new(api: impl BackendApi + 'static) -> Self {
        Self(Rc::new(api))
    }

    pub fn api(&self) -> &dyn BackendApi {
        self.0.as_ref()
    }
}

/// Decode a JSON array of rows into typed models.
pub fn decode_rows<T: serde::de::DeserializeOwned>(value: Value) -> Result<Vec<T>, BackendError> {
    serde_json::from_value(value).map_err(|e| BackendError::decode(format!("row decode failed: {e}")))
}

// =============================================================================
// HTTP implementation
// =============================================================================

/// PostgREST-style HTTP client for the hosted service.
pub struct RestBackend {
    base_url: String,
    anon_key: String,
}

impl RestBackend {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, anon_key: anon_key.into() }
    }

    /// Backend endpoint and key are baked in at build time; local
    /// defaults keep `trunk serve` working without configuration.
    pub fn from_build_env() -> Self {
        let base_url = option_env!("LITLENS_BACKEND_URL").unwrap_or("http://localhost:54321");
        let anon_key = option_env!("LITLENS_ANON_KEY").unwrap_or("dev-anon-key");
        Self::new(base_url, anon_key)
    }

    fn table_url(&self, table: &str, filters: &[Filter], limit: Option<u32>) -> String {
        let mut url = format!("{}/rest/v1/{}", self.base_url, table);
        let mut params: Vec<String> = filters.iter().map(Filter::to_query_pair).collect();
        if let Some(limit) = limit {
            params.push(format!("limit={limit}"));
        }
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }
        url
    }

    async fn check(resp: gloo_net::http::Response) -> Result<gloo_net::http::Response, BackendError> {
        if resp.ok() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Err(BackendError::new(
            classify_backend_error(status, &body),
            format!("backend returned {status}: {body}"),
        ))
    }
}

#[async_trait(?Send)]
impl BackendApi for RestBackend {
    async fn select(
        &self,
        table: &str,
        columns: &str,
        filters: &[Filter],
        limit: Option<u32>,
    ) -> Result<Value, BackendError> {
        let mut url = self.table_url(table, filters, limit);
        let sep = if url.contains('?') { '&' } else { '?' };
        url.push_str(&format!("{sep}select={}", urlencoding::encode(columns)));

        let resp = gloo_net::http::Request::get(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", self.anon_key))
            .send()
            .await
            .map_err(|e| BackendError::network(e.to_string()))?;
        let resp = Self::check(resp).await?;
        resp.json::<Value>()
            .await
            .map_err(|e| BackendError::decode(e.to_string()))
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, BackendError> {
        let url = self.table_url(table, &[], None);
        let resp = gloo_net::http::Request::post(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", self.anon_key))
            .header("Prefer", "return=representation")
            .json(&row)
            .map_err(|e| BackendError::decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| BackendError::network(e.to_string()))?;
        let resp = Self::check(resp).await?;
        resp.json::<Value>()
            .await
            .map_err(|e| BackendError::decode(e.to_string()))
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Value,
    ) -> Result<(), BackendError> {
        let url = self.table_url(table, filters, None);
        let resp = gloo_net::http::Request::patch(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", self.anon_key))
            .json(&patch)
            .map_err(|e| BackendError::decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| BackendError::network(e.to_string()))?;
        Self::check(resp).await.map(|_| ())
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), BackendError> {
        let url = self.table_url(table, filters, None);
        let resp = gloo_net::http::Request::delete(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", self.anon_key))
            .send()
            .await
            .map_err(|e| BackendError::network(e.to_string()))?;
        Self::check(resp).await.map(|_| ())
    }

    async fn rpc(&self, function: &str, args: Value) -> Result<Value, BackendError> {
        let url = format!("{}/rest/v1/rpc/{}", self.base_url, function);
        let resp = gloo_net::http::Request::post(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", self.anon_key))
            .json(&args)
            .map_err(|e| BackendError::decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| BackendError::network(e.to_string()))?;
        let resp = Self::check(resp).await?;
        resp.json::<Value>()
            .await
            .map_err(|e| BackendError::decode(e.to_string()))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let resp = gloo_net::http::Request::post(&url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .map_err(|e| BackendError::decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| BackendError::network(e.to_string()))?;
        let resp = Self::check(resp).await?;
        let auth: AuthResponse = resp
            .json()
            .await
            .map_err(|e| BackendError::decode(e.to_string()))?;
        Ok(auth.into_session())
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        user_name: &str,
    ) -> Result<Session, BackendError> {
        let url = format!("{}/auth/v1/signup", self.base_url);
        let resp = gloo_net::http::Request::post(&url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "data": { "userName": user_name },
            }))
            .map_err(|e| BackendError::decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| BackendError::network(e.to_string()))?;
        let resp = Self::check(resp).await?;
        let auth: AuthResponse = resp
            .json()
            .await
            .map_err(|e| BackendError::decode(e.to_string()))?;
        Ok(auth.into_session())
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
    ) -> Result<String, BackendError> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path);
        let body = js_sys::Uint8Array::from(bytes.as_slice());
        let resp = gloo_net::http::Request::post(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", self.anon_key))
            .body(body)
            .map_err(|e| BackendError::decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| BackendError::network(e.to_string()))?;
        Self::check(resp).await?;
        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, path
        ))
    }
}

#[derive(Deserialize)]
struct AuthResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(Deserialize)]
struct AuthUser {
    id: String,
    email: String,
    #[serde(default)]
    user_metadata: AuthMetadata,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct AuthMetadata {
    #[serde(default)]
    user_name: String,
    #[serde(default)]
    is_admin: bool,
}

impl AuthResponse {
    fn into_session(self) -> Session {
        let user_name = if self.user.user_metadata.user_name.is_empty() {
            self.user.email.clone()
        } else {
            self.user.user_metadata.user_name
        };
        Session {
            user_id: self.user.id,
            user_name,
            email: self.user.email,
            access_token: self.access_token,
            is_admin: self.user.user_metadata.is_admin,
        }
    }
}

// =============================================================================
// In-memory implementation
// =============================================================================

/// In-memory backend used by tests and local demos. Rows live in JSON
/// form, keyed by table name; schema gaps and outages are scripted
/// through the `with_*` builders.
#[derive(Default)]
pub struct MemoryBackend {
    tables: RefCell<HashMap<String, Vec<Value>>>,
    missing_columns: RefCell<HashSet<(String, String)>>,
    rpc_responses: RefCell<HashMap<String, Value>>,
    accounts: RefCell<Vec<MemoryAccount>>,
    signups_disabled: Cell<bool>,
    offline: Cell<bool>,
    uploads: RefCell<Vec<String>>,
}

struct MemoryAccount {
    email: String,
    password: String,
    user_name: String,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(self, table: &str, rows: Vec<Value>) -> Self {
        self.tables.borrow_mut().insert(table.to_string(), rows);
        self
    }

    /// Script a column the hosted schema does not have yet; selects that
    /// name it will fail the way the live service does.
    pub fn with_missing_column(self, table: &str, column: &str) -> Self {
        self.missing_columns
            .borrow_mut()
            .insert((table.to_string(), column.to_string()));
        self
    }

    pub fn with_rpc(self, function: &str, response: Value) -> Self {
        self.rpc_responses
            .borrow_mut()
            .insert(function.to_string(), response);
        self
    }

    pub fn with_account(self, email: &str, password: &str, user_name: &str) -> Self {
        self.accounts.borrow_mut().push(MemoryAccount {
            email: email.to_string(),
            password: password.to_string(),
            user_name: user_name.to_string(),
        });
        self
    }

    pub fn with_signups_disabled(self) -> Self {
        self.signups_disabled.set(true);
        self
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn uploads(&self) -> Vec<String> {
        self.uploads.borrow().clone()
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .borrow()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    fn guard_offline(&self) -> Result<(), BackendError> {
        if self.offline.get() {
            Err(BackendError::network("connection refused"))
        } else {
            Ok(())
        }
    }

    fn matches(row: &Value, filters: &[Filter]) -> bool {
        filters.iter().all(|f| {
            let field = row.get(&f.column);
            let text = match field {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => return false,
            };
            match f.op {
                FilterOp::Eq => text == f.value,
                FilterOp::Ilike => text
                    .to_lowercase()
                    .contains(&f.value.trim_matches('%').to_lowercase()),
            }
        })
    }
}

#[async_trait(?Send)]
impl BackendApi for MemoryBackend {
    async fn select(
        &self,
        table: &str,
        columns: &str,
        filters: &[Filter],
        limit: Option<u32>,
    ) -> Result<Value, BackendError> {
        self.guard_offline()?;
        for column in columns.split(',').map(str::trim) {
            if self
                .missing_columns
                .borrow()
                .contains(&(table.to_string(), column.to_string()))
            {
                return Err(BackendError::new(
                    BackendErrorKind::NotFound,
                    format!("column {table}.{column} does not exist"),
                ));
            }
        }
        let tables = self.tables.borrow();
        let rows = tables.get(table).ok_or_else(|| {
            BackendError::new(BackendErrorKind::NotFound, format!("relation {table} does not exist"))
        })?;
        let mut out: Vec<Value> = rows
            .iter()
            .filter(|r| Self::matches(r, filters))
            .cloned()
            .collect();
        if let Some(limit) = limit {
            out.truncate(limit as usize);
        }
        Ok(Value::Array(out))
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, BackendError> {
        self.guard_offline()?;
        self.tables
            .borrow_mut()
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(Value::Array(vec![row]))
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Value,
    ) -> Result<(), BackendError> {
        self.guard_offline()?;
        let mut tables = self.tables.borrow_mut();
        let rows = tables.get_mut(table).ok_or_else(|| {
            BackendError::new(BackendErrorKind::NotFound, format!("relation {table} does not exist"))
        })?;
        for row in rows.iter_mut().filter(|r| Self::matches(r, filters)) {
            if let (Value::Object(target), Value::Object(fields)) = (&mut *row, &patch) {
                for (k, v) in fields {
                    target.insert(k.clone(), v.clone());
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), BackendError> {
        self.guard_offline()?;
        let mut tables = self.tables.borrow_mut();
        let rows = tables.get_mut(table).ok_or_else(|| {
            BackendError::new(BackendErrorKind::NotFound, format!("relation {table} does not exist"))
        })?;
        rows.retain(|r| !Self::matches(r, filters));
        Ok(())
    }

    async fn rpc(&self, function: &str, _args: Value) -> Result<Value, BackendError> {
        self.guard_offline()?;
        self.rpc_responses
            .borrow()
            .get(function)
            .cloned()
            .ok_or_else(|| {
                BackendError::new(
                    BackendErrorKind::NotFound,
                    format!("function {function} does not exist"),
                )
            })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        self.guard_offline()?;
        let accounts = self.accounts.borrow();
        let account = accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .ok_or_else(|| {
                BackendError::new(BackendErrorKind::InvalidCredentials, "Invalid login credentials")
            })?;
        Ok(Session {
            user_id: format!("user-{}", account.email),
            user_name: account.user_name.clone(),
            email: account.email.clone(),
            access_token: "memory-token".to_string(),
            is_admin: false,
        })
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        user_name: &str,
    ) -> Result<Session, BackendError> {
        self.guard_offline()?;
        if self.signups_disabled.get() {
            return Err(BackendError::new(
                BackendErrorKind::SignupsDisabled,
                "Signups not allowed for this instance",
            ));
        }
        if self.accounts.borrow().iter().any(|a| a.email == email) {
            return Err(BackendError::new(
                BackendErrorKind::EmailAlreadyRegistered,
                "A user with this email address has already registered",
            ));
        }
        self.accounts.borrow_mut().push(MemoryAccount {
            email: email.to_string(),
            password: password.to_string(),
            user_name: user_name.to_string(),
        });
        Ok(Session {
            user_id: format!("user-{email}"),
            user_name: user_name.to_string(),
            email: email.to_string(),
            access_token: "memory-token".to_string(),
            is_admin: false,
        })
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, BackendError> {
        self.guard_offline()?;
        let url = format!("memory://{bucket}/{path}");
        self.uploads.borrow_mut().push(url.clone());
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classify_known_auth_messages() {
        assert_eq!(
            classify_backend_error(422, "A user with this email address has already registered"),
            BackendErrorKind::EmailAlreadyRegistered
        );
        assert_eq!(
            classify_backend_error(403, "Signups not allowed for this instance"),
            BackendErrorKind::SignupsDisabled
        );
        assert_eq!(
            classify_backend_error(400, "Invalid login credentials"),
            BackendErrorKind::InvalidCredentials
        );
    }

    #[test]
    fn classify_schema_and_permission_errors() {
        assert_eq!(
            classify_backend_error(400, "column books.cover_url does not exist"),
            BackendErrorKind::NotFound
        );
        assert_eq!(
            classify_backend_error(409, "duplicate key value violates unique constraint"),
            BackendErrorKind::Conflict
        );
        assert_eq!(
            classify_backend_error(403, "new row violates row-level security policy"),
            BackendErrorKind::PermissionDenied
        );
        assert_eq!(classify_backend_error(500, "boom"), BackendErrorKind::Other);
    }

    #[test]
    fn filters_render_postgrest_pairs() {
        assert_eq!(Filter::eq("bookId", "b1").to_query_pair(), "bookId=eq.b1");
        assert_eq!(
            Filter::ilike("title", "%the martian%").to_query_pair(),
            "title=ilike.%25the%20martian%25"
        );
    }

    #[tokio::test]
    async fn memory_backend_select_honors_filters_and_limit() {
        let backend = MemoryBackend::new().with_table(
            "books",
            vec![
                json!({"id": "b1", "title": "The Martian"}),
                json!({"id": "b2", "title": "Artemis"}),
            ],
        );
        let rows = backend
            .select("books", "*", &[Filter::eq("id", "b2")], None)
            .await
            .unwrap();
        assert_eq!(rows, json!([{"id": "b2", "title": "Artemis"}]));

        let rows = backend.select("books", "*", &[], Some(1)).await.unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn memory_backend_reports_missing_columns() {
        let backend = MemoryBackend::new()
            .with_table("books", vec![json!({"id": "b1"})])
            .with_missing_column("books", "coverUrl");
        let err = backend
            .select("books", "coverUrl", &[], Some(1))
            .await
            .unwrap_err();
        assert_eq!(err.kind, BackendErrorKind::NotFound);
    }

    #[tokio::test]
    async fn memory_backend_update_and_delete() {
        let backend = MemoryBackend::new().with_table(
            "reviews",
            vec![
                json!({"id": "r1", "content": "great"}),
                json!({"id": "r2", "content": "meh"}),
            ],
        );
        backend
            .update("reviews", &[Filter::eq("id", "r1")], json!({"content": "edited"}))
            .await
            .unwrap();
        backend
            .delete("reviews", &[Filter::eq("id", "r2")])
            .await
            .unwrap();
        let rows = backend.rows("reviews");
        assert_eq!(rows, vec![json!({"id": "r1", "content": "edited"})]);
    }

    #[tokio::test]
    async fn memory_backend_offline_is_a_network_error() {
        let backend = MemoryBackend::new().with_table("books", vec![]);
        backend.set_offline(true);
        let err = backend.ping().await.unwrap_err();
        assert_eq!(err.kind, BackendErrorKind::Network);
    }
}
