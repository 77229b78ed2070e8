use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{Result, StudyError};
use crate::html;
use crate::model::Status;
use crate::progress::ProgressReport;
use crate::store::{RoadmapRepository, RoadmapStore};

pub const DEFAULT_ADDR: &str = "127.0.0.1:8501";

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn RoadmapRepository>,
}

impl AppState {
    pub fn new(store: impl RoadmapRepository + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Error returned from a handler; the page render or save is abandoned but
/// the server keeps serving.
struct WebError(StudyError);

impl From<StudyError> for WebError {
    fn from(err: StudyError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            StudyError::DayNotFound(_) | StudyError::TaskNotFound(_, _) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!(error = %self.0, "request failed");
        let body = serde_json::json!({
            "error": self.0.code(),
            "message": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct DashboardQuery {
    day: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ToggleForm {
    day: String,
    task: String,
    status: Status,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/toggle", post(toggle))
        .route("/api/progress", get(api_progress))
        .with_state(state)
}

/// Every request re-reads the file, so the page always shows what is on disk.
async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> std::result::Result<Html<String>, WebError> {
    let doc = state.store.load();
    let requested = query.day.as_deref().filter(|id| doc.contains_day(id));
    let selected = requested.or_else(|| doc.sorted_day_ids().first().copied());
    let page = html::render_dashboard(&doc, selected, &state.store.file_name())?;
    Ok(Html(page))
}

async fn toggle(
    State(state): State<AppState>,
    Form(form): Form<ToggleForm>,
) -> std::result::Result<Redirect, WebError> {
    let mut doc = state.store.load();
    let Ok(task_id) = form.task.trim().parse::<i64>() else {
        return Ok(Redirect::to(&html::day_href(&form.day)));
    };

    match doc.set_task_status(&form.day, task_id, form.status) {
        Ok(true) => {
            state.store.save(&doc)?;
            tracing::info!(day = %form.day, task = task_id, status = %form.status, "task updated");
        }
        Ok(false) => {}
        Err(err @ (StudyError::DayNotFound(_) | StudyError::TaskNotFound(_, _))) => {
            tracing::debug!(error = %err, "ignoring toggle");
        }
        Err(err) => return Err(err.into()),
    }

    let target = if doc.contains_day(&form.day) {
        html::day_href(&form.day)
    } else {
        "/".to_string()
    };
    Ok(Redirect::to(&target))
}

async fn api_progress(State(state): State<AppState>) -> Json<ProgressReport> {
    Json(ProgressReport::build(&state.store.load()))
}

pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("dashboard listening on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        })
        .await?;
    Ok(())
}

/// Serve the dashboard on a single-threaded runtime until Ctrl-C.
pub fn run(store: RoadmapStore, addr: &str) -> Result<()> {
    let addr: SocketAddr = addr
        .parse()
        .map_err(|_| StudyError::InvalidAddress(addr.to_string()))?;
    tracing::info!(roadmap = %store.path().display(), "serving roadmap");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve(addr, AppState::new(store)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ReadOnlyStore;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use std::fs;
    use tempfile::{TempDir, tempdir};
    use tower::ServiceExt;

    const ONE_TASK: &str = r#"{"1": {"date":"Mon","focus":"Arrays","tasks":[{"id":1,"subject":"DSA","topic":"Two Sum","action":"Solve it","status":"pending"}]}}"#;

    fn state_with(json: Option<&str>) -> (TempDir, AppState, RoadmapStore) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roadmap.json");
        if let Some(json) = json {
            fs::write(&path, json).unwrap();
        }
        let store = RoadmapStore::new(path);
        (dir, AppState::new(store.clone()), store)
    }

    async fn get_page(state: &AppState, uri: &str) -> (StatusCode, String) {
        let req = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("request");
        let resp = router(state.clone()).oneshot(req).await.expect("response");
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
        (status, String::from_utf8(body.to_vec()).expect("utf8"))
    }

    async fn post_toggle(state: &AppState, form: &str) -> Response {
        let req = Request::builder()
            .method("POST")
            .uri("/toggle")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("request");
        router(state.clone()).oneshot(req).await.expect("response")
    }

    fn location(resp: &Response) -> &str {
        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .expect("location")
    }

    #[tokio::test]
    async fn empty_roadmap_shows_no_tasks_notice() {
        let (_dir, state, _store) = state_with(None);
        let (status, body) = get_page(&state, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No tasks found."));
        assert!(body.contains("Please ensure 'roadmap.json' is populated."));
        assert!(!body.contains("<option"));
    }

    #[tokio::test]
    async fn dashboard_selects_first_day_by_default() {
        let (_dir, state, _store) = state_with(Some(ONE_TASK));
        let (status, body) = get_page(&state, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("🗓️ Mon: Arrays"));
        assert!(body.contains(">PENDING</span>"));
    }

    #[tokio::test]
    async fn unknown_day_query_falls_back() {
        let (_dir, state, _store) = state_with(Some(ONE_TASK));
        let (_, body) = get_page(&state, "/?day=nope").await;
        assert!(body.contains("🗓️ Mon: Arrays"));
    }

    #[tokio::test]
    async fn toggle_saves_and_redirects_to_day() {
        let (_dir, state, store) = state_with(Some(ONE_TASK));

        let resp = post_toggle(&state, "day=1&task=1&status=done").await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/?day=1");
        assert_eq!(store.load().day("1").unwrap().tasks[0].status, Status::Done);

        let (_, body) = get_page(&state, "/?day=1").await;
        assert!(body.contains(">COMPLETED</span>"));
        assert!(body.contains("<span class=\"value\">1/1</span>"));
        assert!(body.contains("<span class=\"value\">100%</span>"));

        post_toggle(&state, "day=1&task=1&status=pending").await;
        assert_eq!(store.load().day("1").unwrap().tasks[0].status, Status::Pending);
    }

    #[tokio::test]
    async fn toggle_with_unknown_ids_leaves_file_alone() {
        let (_dir, state, store) = state_with(Some(ONE_TASK));

        let resp = post_toggle(&state, "day=1&task=7&status=done").await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let resp = post_toggle(&state, "day=9&task=1&status=done").await;
        assert_eq!(location(&resp), "/");
        let resp = post_toggle(&state, "day=1&task=abc&status=done").await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        assert_eq!(fs::read_to_string(store.path()).unwrap(), ONE_TASK);
    }

    #[tokio::test]
    async fn save_failure_returns_500_and_server_keeps_serving() {
        let (_dir, _state, store) = state_with(Some(ONE_TASK));
        let state = AppState::new(ReadOnlyStore(store.clone()));

        let resp = post_toggle(&state, "day=1&task=1&status=done").await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "io_error");
        assert!(json["message"].as_str().unwrap().contains("read-only"));

        let (status, body) = get_page(&state, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(">PENDING</span>"));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), ONE_TASK);
    }

    #[tokio::test]
    async fn api_progress_reports_counts() {
        let (_dir, state, _store) = state_with(Some(ONE_TASK));
        let (status, body) = get_page(&state, "/api/progress").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["completed"], 0);
        assert_eq!(json["total"], 1);
        assert_eq!(json["days"][0]["id"], "1");
    }

    #[tokio::test]
    async fn render_errors_become_json_500() {
        let (_dir, state, _store) = state_with(Some(r#"{"1": {"focus": "Arrays"}}"#));
        let (status, body) = get_page(&state, "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "missing_field");
    }

    #[test]
    fn run_rejects_bad_address() {
        let err = run(RoadmapStore::default(), "not-an-address").unwrap_err();
        assert!(matches!(err, StudyError::InvalidAddress(_)));
    }
}
