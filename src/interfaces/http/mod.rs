pub mod html;

use crate::domain::error::{AppError, Result};
use crate::domain::page::PageView;
use crate::interfaces::state::AppState;
use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

const LOG_CAPACITY: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub app_state: Arc<AppState>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

#[get("/")]
async fn index(data: web::Data<HttpState>) -> impl Responder {
    match render_idle(&data).await {
        Ok(page) => html_response(&page),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

#[post("/check-imports")]
async fn check_imports(data: web::Data<HttpState>) -> impl Responder {
    match run_import_check(&data).await {
        Ok(page) => html_response(&page),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

#[get("/healthz")]
async fn healthz() -> impl Responder {
    HttpResponse::Ok().content_type("text/plain").body("ok")
}

#[get("/page")]
async fn api_page(data: web::Data<HttpState>) -> impl Responder {
    match render_idle(&data).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

#[post("/check-imports")]
async fn api_check_imports(data: web::Data<HttpState>) -> impl Responder {
    match run_import_check(&data).await {
        Ok(page) if page.is_failure() => HttpResponse::InternalServerError().json(page),
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = lock_logs(&data.logs);
    HttpResponse::Ok().json(&*logs)
}

/// Secret lookups may touch the filesystem or keyring, so renders run on the
/// blocking pool.
async fn render_idle(data: &web::Data<HttpState>) -> Result<PageView> {
    let app_state = data.app_state.clone();
    web::block(move || app_state.smoke_page.render())
        .await
        .map_err(|e| {
            add_log(
                &data.logs,
                "ERROR",
                "Page",
                &format!("Page render worker failed: {}", e),
            );
            AppError::Internal(format!("Page render worker failed: {}", e))
        })
}

/// Runs the import check on the blocking pool and records its outcome.
async fn run_import_check(data: &web::Data<HttpState>) -> Result<PageView> {
    add_log(&data.logs, "INFO", "Imports", "Import check requested");

    let app_state = data.app_state.clone();
    let page = web::block(move || app_state.smoke_page.check_imports())
        .await
        .map_err(|e| {
            add_log(
                &data.logs,
                "ERROR",
                "Imports",
                &format!("Import check worker failed: {}", e),
            );
            AppError::Internal(format!("Import check worker failed: {}", e))
        })?;

    match &page.outcome {
        Some(crate::domain::page::OutcomeView::Failure { error, .. }) => add_log(
            &data.logs,
            "ERROR",
            "Imports",
            &format!("Import check failed: {}", error),
        ),
        Some(crate::domain::page::OutcomeView::Success { message, .. }) => {
            add_log(&data.logs, "INFO", "Imports", message)
        }
        None => {}
    }

    Ok(page)
}

fn html_response(page: &PageView) -> HttpResponse {
    let mut response = if page.is_failure() {
        HttpResponse::InternalServerError()
    } else {
        HttpResponse::Ok()
    };
    response
        .content_type("text/html; charset=utf-8")
        .body(html::render_html(page))
}

fn lock_logs(logs: &Mutex<Vec<LogEntry>>) -> std::sync::MutexGuard<'_, Vec<LogEntry>> {
    logs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    match level {
        "ERROR" => tracing::error!(source, "{}", message),
        "WARN" => tracing::warn!(source, "{}", message),
        _ => tracing::info!(source, "{}", message),
    }

    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = lock_logs(logs);
    logs.push(entry.clone());
    if logs.len() > LOG_CAPACITY {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

/// Page routes plus the JSON API under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(check_imports)
        .service(healthz)
        .service(
            web::scope("/api")
                .wrap(Cors::permissive())
                .service(api_page)
                .service(api_check_imports)
                .service(get_logs),
        );
}

pub fn start_server(
    app_state: Arc<AppState>,
    logs: Arc<Mutex<Vec<LogEntry>>>,
    host: &str,
    port: u16,
) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState { app_state, logs });

    let server = HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind((host, port))?
        .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::dependency_resolver::tests::BrokenProbe;
    use crate::application::{DependencyResolver, SmokePageUseCase};
    use crate::domain::dependency::OptionalDependency;
    use crate::domain::page::{PageSettings, TriggerState};
    use crate::infrastructure::secrets::MemorySecretStore;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;

    fn http_state(keys: &[&str], resolver: DependencyResolver) -> web::Data<HttpState> {
        let smoke_page = SmokePageUseCase::new(
            Arc::new(MemorySecretStore::with_keys(keys.iter().copied())),
            Arc::new(resolver),
            PageSettings::default(),
        );
        web::Data::new(HttpState {
            app_state: Arc::new(AppState { smoke_page }),
            logs: Arc::new(Mutex::new(Vec::new())),
        })
    }

    fn broken_resolver() -> DependencyResolver {
        DependencyResolver::with_probes(vec![Box::new(BrokenProbe(OptionalDependency::DriveAuth))])
    }

    #[actix_web::test]
    async fn test_index_renders_without_pressing() {
        let app = actix_test::init_service(
            App::new()
                .app_data(http_state(&["GDRIVE_SERVICE_JSON"], broken_resolver()))
                .configure(configure),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = actix_test::read_body(resp).await;
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("🧪 Prueba mínima de despliegue"));
        assert!(body.contains("Si ves esto, la app se renderizó correctamente."));
        assert!(body.contains("GDRIVE_SERVICE_JSON en Secrets: ✅ presente"));
        assert!(!body.contains("Imports OK"));
    }

    #[actix_web::test]
    async fn test_index_secret_missing() {
        let app = actix_test::init_service(
            App::new()
                .app_data(http_state(&[], broken_resolver()))
                .configure(configure),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/").to_request();
        let body = actix_test::call_and_read_body(&app, req).await;
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("GDRIVE_SERVICE_JSON en Secrets: ❌ no encontrado"));
    }

    #[actix_web::test]
    async fn test_check_imports_success() {
        let app = actix_test::init_service(
            App::new()
                .app_data(http_state(&[], DependencyResolver::with_probes(Vec::new())))
                .configure(configure),
        )
        .await;

        let req = actix_test::TestRequest::post().uri("/check-imports").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = actix_test::read_body(resp).await;
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("✅ Imports OK"));
    }

    #[actix_web::test]
    async fn test_check_imports_failure_is_visible() {
        let state = http_state(&[], broken_resolver());
        let app = actix_test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = actix_test::TestRequest::post().uri("/check-imports").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = actix_test::read_body(resp).await;
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(!body.contains("Imports OK"));
        assert!(body.contains("drive-auth"));

        let logs = state.logs.lock().unwrap();
        assert!(logs.iter().any(|entry| entry.level == "ERROR"));
    }

    #[actix_web::test]
    async fn test_api_page_json() {
        let app = actix_test::init_service(
            App::new()
                .app_data(http_state(&["GDRIVE_SERVICE_JSON"], broken_resolver()))
                .configure(configure),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/api/page").to_request();
        let page: PageView = actix_test::call_and_read_body_json(&app, req).await;
        assert!(page.secret.present);
        assert_eq!(page.trigger.state, TriggerState::Idle);
    }

    #[actix_web::test]
    async fn test_api_check_imports_failure() {
        let app = actix_test::init_service(
            App::new()
                .app_data(http_state(&[], broken_resolver()))
                .configure(configure),
        )
        .await;

        let req = actix_test::TestRequest::post().uri("/api/check-imports").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let page: PageView = actix_test::read_body_json(resp).await;
        assert_eq!(page.trigger.state, TriggerState::Failed);
    }

    #[actix_web::test]
    async fn test_healthz_and_logs() {
        let state = http_state(&[], broken_resolver());
        add_log(&state.logs, "INFO", "System", "ready");
        let app = actix_test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = actix_test::TestRequest::get().uri("/healthz").to_request();
        let body = actix_test::call_and_read_body(&app, req).await;
        assert_eq!(&body[..], b"ok");

        let req = actix_test::TestRequest::get().uri("/api/logs").to_request();
        let logs: Vec<LogEntry> = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].message, "ready");
    }

    #[test]
    fn test_log_buffer_is_bounded() {
        let logs = Mutex::new(Vec::new());
        for i in 0..(LOG_CAPACITY + 5) {
            add_log(&logs, "INFO", "Test", &format!("entry {}", i));
        }
        let logs = logs.lock().unwrap();
        assert_eq!(logs.len(), LOG_CAPACITY);
        assert_eq!(logs[0].message, "entry 5");
    }
}
