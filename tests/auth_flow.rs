//! End-to-end auth flows against a local mock API

use linkedin_designer::api::ApiClient;
use linkedin_designer::auth::register::RegisterOutcome;
use linkedin_designer::auth::{
    check_design_access, AccessDecision, LoginForm, LoginOutcome, LoginPage, PaymentMethod,
    RegisterPage, RegistrationForm, Screenshot,
};
use linkedin_designer::notify::{Modal, Page};
use linkedin_designer::session::{keys, FileStorage, MemoryStorage, Storage, StorageExt};
use linkedin_designer::AsyncClient;
use std::io::Read;
use std::sync::{Arc, Mutex};
use tiny_http::{Header, Response, Server};
use url::Url;

/// What the mock server saw for one request.
#[derive(Debug, Clone)]
struct Seen {
    method: String,
    path: String,
    authorization: Option<String>,
    content_type: Option<String>,
    body: String,
}

type Routes = fn(&str, &str) -> (u16, &'static str);

fn header(request: &tiny_http::Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str().to_string())
}

/// Serve `routes` on an ephemeral port until the test process exits.
fn start_mock_api(routes: Routes) -> (Url, Arc<Mutex<Vec<Seen>>>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    std::thread::spawn(move || {
        for mut request in server.incoming_requests() {
            let mut raw = Vec::new();
            let _ = request.as_reader().read_to_end(&mut raw);
            let body = String::from_utf8_lossy(&raw).into_owned();
            let method = request.method().to_string();
            let path = request.url().to_string();
            log.lock().unwrap().push(Seen {
                method: method.clone(),
                path: path.clone(),
                authorization: header(&request, "Authorization"),
                content_type: header(&request, "Content-Type"),
                body,
            });
            let (status, json) = routes(&method, &path);
            let resp = Response::from_string(json)
                .with_status_code(status)
                .with_header("Content-Type: application/json".parse::<Header>().unwrap());
            let _ = request.respond(resp);
        }
    });
    (Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap(), seen)
}

fn approved_backend(method: &str, path: &str) -> (u16, &'static str) {
    match (method, path) {
        ("POST", "/api/auth/login") => (
            200,
            r#"{"success":true,"token":"tok-123","user":{"name":"Ada","email":"ada@example.com","status":"approved"}}"#,
        ),
        ("GET", "/api/user/design-access") => (200, r#"{"success":true,"canAccess":true}"#),
        ("GET", "/api/auth/status") => {
            (200, r#"{"success":true,"user":{"name":"Ada","status":"approved"}}"#)
        }
        ("POST", "/api/auth/register") => (201, r#"{"success":true,"message":"ok"}"#),
        _ => (404, r#"{"success":false,"message":"not found"}"#),
    }
}

fn pending_backend(method: &str, path: &str) -> (u16, &'static str) {
    match (method, path) {
        ("POST", "/api/auth/login") => (
            403,
            r#"{"success":false,"status":"pending","message":"Account pending approval"}"#,
        ),
        ("GET", "/api/user/design-access") => (
            403,
            r#"{"success":false,"canAccess":false,"message":"Account pending approval"}"#,
        ),
        _ => (404, r#"{"success":false}"#),
    }
}

#[test]
fn login_then_gate_grants_access() {
    let (base, seen) = start_mock_api(approved_backend);
    let api = ApiClient::new(base).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::open(dir.path().join("storage.json")).unwrap();

    let mut form = LoginForm::new("ada@example.com", "hunter22");
    form.remember_me = true;
    let result = LoginPage::new(&api, &mut storage).submit(&form);
    assert_eq!(result.outcome, LoginOutcome::Approved);
    assert_eq!(result.effects.redirect.unwrap().to, Page::Designer);
    assert_eq!(storage.token().as_deref(), Some("tok-123"));

    let gate = check_design_access(&api, &mut storage);
    assert_eq!(gate.decision, AccessDecision::Approved);
    assert_eq!(gate.effects.first().unwrap().message, "Welcome back, Ada!");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    let login: serde_json::Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(login["email"], "ada@example.com");
    assert_eq!(login["password"], "hunter22");
    assert_eq!(seen[1].authorization.as_deref(), Some("Bearer tok-123"));

    // The session survives a reopen of the storage file.
    let reopened = FileStorage::open(storage.path()).unwrap();
    assert_eq!(
        reopened.get(keys::REMEMBERED_EMAIL).as_deref(),
        Some("ada@example.com")
    );
    assert_eq!(reopened.user_info().unwrap().name.as_deref(), Some("Ada"));
}

#[test]
fn pending_account_sees_modal_and_is_locked_out() {
    let (base, _seen) = start_mock_api(pending_backend);
    let api = ApiClient::new(base).unwrap();
    let mut storage = MemoryStorage::new();

    let result = LoginPage::new(&api, &mut storage).submit(&LoginForm::new("p@example.com", "pw"));
    assert_eq!(result.outcome, LoginOutcome::Pending);
    assert_eq!(result.effects.modal, Some(Modal::PendingApproval));
    assert!(storage.token().is_none());

    // A stale token from an earlier session is cleared by the gate.
    storage.set(keys::USER_TOKEN, "stale").unwrap();
    let gate = check_design_access(&api, &mut storage);
    assert_eq!(gate.decision, AccessDecision::Pending);
    assert_eq!(gate.effects.redirect.unwrap().after_ms, 2000);
    assert!(storage.token().is_none());
}

#[test]
fn unreachable_api_reports_network_error() {
    // Bind then drop a listener so the port is very likely closed.
    let port = {
        let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap().port()
    };
    let api = ApiClient::new(Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap()).unwrap();
    let mut storage = MemoryStorage::new();
    let result = LoginPage::new(&api, &mut storage).submit(&LoginForm::new("a@b.co", "pw"));
    assert_eq!(result.outcome, LoginOutcome::NetworkError);
    assert_eq!(
        result.effects.first().unwrap().message,
        "Network error. Please check your connection and try again."
    );
}

#[test]
fn registration_uploads_multipart_form() {
    let (base, seen) = start_mock_api(approved_backend);
    let api = ApiClient::new(base).unwrap();
    let mut storage = MemoryStorage::new();

    let png = b"\x89PNG\r\n\x1a\nfake-image-bytes".to_vec();
    let form = RegistrationForm {
        name: "Grace Hopper".into(),
        email: "grace@example.com".into(),
        password: "Compiler1".into(),
        confirm_password: "Compiler1".into(),
        payment_method: Some(PaymentMethod::EasyPaisa),
        screenshot: Some(Screenshot::from_bytes("receipt.png", png).unwrap()),
        agree_terms: true,
    };
    let result = RegisterPage::new(&api, &mut storage).submit(&form);
    assert_eq!(result.outcome, RegisterOutcome::Submitted);
    assert_eq!(result.effects.modal, Some(Modal::RegistrationSuccess));
    assert_eq!(storage.pending_registration().unwrap().email, "grace@example.com");

    let seen = seen.lock().unwrap();
    let req = &seen[0];
    assert_eq!((req.method.as_str(), req.path.as_str()), ("POST", "/api/auth/register"));
    assert!(req
        .content_type
        .as_deref()
        .unwrap()
        .starts_with("multipart/form-data"));
    for field in ["name=\"paymentMethod\"", "easypaisa", "filename=\"receipt.png\"", "image/png"] {
        assert!(req.body.contains(field), "missing {} in body", field);
    }
}

#[tokio::test]
async fn async_client_talks_to_the_same_backend() {
    let (base, seen) = start_mock_api(approved_backend);
    let client = AsyncClient::new(base).await.unwrap();

    let access = client.design_access("tok-async").await.unwrap();
    assert!(access.success && access.can_access);
    let status = client.auth_status("tok-async").await.unwrap();
    assert_eq!(status.user.unwrap().name.as_deref(), Some("Ada"));
    client.close().await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen
        .iter()
        .all(|s| s.authorization.as_deref() == Some("Bearer tok-async")));
}
