use crate::api::{
    ApiClient, ApiResponse, AuthApi, AuthStatusResponse, DesignAccessResponse, LoginRequest,
    LoginResponse, RegisterResponse, RegistrationPayload,
};
use crate::{Error, Result};
use std::sync::mpsc::{self, Sender};
use std::thread;
use tokio::sync::oneshot;
use url::Url;

enum Command {
    DesignAccess(String, oneshot::Sender<Result<DesignAccessResponse>>),
    Login(LoginRequest, oneshot::Sender<Result<ApiResponse<LoginResponse>>>),
    AuthStatus(String, oneshot::Sender<Result<AuthStatusResponse>>),
    Register(
        Box<RegistrationPayload>,
        oneshot::Sender<Result<ApiResponse<RegisterResponse>>>,
    ),
    Close(oneshot::Sender<()>),
}

/// An async-friendly API client backed by a dedicated worker thread.
///
/// The worker thread owns the blocking [`ApiClient`] and executes calls sent
/// from async tasks, so callers inside a tokio runtime never block on the
/// network themselves. Calls are answered in the order they were sent.
#[derive(Clone)]
pub struct AsyncClient {
    cmd_tx: Sender<Command>,
}

impl AsyncClient {
    /// Create a client for `base` (spawns a background thread that owns it).
    pub async fn new(base: Url) -> Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx) = oneshot::channel::<Result<()>>();

        thread::spawn(move || {
            // The blocking client must be built off the async runtime
            let client = match ApiClient::new(base) {
                Ok(c) => c,
                Err(err) => {
                    let _ = init_tx.send(Err(err));
                    return;
                }
            };
            let _ = init_tx.send(Ok(()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::DesignAccess(token, resp) => {
                        let _ = resp.send(client.design_access(&token));
                    }
                    Command::Login(request, resp) => {
                        let _ = resp.send(client.login(&request));
                    }
                    Command::AuthStatus(token, resp) => {
                        let _ = resp.send(client.auth_status(&token));
                    }
                    Command::Register(payload, resp) => {
                        let _ = resp.send(client.register(&payload));
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(());
                        break;
                    }
                }
            }
            log::debug!("api worker stopped");
        });

        init_rx
            .await
            .map_err(|e| Error::Worker(format!("init canceled: {}", e)))??;

        Ok(Self { cmd_tx })
    }

    pub async fn from_config(config: &crate::DesignerConfig) -> Result<Self> {
        Self::new(config.api_url()?).await
    }

    async fn call<T>(
        &self,
        what: &str,
        make: impl FnOnce(oneshot::Sender<Result<T>>) -> Command,
    ) -> Result<T> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .map_err(|_| Error::Worker(format!("{}: worker is closed", what)))?;
        rx.await
            .map_err(|e| Error::Worker(format!("{} canceled: {}", what, e)))?
    }

    pub async fn design_access(&self, token: &str) -> Result<DesignAccessResponse> {
        let token = token.to_string();
        self.call("design access", |tx| Command::DesignAccess(token, tx))
            .await
    }

    pub async fn login(&self, request: LoginRequest) -> Result<ApiResponse<LoginResponse>> {
        self.call("login", |tx| Command::Login(request, tx)).await
    }

    pub async fn auth_status(&self, token: &str) -> Result<AuthStatusResponse> {
        let token = token.to_string();
        self.call("auth status", |tx| Command::AuthStatus(token, tx))
            .await
    }

    pub async fn register(
        &self,
        payload: RegistrationPayload,
    ) -> Result<ApiResponse<RegisterResponse>> {
        self.call("register", |tx| Command::Register(Box::new(payload), tx))
            .await
    }

    /// Shut down the background worker. Other clones stop working too.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Worker(format!("close canceled: {}", e)))
    }
}
