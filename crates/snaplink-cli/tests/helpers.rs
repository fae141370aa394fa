#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::io::{self, Cursor, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use snaplink_cli::cli::Deps;
use snaplink_cli::client::{
    ApiClient, CreateSecretRequest, CreateSecretResponse, SnaplinkApi,
};
use snaplink_core::{FetchOutcome, Password};

/// A shared buffer that implements Write for capturing output.
#[derive(Clone)]
pub struct SharedBuf(pub Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn new() -> Self {
        SharedBuf(Arc::new(Mutex::new(Vec::new())))
    }

    pub fn to_string(&self) -> String {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf).to_string()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One recorded retrieval request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchCall {
    pub code: String,
    pub password: Option<String>,
}

#[derive(Default)]
struct MockState {
    fetches: VecDeque<(u16, String)>,
    fetch_calls: Vec<FetchCall>,
    create: Option<Result<CreateSecretResponse, String>>,
    create_calls: Vec<CreateSecretRequest>,
    shorten: Option<Result<String, String>>,
    shorten_calls: Vec<String>,
}

/// A scripted API. Clones share state, so a test keeps one handle to
/// inspect the calls made through the copy handed to `Deps`.
#[derive(Clone, Default)]
pub struct MockApi(Arc<Mutex<MockState>>);

impl MockApi {
    pub fn new() -> Self {
        MockApi::default()
    }

    /// Queue a retrieval response, served in order.
    pub fn respond(self, status: u16, body: &str) -> Self {
        self.0
            .lock()
            .unwrap()
            .fetches
            .push_back((status, body.to_string()));
        self
    }

    pub fn create(self, resp: Result<CreateSecretResponse, String>) -> Self {
        self.0.lock().unwrap().create = Some(resp);
        self
    }

    pub fn shorten(self, resp: Result<String, String>) -> Self {
        self.0.lock().unwrap().shorten = Some(resp);
        self
    }

    pub fn fetch_calls(&self) -> Vec<FetchCall> {
        self.0.lock().unwrap().fetch_calls.clone()
    }

    pub fn create_calls(&self) -> Vec<CreateSecretRequest> {
        self.0.lock().unwrap().create_calls.clone()
    }

    pub fn shorten_calls(&self) -> Vec<String> {
        self.0.lock().unwrap().shorten_calls.clone()
    }
}

impl SnaplinkApi for MockApi {
    fn fetch_secret(&self, code: &str, password: Option<&Password>) -> FetchOutcome {
        let mut state = self.0.lock().unwrap();
        state.fetch_calls.push(FetchCall {
            code: code.to_string(),
            password: password.map(|p| p.expose().to_string()),
        });
        match state.fetches.pop_front() {
            Some((status, body)) => FetchOutcome::from_response(status, body),
            None => FetchOutcome::transport_failure("mock: fetch not configured"),
        }
    }

    fn create_secret(&self, req: &CreateSecretRequest) -> Result<CreateSecretResponse, String> {
        let mut state = self.0.lock().unwrap();
        state.create_calls.push(req.clone());
        state
            .create
            .clone()
            .unwrap_or_else(|| Err("mock: create not configured".into()))
    }

    fn shorten(&self, url: &str) -> Result<String, String> {
        let mut state = self.0.lock().unwrap();
        state.shorten_calls.push(url.to_string());
        state
            .shorten
            .clone()
            .unwrap_or_else(|| Err("mock: shorten not configured".into()))
    }
}

/// Clipboard stand-in recording what was copied.
#[derive(Clone)]
pub struct MockClipboard {
    result: Result<(), String>,
    copied: Arc<Mutex<Vec<String>>>,
}

impl MockClipboard {
    pub fn working() -> Self {
        MockClipboard {
            result: Ok(()),
            copied: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(msg: &str) -> Self {
        MockClipboard {
            result: Err(msg.to_string()),
            copied: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn copied(&self) -> Vec<String> {
        self.copied.lock().unwrap().clone()
    }
}

/// Build test Deps with configurable options.
pub struct TestDepsBuilder {
    stdin_data: Vec<u8>,
    is_tty: bool,
    is_stdout_tty: bool,
    env: HashMap<String, String>,
    read_pass_responses: Vec<String>,
    read_pass_error: Option<String>,
    api: Option<MockApi>,
    clipboard: MockClipboard,
    api_urls: Arc<Mutex<Vec<(String, Duration)>>>,
    log_directives: Arc<Mutex<Vec<String>>>,
}

impl TestDepsBuilder {
    pub fn new() -> Self {
        // Point XDG_CONFIG_HOME at an empty per-thread dir so the real user
        // config is never read. `.env("XDG_CONFIG_HOME", ...)` overrides it.
        let iso_dir = std::env::temp_dir().join(format!(
            "snaplink_test_iso_{}_{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        let mut env = HashMap::new();
        env.insert(
            "XDG_CONFIG_HOME".to_string(),
            iso_dir.to_string_lossy().to_string(),
        );
        TestDepsBuilder {
            stdin_data: Vec::new(),
            is_tty: false,
            is_stdout_tty: false,
            env,
            read_pass_responses: Vec::new(),
            read_pass_error: None,
            api: None,
            clipboard: MockClipboard::working(),
            api_urls: Arc::new(Mutex::new(Vec::new())),
            log_directives: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn stdin(mut self, data: &[u8]) -> Self {
        self.stdin_data = data.to_vec();
        self
    }

    pub fn is_tty(mut self, v: bool) -> Self {
        self.is_tty = v;
        self
    }

    pub fn is_stdout_tty(mut self, v: bool) -> Self {
        self.is_stdout_tty = v;
        self
    }

    pub fn env(mut self, key: &str, val: &str) -> Self {
        self.env.insert(key.to_string(), val.to_string());
        self
    }

    pub fn read_pass(mut self, responses: &[&str]) -> Self {
        self.read_pass_responses = responses.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn read_pass_error(mut self, msg: &str) -> Self {
        self.read_pass_error = Some(msg.to_string());
        self
    }

    pub fn api(mut self, api: &MockApi) -> Self {
        self.api = Some(api.clone());
        self
    }

    pub fn clipboard(mut self, clipboard: &MockClipboard) -> Self {
        self.clipboard = clipboard.clone();
        self
    }

    /// Handle to the `(api_url, timeout)` pairs each command built a client with.
    pub fn api_urls(&self) -> Arc<Mutex<Vec<(String, Duration)>>> {
        self.api_urls.clone()
    }

    /// Handle to the log filter directives each command installed.
    pub fn log_directives(&self) -> Arc<Mutex<Vec<String>>> {
        self.log_directives.clone()
    }

    pub fn build(self) -> (Deps, SharedBuf, SharedBuf) {
        let stdout = SharedBuf::new();
        let stderr = SharedBuf::new();
        let stdout_clone = stdout.clone();
        let stderr_clone = stderr.clone();

        let is_tty = self.is_tty;
        let is_stdout_tty = self.is_stdout_tty;
        let env = self.env;

        let read_pass_responses = Arc::new(Mutex::new(self.read_pass_responses));
        let read_pass_error = self.read_pass_error;
        let clipboard = self.clipboard;
        let api_urls = self.api_urls;
        let log_directives = self.log_directives;

        let deps = Deps {
            stdin: Box::new(Cursor::new(self.stdin_data)),
            stdout: Box::new(stdout_clone),
            stderr: Box::new(stderr_clone),
            is_tty: Box::new(move || is_tty),
            is_stdout_tty: Box::new(move || is_stdout_tty),
            getenv: Box::new(move |key: &str| env.get(key).cloned()),
            init_logging: Box::new(move |directive: &str| {
                log_directives.lock().unwrap().push(directive.to_string());
            }),
            read_pass: Box::new(move |prompt: &str, w: &mut dyn Write| {
                let _ = w.write_all(prompt.as_bytes());
                let _ = w.flush();
                if let Some(ref msg) = read_pass_error {
                    return Err(io::Error::new(io::ErrorKind::Other, msg.clone()));
                }
                let mut responses = read_pass_responses.lock().unwrap();
                if responses.is_empty() {
                    Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no password input"))
                } else {
                    Ok(responses.remove(0))
                }
            }),
            make_api: match self.api {
                Some(api) => Box::new(move |api_url: &str, timeout: Duration| {
                    api_urls.lock().unwrap().push((api_url.to_string(), timeout));
                    Box::new(api.clone()) as Box<dyn SnaplinkApi>
                }),
                None => Box::new(move |api_url: &str, timeout: Duration| {
                    api_urls.lock().unwrap().push((api_url.to_string(), timeout));
                    Box::new(ApiClient::new(api_url, timeout)) as Box<dyn SnaplinkApi>
                }),
            },
            copy_to_clipboard: Box::new(move |text: &str| {
                clipboard.copied.lock().unwrap().push(text.to_string());
                clipboard.result.clone()
            }),
        };

        (deps, stdout, stderr)
    }
}

/// Helper to build args vec from a slice of &str.
pub fn args(strs: &[&str]) -> Vec<String> {
    strs.iter().map(|s| s.to_string()).collect()
}
