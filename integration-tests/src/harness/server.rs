use crate::harness::config::patch_for_test;
use crate::harness::{CapturedEvent, init_test_tracing};
use dwlog_core::conf::{ExportMode, load_config};
use dwlog_core::server::{AppState, build_pingora_server};
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;
use std::fs;
use std::net::TcpStream;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Handle to a running dwlog test server.
///
/// Every server owns a scratch root seeded from `fixtures/dw` and
/// `fixtures/web`, so tests can upload and delete freely.
pub struct TestServer {
    base_url: String,
    client: Client,
    root: TempDir,
}

impl TestServer {
    /// Start with the fixture config as is.
    pub fn start() -> Self {
        Self::start_with(None)
    }

    /// Start with `export.mode` overridden.
    pub fn start_with_mode(mode: ExportMode) -> Self {
        Self::start_with(Some(mode))
    }

    fn start_with(mode: Option<ExportMode>) -> Self {
        // Initialize tracing (this must happen first).
        init_test_tracing(events());

        let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
        let root = tempfile::tempdir().expect("failed to create scratch root");

        copy_dir(&fixtures.join("dw"), &root.path().join("DW"));
        copy_dir(&fixtures.join("web"), &root.path().join("web"));

        let listen_port = free_port();

        let cfg = load_config(&fixtures.join("config")).expect("failed to load fixture config");
        let mut cfg = patch_for_test(cfg, listen_port, root.path());
        if let Some(mode) = mode {
            cfg.export.mode = mode;
        }

        let state = Arc::new(AppState::new(cfg.clone()));
        state.prepare_dirs();

        let server = build_pingora_server(&cfg, state).expect("failed to build dwlog server");

        // Run server in background thread
        thread::spawn(move || {
            server.run_forever();
        });

        let base_url = format!("http://127.0.0.1:{listen_port}");

        // Wait for server to accept connections
        wait_for_server(&base_url);

        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build client");

        Self {
            base_url,
            client,
            root,
        }
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn head(&self, path: &str) -> RequestBuilder {
        self.client.head(self.url(path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    pub fn post_json(&self, path: &str, body: &Value) -> RequestBuilder {
        self.post(path).json(body)
    }

    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// GET and decode a JSON body, whatever the status.
    pub fn get_json(&self, path: &str) -> Value {
        self.get(path)
            .send()
            .expect("request failed")
            .json()
            .expect("response is not JSON")
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root().join("DW")
    }

    /// Events captured from every server in this test binary.
    pub fn events(&self) -> Vec<CapturedEvent> {
        events().lock().unwrap().clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), target).unwrap();
        }
    }
}

/// Poll until the server responds (or panic).
fn wait_for_server(listen_addr: &str) {
    let addr = listen_addr.strip_prefix("http://").unwrap_or(listen_addr);

    let deadline = Instant::now() + Duration::from_secs(2);

    loop {
        match TcpStream::connect(addr) {
            Ok(_) => return,
            Err(_) => {
                if Instant::now() > deadline {
                    panic!("server failed to start at {}", listen_addr);
                }
                thread::sleep(Duration::from_millis(25));
            }
        }
    }
}

static EVENTS: OnceLock<Arc<Mutex<Vec<CapturedEvent>>>> = OnceLock::new();

fn events() -> Arc<Mutex<Vec<CapturedEvent>>> {
    EVENTS
        .get_or_init(|| Arc::new(Mutex::new(Vec::new())))
        .clone()
}

/// Allocate a free port on localhost.
/// This is required to avoid port collisions when running tests in parallel.
fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
