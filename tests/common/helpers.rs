use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use indicatif::ProgressBar;
use reqwest_middleware::ClientWithMiddleware;
use serde_json::json;
use tempfile::TempDir;

use mcprov::acquire::{Acquirer, AcquirerBuilder};
use mcprov::config::{parse_str, ModConfig, ModLoader, Platform};
use mcprov::source::{CurseForgeClient, ModrinthClient};
use mcprov::{ArtifactDescriptor, Error, HttpClientConfig, ModSource};

use super::stub_server::{StubResponse, StubServer};

pub const TEST_GAME_VERSION: &str = "1.21.1";
pub const TEST_API_KEY: &str = "test-api-key";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// Asserts that a file exists with exactly `expected` as content
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let content = fs::read(path).unwrap_or_else(|e| panic!("Cannot read {:?}: {}", path, e));
    assert_eq!(content, expected, "Content mismatch at path: {:?}", path);
}

/// Number of entries in `dir`
pub fn count_files(dir: &Path) -> usize {
    fs::read_dir(dir).expect("Failed to list directory").count()
}

// === Configuration Helpers ===

/// Builds a configuration document from `(platform, slug)` pairs
pub fn config_document(loader: &str, game_version: &str, mods: &[(&str, &str)]) -> String {
    let mods: Vec<_> = mods
        .iter()
        .map(|(platform, slug)| json!({"platform": platform, "slug": slug}))
        .collect();
    json!({
        "mod_loader": loader,
        "minecraft_version": game_version,
        "mods": mods,
    })
    .to_string()
}

/// Parses a configuration built with [`config_document`]
pub fn create_test_config(loader: &str, mods: &[(&str, &str)]) -> ModConfig {
    parse_str(&config_document(loader, TEST_GAME_VERSION, mods))
        .expect("Test configuration should be valid")
}

// === HTTP Helpers ===

/// Client settings for talking to a local stub: no retries, no proxies
pub fn create_test_http_config() -> HttpClientConfig {
    HttpClientConfig {
        retries: 0,
        timeout: Duration::from_secs(10),
        use_system_proxy: false,
        ..HttpClientConfig::default()
    }
}

pub fn create_test_client() -> ClientWithMiddleware {
    mcprov::create_http_client(create_test_http_config()).expect("Failed to build HTTP client")
}

/// An acquirer writing into `dir` with hidden progress bars
pub fn create_test_acquirer(dir: &Path) -> Acquirer {
    test_acquirer_builder(dir).build()
}

pub fn test_acquirer_builder(dir: &Path) -> AcquirerBuilder {
    AcquirerBuilder::hidden()
        .directory(dir.to_path_buf())
        .retries(0)
        .timeout(Duration::from_secs(10))
        .use_system_proxy(false)
}

// === Modrinth Stub Helpers ===

pub fn modrinth_client(server: &StubServer) -> ModrinthClient {
    ModrinthClient::new(create_test_client()).with_base_url(server.base_url())
}

/// A Modrinth version listing with one version holding `files`
pub fn modrinth_versions(slug: &str, files: serde_json::Value) -> String {
    json!([{
        "id": format!("{}-v1", slug),
        "project_id": format!("{}-id", slug),
        "version_number": "1.0.0",
        "game_versions": [TEST_GAME_VERSION],
        "loaders": ["fabric"],
        "date_published": "2024-08-01T00:00:00Z",
        "files": files,
    }])
    .to_string()
}

/// Serve `slug` from the Modrinth stub with one primary file of `payload`
pub fn mount_modrinth_mod(server: &StubServer, slug: &str, filename: &str, payload: &[u8]) {
    server.route(
        &format!("/project/{}", slug),
        StubResponse::json(
            json!({"id": format!("{}-id", slug), "slug": slug, "title": slug}).to_string(),
        ),
    );
    let download_path = format!("/cdn/{}", filename);
    server.route(
        &format!("/project/{}/version", slug),
        StubResponse::json(modrinth_versions(
            slug,
            json!([{"url": server.url(&download_path), "filename": filename, "primary": true}]),
        )),
    );
    server.route(&download_path, StubResponse::bytes(payload.to_vec()));
}

// === CurseForge Stub Helpers ===

pub const TEST_CURSEFORGE_MOD_ID: u64 = 238222;

pub fn curseforge_client(server: &StubServer) -> CurseForgeClient {
    CurseForgeClient::new(create_test_client(), TEST_API_KEY)
        .expect("Test API key is not blank")
        .with_base_url(server.base_url())
}

/// A CurseForge file entry
pub fn curseforge_file(id: u64, date: &str, tags: &[&str]) -> serde_json::Value {
    json!({
        "id": id,
        "fileName": format!("jei-{}.jar", id),
        "fileDate": date,
        "gameVersions": tags,
    })
}

/// Serve a CurseForge mod with `files`, each downloadable from the stub
pub fn mount_curseforge_mod(server: &StubServer, slug: &str, files: Vec<serde_json::Value>) {
    server.route(
        "/mods/search",
        StubResponse::json(
            json!({"data": [{"id": TEST_CURSEFORGE_MOD_ID, "name": slug, "slug": slug}]})
                .to_string(),
        ),
    );
    for file in &files {
        let id = file["id"].as_u64().expect("file id");
        let name = file["fileName"].as_str().expect("file name");
        let download_path = format!("/cdn/{}", name);
        server.route(
            &format!("/mods/{}/files/{}/download-url", TEST_CURSEFORGE_MOD_ID, id),
            StubResponse::json(json!({"data": server.url(&download_path)}).to_string()),
        );
        server.route(&download_path, StubResponse::bytes(name.as_bytes().to_vec()));
    }
    server.route(
        &format!("/mods/{}/files", TEST_CURSEFORGE_MOD_ID),
        StubResponse::json(json!({"data": files}).to_string()),
    );
}

// === In-memory Sources ===

/// A [`ModSource`] serving artifacts from memory.
///
/// Every known slug resolves to `{slug}.jar` unless a file name is set, and
/// fetching writes `payload` followed by the slug.
pub struct MemorySource {
    platform: Platform,
    missing: HashSet<String>,
    broken: HashSet<String>,
    filenames: HashMap<String, String>,
    payload: Vec<u8>,
    resolves: AtomicUsize,
    fetched: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            missing: HashSet::new(),
            broken: HashSet::new(),
            filenames: HashMap::new(),
            payload: b"jar:".to_vec(),
            resolves: AtomicUsize::new(0),
            fetched: Mutex::new(Vec::new()),
        }
    }

    /// Resolution of `slug` fails with not found.
    pub fn missing(mut self, slug: &str) -> Self {
        self.missing.insert(slug.to_string());
        self
    }

    /// Fetching `slug` fails with an I/O error.
    pub fn broken(mut self, slug: &str) -> Self {
        self.broken.insert(slug.to_string());
        self
    }

    pub fn filename(mut self, slug: &str, filename: &str) -> Self {
        self.filenames.insert(slug.to_string(), filename.to_string());
        self
    }

    pub fn resolve_count(&self) -> usize {
        self.resolves.load(Ordering::SeqCst)
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn content_for(&self, slug: &str) -> Vec<u8> {
        let mut content = self.payload.clone();
        content.extend_from_slice(slug.as_bytes());
        content
    }
}

#[async_trait]
impl ModSource for MemorySource {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn resolve(
        &self,
        slug: &str,
        game_version: &str,
        loader: ModLoader,
    ) -> mcprov::Result<ArtifactDescriptor> {
        self.resolves.fetch_add(1, Ordering::SeqCst);
        if self.missing.contains(slug) {
            return Err(Error::not_found(slug, "no compatible version"));
        }
        Ok(ArtifactDescriptor {
            platform: self.platform,
            slug: slug.to_string(),
            project_id: format!("{}-id", slug),
            file_id: "1".to_string(),
            filename: self
                .filenames
                .get(slug)
                .cloned()
                .unwrap_or_else(|| format!("{}.jar", slug)),
            url: format!("memory://{}", slug),
            game_versions: vec![game_version.to_string()],
            loaders: vec![loader.to_string()],
            published: "2024-01-01".to_string(),
        })
    }

    async fn fetch(
        &self,
        artifact: &ArtifactDescriptor,
        output_dir: &Path,
        progress: &ProgressBar,
    ) -> mcprov::Result<PathBuf> {
        if self.broken.contains(&artifact.slug) {
            return Err(Error::from(std::io::Error::new(
                std::io::ErrorKind::Other,
                "connection reset",
            )));
        }
        let destination = artifact.destination(output_dir);
        let content = self.content_for(&artifact.slug);
        progress.set_length(content.len() as u64);
        tokio::fs::write(&destination, &content).await?;
        progress.inc(content.len() as u64);
        self.fetched.lock().unwrap().push(artifact.slug.clone());
        Ok(destination)
    }
}

pub fn shared(source: MemorySource) -> Arc<MemorySource> {
    Arc::new(source)
}
