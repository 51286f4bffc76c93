#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use deployhook_core::guard::DEPLOY_TOKEN_HEADER;
use deployhook_extractor::config::ExtractorConfig;
use deployhook_extractor::router::build_app_router;
use deployhook_extractor::state::AppState;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;
use zip::write::SimpleFileOptions;

pub const TEST_TOKEN: &str = "test-deploy-token";

/// A throwaway deploy root: `.env`, `api/vendor.zip` and the `api/` target.
pub struct Fixture {
    pub root: TempDir,
}

impl Fixture {
    /// Empty root: no env file, no archive, no target directory.
    pub fn empty() -> Self {
        Self {
            root: tempfile::tempdir().expect("tempdir"),
        }
    }

    /// Root with an env file holding [`TEST_TOKEN`] and a small vendor archive.
    pub fn ready() -> Self {
        let fixture = Self::empty();
        fixture.write_env(&format!("APP_ENV=production\nDEPLOY_TOKEN={TEST_TOKEN}\n"));
        fixture.write_archive(&[
            (
                "vendor/autoload.php",
                b"<?php require 'composer/autoload_real.php';".as_slice(),
            ),
            (
                "vendor/composer/autoload_real.php",
                b"<?php // generated".as_slice(),
            ),
        ]);
        fixture
    }

    pub fn env_path(&self) -> PathBuf {
        self.root.path().join(".env")
    }

    pub fn archive_path(&self) -> PathBuf {
        self.root.path().join("upload").join("vendor.zip")
    }

    pub fn target_dir(&self) -> PathBuf {
        self.root.path().join("api")
    }

    pub fn write_env(&self, contents: &str) {
        fs::write(self.env_path(), contents).expect("write env");
    }

    pub fn write_archive(&self, entries: &[(&str, &[u8])]) {
        let path = self.archive_path();
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir upload");
        write_zip(&path, entries);
    }

    pub fn config(&self, overwrite: bool) -> ExtractorConfig {
        ExtractorConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            env_file: self.env_path(),
            archive_path: self.archive_path(),
            extract_dir: self.target_dir(),
            overwrite,
        }
    }

    pub fn app(&self) -> Router {
        build_app_router(self.state(true))
    }

    pub fn state(&self, overwrite: bool) -> AppState {
        AppState::new(self.config(overwrite))
    }
}

pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).expect("create zip");
    let mut zip = zip::ZipWriter::new(file);
    for (name, contents) in entries {
        zip.start_file(*name, SimpleFileOptions::default())
            .expect("start file");
        zip.write_all(contents).expect("write entry");
    }
    zip.finish().expect("finish zip");
}

pub async fn send(app: Router, method: Method, uri: &str, token: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(DEPLOY_TOKEN_HEADER, token);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
