//! Helpers for talking to the server binary over stdio
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::time::{Duration, Instant};

use serde_json::Value;
use tempfile::TempDir;

pub const SERVER_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Session {
    child: Child,
    reader: BufReader<ChildStdout>,
    _settings_dir: TempDir,
}

impl Session {
    pub fn spawn(envs: &[(&str, &str)]) -> Self {
        let bin_path = std::env::var("CARGO_BIN_EXE_weblint-ls")
            .unwrap_or_else(|_| "target/debug/weblint-ls".to_string());

        let dir = tempfile::tempdir().expect("create temp dir");
        let settings = dir.path().join("config.toml");
        std::fs::write(&settings, "").expect("write settings");

        let mut command = Command::new(bin_path);
        command
            .arg("--config")
            .arg(&settings)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        for (key, value) in envs {
            command.env(key, value);
        }

        let mut child = command.spawn().expect("Failed to spawn language server");
        let stdout = child
            .stdout
            .take()
            .expect("Child stdout should be available");

        Self {
            child,
            reader: BufReader::new(stdout),
            _settings_dir: dir,
        }
    }

    pub fn send(&mut self, message: &Value) {
        let body = message.to_string();
        let request = format!("Content-Length: {}\r\n\r\n{}", body.len(), body);

        let stdin = self
            .child
            .stdin
            .as_mut()
            .expect("Child stdin should be available");
        stdin
            .write_all(request.as_bytes())
            .expect("Failed to write request");
        stdin.flush().expect("Failed to flush stdin");
    }

    pub fn request(&mut self, id: i64, method: &str, params: Value) {
        self.send(&serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        }));
    }

    pub fn notify(&mut self, method: &str, params: Value) {
        self.send(&serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
        }));
    }

    pub fn read_message(&mut self) -> Value {
        let content_length = self.read_content_length_header();
        let mut body_bytes = vec![0u8; content_length];
        self.reader
            .read_exact(&mut body_bytes)
            .expect("Failed to read response body");
        let body = String::from_utf8(body_bytes).expect("Response body should be valid UTF-8");

        serde_json::from_str(&body)
            .unwrap_or_else(|e| panic!("Invalid JSON response: {}\nBody: {}", e, body))
    }

    /// Read until a message matches, skipping log notifications and the like
    pub fn read_until(&mut self, matches: impl Fn(&Value) -> bool) -> Value {
        let start_time = Instant::now();
        loop {
            if start_time.elapsed() > SERVER_TIMEOUT {
                panic!("Timeout waiting for expected message");
            }
            let message = self.read_message();
            if matches(&message) {
                return message;
            }
        }
    }

    pub fn read_response(&mut self, id: i64) -> Value {
        self.read_until(|m| m.get("id").and_then(Value::as_i64) == Some(id))
    }

    fn read_content_length_header(&mut self) -> usize {
        let start_time = Instant::now();
        let mut content_length = None;

        loop {
            if start_time.elapsed() > SERVER_TIMEOUT {
                panic!("Timeout waiting for response headers");
            }

            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => panic!("Unexpected EOF while reading headers"),
                Ok(_) => {
                    if line.trim().is_empty() {
                        if content_length.is_some() {
                            break;
                        }
                        continue;
                    }

                    if let Some(length_str) = line.strip_prefix("Content-Length:") {
                        content_length = Some(
                            length_str
                                .trim()
                                .parse::<usize>()
                                .expect("Invalid Content-Length header"),
                        );
                    }
                }
                Err(e) => panic!("Error reading headers: {}", e),
            }
        }

        content_length.expect("Missing Content-Length header")
    }

    pub fn initialize(&mut self) -> Value {
        self.request(
            1,
            "initialize",
            serde_json::json!({
                "processId": null,
                "rootUri": null,
                "capabilities": {},
                "clientInfo": { "name": "test-client", "version": "1.0" }
            }),
        );
        self.read_response(1)
    }

    pub fn shutdown(mut self) {
        drop(self.child.stdin.take());

        let start_time = Instant::now();
        while start_time.elapsed() < Duration::from_secs(2) {
            match self.child.try_wait() {
                Ok(Some(_)) => return,
                Ok(None) => std::thread::sleep(Duration::from_millis(50)),
                Err(e) => panic!("Error checking server status: {}", e),
            }
        }

        eprintln!("Server didn't exit gracefully, forcing termination");
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
