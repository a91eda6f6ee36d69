//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use plist::{Dictionary, Value};
use read_later::browser::UrlOpener;
use read_later::config::{ReadLaterConfig, ScheduleConfig};
use read_later::error::ApiError;
use read_later::launchd::{LaunchAgent, Launchctl};
use read_later::tooling::cli::CliContext;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;
use tempfile::TempDir;

pub fn date(at: DateTime<Utc>) -> Value {
    Value::Date(plist::Date::from(SystemTime::from(at)))
}

pub fn dict(pairs: Vec<(&str, Value)>) -> Value {
    let mut map = Dictionary::new();
    for (key, value) in pairs {
        map.insert(key.to_string(), value);
    }
    Value::Dictionary(map)
}

pub fn entry(url: &str, age: Duration) -> Value {
    dict(vec![
        ("URLString", Value::String(url.to_string())),
        ("DateAdded", date(Utc::now() - age)),
    ])
}

/// Container with `ReadingList` marker and the given children.
pub fn container(children: Vec<Value>) -> Value {
    dict(vec![
        ("ReadingList", dict(vec![])),
        ("Children", Value::Array(children)),
    ])
}

/// Wrap `inner` under `depth` levels of `Children` arrays.
pub fn nest(inner: Value, depth: usize) -> Value {
    (0..depth).fold(inner, |node, level| {
        dict(vec![
            ("Title", Value::String(format!("Folder {}", level))),
            ("Children", Value::Array(vec![node])),
        ])
    })
}

pub fn write_binary(dir: &Path, root: &Value) -> PathBuf {
    let path = dir.join("Bookmarks.plist");
    root.to_file_binary(&path).unwrap();
    path
}

pub fn write_xml(dir: &Path, root: &Value) -> PathBuf {
    let path = dir.join("Bookmarks.plist");
    root.to_file_xml(&path).unwrap();
    path
}

#[derive(Clone, Default)]
pub struct RecordingOpener {
    pub opened: Arc<Mutex<Vec<String>>>,
}

impl UrlOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<(), ApiError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingLaunchctl {
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl Launchctl for RecordingLaunchctl {
    fn load(&self, _plist: &Path) -> Result<(), String> {
        self.calls.lock().unwrap().push("load".to_string());
        Ok(())
    }

    fn unload(&self, _plist: &Path) -> Result<(), String> {
        self.calls.lock().unwrap().push("unload".to_string());
        Ok(())
    }
}

/// Everything a CLI test needs, rooted in one temp directory.
pub struct TestEnv {
    pub temp: TempDir,
    pub opener: RecordingOpener,
    pub launchctl: RecordingLaunchctl,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
            opener: RecordingOpener::default(),
            launchctl: RecordingLaunchctl::default(),
        }
    }

    pub fn data_file(&self) -> PathBuf {
        self.temp.path().join("read-later-today.json")
    }

    pub fn agents_dir(&self) -> PathBuf {
        self.temp.path().join("LaunchAgents")
    }

    pub fn config(&self, bookmarks: Option<PathBuf>) -> ReadLaterConfig {
        let mut config = ReadLaterConfig::default();
        config.storage.data_file = Some(self.data_file());
        config.safari.bookmarks_path = bookmarks;
        config.schedule.launch_agents_dir = Some(self.agents_dir());
        config
    }

    pub fn context(&self, bookmarks: Option<PathBuf>) -> CliContext {
        let agent = LaunchAgent::new(
            &self.agents_dir(),
            PathBuf::from("/usr/local/bin/read-later"),
            ScheduleConfig::default(),
            Box::new(self.launchctl.clone()),
        );
        CliContext::new(self.config(bookmarks))
            .unwrap()
            .with_opener(Box::new(self.opener.clone()))
            .with_launch_agent(agent)
    }
}
