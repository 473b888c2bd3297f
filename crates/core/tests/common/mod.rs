#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use review_watch_core::{CycleError, Notifier, NotifyError, StatusSource};
use serde_json::Value;

/// Replays scripted responses and records every `from_date` it was asked for.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    inner: Arc<Mutex<SourceInner>>,
}

#[derive(Default)]
struct SourceInner {
    script: VecDeque<Result<Value, CycleError>>,
    fallback: Option<Result<Value, CycleError>>,
    calls: Vec<i64>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<Value, CycleError>>) -> Self {
        let s = Self::default();
        s.inner.lock().unwrap().script = script.into();
        s
    }

    /// Answers every call with the same result.
    pub fn always(result: Result<Value, CycleError>) -> Self {
        let s = Self::default();
        s.inner.lock().unwrap().fallback = Some(result);
        s
    }

    pub fn calls(&self) -> Vec<i64> {
        self.inner.lock().unwrap().calls.clone()
    }
}

#[async_trait]
impl StatusSource for ScriptedSource {
    async fn fetch(&self, from_date: i64) -> Result<Value, CycleError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(from_date);
        if let Some(next) = inner.script.pop_front() {
            return next;
        }
        inner
            .fallback
            .clone()
            .unwrap_or_else(|| Err(CycleError::FetchError("script exhausted".into())))
    }
}

/// Collects sent messages; can be told to fail every delivery.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<String>>>,
    attempts: Arc<Mutex<usize>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        *self.attempts.lock().unwrap() += 1;
        if self.fail {
            return Err(NotifyError("bot was blocked by the user".into()));
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn recipient(&self) -> String {
        "test-chat".into()
    }
}

pub fn homework(name: &str, status: &str, current_date: i64) -> Value {
    serde_json::json!({
        "homeworks": [{"homework_name": name, "status": status}],
        "current_date": current_date,
    })
}
