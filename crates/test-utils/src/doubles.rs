use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use nodehook::connector::{NodeConnector, NodeSession};
use nodehook::errors::Result;
use nodehook::launch::{CommandLauncher, ManagementContext};
use nodehook::sink::{LogSink, SharedSink};
use nodehook::types::ExecutionOutcome;

/// Shared, ordered record of everything the doubles were asked to do.
///
/// Entries look like `connect:agent-1`, `disconnect:agent-1`,
/// `run:teardown.sh`, so tests can assert both call counts and relative
/// ordering across connector and launcher.
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn journal_entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

/// Sink that collects lines in order for assertions.
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Mutex<Vec<String>>,
}

impl BufferSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.snapshot().iter().any(|l| l.contains(needle))
    }

    /// Index of the first line containing `needle`, for order assertions.
    pub fn index_of(&self, needle: &str) -> Option<usize> {
        self.snapshot().iter().position(|l| l.contains(needle))
    }
}

impl LogSink for BufferSink {
    fn line(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

/// A connector that records calls into the journal and returns scripted
/// results, without touching any real node.
pub struct SpyConnector {
    journal: Journal,
    connect_error: Option<String>,
    supported: bool,
}

impl SpyConnector {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            connect_error: None,
            supported: true,
        }
    }

    /// Make `connect` fail with the given message.
    pub fn failing_connect(journal: Journal, message: &str) -> Self {
        Self {
            journal,
            connect_error: Some(message.to_string()),
            supported: true,
        }
    }

    pub fn unsupported(journal: Journal) -> Self {
        Self {
            journal,
            connect_error: None,
            supported: false,
        }
    }

    pub fn connect_calls(journal: &Journal) -> usize {
        journal_entries(journal)
            .iter()
            .filter(|e| e.starts_with("connect:"))
            .count()
    }

    pub fn disconnect_calls(journal: &Journal) -> usize {
        journal_entries(journal)
            .iter()
            .filter(|e| e.starts_with("disconnect:"))
            .count()
    }
}

impl NodeConnector for SpyConnector {
    fn connect<'a>(
        &'a self,
        session: &'a NodeSession,
        _sink: SharedSink,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.journal
                .lock()
                .unwrap()
                .push(format!("connect:{}", session.name));
            match &self.connect_error {
                Some(msg) => Err(anyhow::anyhow!("{msg}").into()),
                None => Ok(()),
            }
        })
    }

    fn disconnect<'a>(
        &'a self,
        session: &'a NodeSession,
        _sink: SharedSink,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            self.journal
                .lock()
                .unwrap()
                .push(format!("disconnect:{}", session.name));
        })
    }

    fn is_supported(&self) -> bool {
        self.supported
    }
}

/// Launcher that records commands and returns scripted outcomes instead
/// of spawning processes.
///
/// Unconfigured commands succeed with exit code 0 and no output.
pub struct FakeLauncher {
    journal: Journal,
    exit_codes: HashMap<String, i32>,
    spawn_errors: HashMap<String, String>,
    output: HashMap<String, Vec<String>>,
}

impl FakeLauncher {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            exit_codes: HashMap::new(),
            spawn_errors: HashMap::new(),
            output: HashMap::new(),
        }
    }

    pub fn exit_code(mut self, cmd: &str, code: i32) -> Self {
        self.exit_codes.insert(cmd.to_string(), code);
        self
    }

    pub fn spawn_error(mut self, cmd: &str, message: &str) -> Self {
        self.spawn_errors.insert(cmd.to_string(), message.to_string());
        self
    }

    pub fn output_line(mut self, cmd: &str, line: &str) -> Self {
        self.output
            .entry(cmd.to_string())
            .or_default()
            .push(line.to_string());
        self
    }
}

impl CommandLauncher for FakeLauncher {
    fn run<'a>(
        &'a self,
        command: &'a str,
        sink: SharedSink,
    ) -> Pin<Box<dyn Future<Output = io::Result<ExecutionOutcome>> + Send + 'a>> {
        Box::pin(async move {
            self.journal.lock().unwrap().push(format!("run:{command}"));

            if let Some(msg) = self.spawn_errors.get(command) {
                return Err(io::Error::other(msg.clone()));
            }

            if let Some(lines) = self.output.get(command) {
                for line in lines {
                    sink.line(line);
                }
            }

            let code = self.exit_codes.get(command).copied().unwrap_or(0);
            Ok(ExecutionOutcome::from_code(code))
        })
    }
}

/// Management context handing out a fixed fake launcher.
pub struct FakeContext {
    launcher: Arc<FakeLauncher>,
}

impl FakeContext {
    pub fn new(launcher: FakeLauncher) -> Arc<Self> {
        Arc::new(Self {
            launcher: Arc::new(launcher),
        })
    }
}

impl ManagementContext for FakeContext {
    fn launcher(&self) -> Option<Arc<dyn CommandLauncher>> {
        Some(Arc::clone(&self.launcher) as Arc<dyn CommandLauncher>)
    }
}

/// Management context that never provides a launcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableContext;

impl ManagementContext for UnavailableContext {
    fn launcher(&self) -> Option<Arc<dyn CommandLauncher>> {
        None
    }
}
