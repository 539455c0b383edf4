use std::fmt;
use std::sync::Arc;

use log::{error, info, warn};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::arguments::{BannerFn, EngineArguments, PrintFn};

/// Log target used by the default sinks.
pub const LOG_TARGET: &str = "engine";

/// Severity attached to a banner notice. A banner without a type is a plain
/// informational notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerType {
    Error,
    Warning,
}

impl BannerType {
    pub const fn as_str(self) -> &'static str {
        match self {
            BannerType::Error => "error",
            BannerType::Warning => "warning",
        }
    }
}

/// The three message channels an engine instance reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageChannel {
    Info,
    Banner(Option<BannerType>),
    Error,
}

impl fmt::Display for MessageChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageChannel::Info => f.write_str("info"),
            MessageChannel::Banner(None) => f.write_str("banner"),
            MessageChannel::Banner(Some(kind)) => write!(f, "banner:{}", kind.as_str()),
            MessageChannel::Error => f.write_str("error"),
        }
    }
}

/// Default `print` sink.
pub fn log_print() -> PrintFn {
    Arc::new(|message: &str| info!(target: LOG_TARGET, "{message}"))
}

/// Default `printErr` sink.
pub fn log_print_err() -> PrintFn {
    Arc::new(|message: &str| error!(target: LOG_TARGET, "{message}"))
}

/// Default `showBanner` sink; the log level follows the banner type.
pub fn log_banner() -> BannerFn {
    Arc::new(|message: &str, kind: Option<BannerType>| match kind {
        Some(BannerType::Error) => error!(target: LOG_TARGET, "[banner] {message}"),
        Some(BannerType::Warning) => warn!(target: LOG_TARGET, "[banner] {message}"),
        None => info!(target: LOG_TARGET, "[banner] {message}"),
    })
}

/// Message captured by a [`MessageRecorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMessage {
    pub channel: MessageChannel,
    pub message: String,
}

/// Shared in-memory sink that records every message in arrival order.
#[derive(Debug, Default, Clone)]
pub struct MessageRecorder {
    messages: Arc<RwLock<Vec<RecordedMessage>>>,
}

impl MessageRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, channel: MessageChannel, message: &str) {
        self.messages.write().push(RecordedMessage {
            channel,
            message: message.to_string(),
        });
    }

    /// Returns a snapshot of the recorded messages.
    pub fn messages(&self) -> Vec<RecordedMessage> {
        self.messages.read().clone()
    }

    /// Returns the recorded messages of one channel.
    pub fn on_channel(&self, channel: MessageChannel) -> Vec<String> {
        self.messages
            .read()
            .iter()
            .filter(|recorded| recorded.channel == channel)
            .map(|recorded| recorded.message.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.messages.write().clear();
    }

    pub fn print_sink(&self) -> PrintFn {
        let recorder = self.clone();
        Arc::new(move |message: &str| recorder.record(MessageChannel::Info, message))
    }

    pub fn print_err_sink(&self) -> PrintFn {
        let recorder = self.clone();
        Arc::new(move |message: &str| recorder.record(MessageChannel::Error, message))
    }

    pub fn banner_sink(&self) -> BannerFn {
        let recorder = self.clone();
        Arc::new(move |message: &str, kind: Option<BannerType>| {
            recorder.record(MessageChannel::Banner(kind), message)
        })
    }

    /// Returns `arguments` with all three sinks routed into this recorder.
    pub fn install(&self, arguments: EngineArguments) -> EngineArguments {
        EngineArguments {
            print: Some(self.print_sink()),
            print_err: Some(self.print_err_sink()),
            show_banner: Some(self.banner_sink()),
            ..arguments
        }
    }
}

/// Process-wide `log` backend for tests that assert on what the default
/// sinks emit. Messages are matched by content since tests share the logger.
#[cfg(test)]
pub(crate) mod captured_log {
    use std::sync::Once;

    use log::{Level, LevelFilter, Log, Metadata, Record};
    use parking_lot::Mutex;

    struct CapturingLogger;

    static RECORDS: Mutex<Vec<(Level, String, String)>> = parking_lot::const_mutex(Vec::new());
    static LOGGER: CapturingLogger = CapturingLogger;
    static INSTALL: Once = Once::new();

    impl Log for CapturingLogger {
        fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &Record<'_>) {
            RECORDS.lock().push((
                record.level(),
                record.target().to_string(),
                record.args().to_string(),
            ));
        }

        fn flush(&self) {}
    }

    pub(crate) fn install() {
        INSTALL.call_once(|| {
            log::set_logger(&LOGGER).expect("no other logger in unit tests");
            log::set_max_level(LevelFilter::Trace);
        });
    }

    /// Level and target of the first record whose text is `message`.
    pub(crate) fn find(message: &str) -> Option<(Level, String)> {
        RECORDS
            .lock()
            .iter()
            .find(|(_, _, text)| text == message)
            .map(|(level, target, _)| (*level, target.clone()))
    }
}
