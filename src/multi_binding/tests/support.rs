//! Shared fixtures for multi-binding unit tests.

use std::sync::Arc;

/// Logging capability exercised by the unit tests.
pub trait Logger: Send + Sync {
    /// Identifies the implementation for assertions.
    fn name(&self) -> &'static str;
}

/// File-backed logger.
#[derive(Debug)]
pub struct FileLogger;

impl Logger for FileLogger {
    fn name(&self) -> &'static str {
        "file"
    }
}

/// Console logger.
#[derive(Debug)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn name(&self) -> &'static str {
        "console"
    }
}

/// Syslog logger.
#[derive(Debug)]
pub struct SyslogLogger;

impl Logger for SyslogLogger {
    fn name(&self) -> &'static str {
        "syslog"
    }
}

/// Second capability used for independence checks.
pub trait Metrics: Send + Sync {
    /// Identifies the implementation for assertions.
    fn kind(&self) -> &'static str;
}

/// Statsd-flavoured metrics sink.
#[derive(Debug)]
pub struct StatsdMetrics;

impl Metrics for StatsdMetrics {
    fn kind(&self) -> &'static str {
        "statsd"
    }
}

/// Names of resolved logger instances, in order.
pub fn names(loggers: &[Arc<dyn Logger>]) -> Vec<&'static str> {
    loggers.iter().map(|logger| logger.name()).collect()
}
