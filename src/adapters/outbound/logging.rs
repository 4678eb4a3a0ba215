use crate::domains::logger::{DomainLogger, DynLogger, FileLogger};
use std::sync::Arc;

struct ConsoleLogger;

impl DomainLogger for ConsoleLogger {
    fn info(&self, msg: &str) { println!("{}", msg); }
    fn warn(&self, msg: &str) { println!("WARN: {}", msg); }
    fn error(&self, msg: &str) { eprintln!("ERROR: {}", msg); }
}

struct NoOp;

impl DomainLogger for NoOp {
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

/// Forwards every notice to a primary and an optional secondary logger.
pub struct MultiLogger {
    primary: DynLogger,
    secondary: Option<DynLogger>,
}

impl MultiLogger {
    pub fn new(primary: DynLogger, secondary: Option<DynLogger>) -> Self {
        Self { primary, secondary }
    }

    fn each(&self, f: impl Fn(&dyn DomainLogger)) {
        f(self.primary.as_ref());
        if let Some(sec) = &self.secondary {
            f(sec.as_ref());
        }
    }
}

impl DomainLogger for MultiLogger {
    fn info(&self, msg: &str) { self.each(|l| l.info(msg)); }
    fn warn(&self, msg: &str) { self.each(|l| l.warn(msg)); }
    fn error(&self, msg: &str) { self.each(|l| l.error(msg)); }
}

pub fn init_console_logger() -> DynLogger {
    Arc::new(ConsoleLogger)
}

/// Silent logger for tests and library callers that only want files.
pub fn init_noop_logger() -> DynLogger {
    Arc::new(NoOp)
}

pub fn init_file_logger(path: &str) -> Result<DynLogger, String> {
    FileLogger::init(path).map_err(|e| format!("Failed to initialize fast_log: {}", e))?;
    Ok(Arc::new(FileLogger))
}

/// Console logger, plus a file sink when `path` is given and usable.
pub fn init_logger(path: Option<&str>) -> DynLogger {
    let console = init_console_logger();
    match path.map(init_file_logger) {
        Some(Ok(file)) => Arc::new(MultiLogger::new(file, Some(console))),
        Some(Err(e)) => {
            console.warn(&e);
            console
        }
        None => console,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Capture(Mutex<Vec<String>>);

    impl DomainLogger for Capture {
        fn info(&self, msg: &str) { self.0.lock().unwrap().push(format!("INFO:{}", msg)); }
        fn warn(&self, msg: &str) { self.0.lock().unwrap().push(format!("WARN:{}", msg)); }
        fn error(&self, msg: &str) { self.0.lock().unwrap().push(format!("ERR:{}", msg)); }
    }

    #[test]
    fn multi_logger_reaches_both_sinks() {
        let a = Arc::new(Capture(Mutex::new(Vec::new())));
        let b = Arc::new(Capture(Mutex::new(Vec::new())));
        let multi = MultiLogger::new(a.clone(), Some(b.clone() as DynLogger));
        multi.warn("w");
        multi.figure_saved(std::path::Path::new("out/x.png"));
        assert_eq!(a.0.lock().unwrap().len(), 2);
        let seen = b.0.lock().unwrap();
        assert_eq!(seen[0], "WARN:w");
        assert!(seen[1].contains("out/x.png"));
    }
}
