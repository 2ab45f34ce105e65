use std::cell::Cell;

/// One progress update: a status message plus a percentage in 0..=100.
/// Updates are append-only and delivered in order; consumers never see the
/// percentage decrease.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportProgress {
    pub message: String,
    pub percent: f64,
}

/// Thin wrapper around the optional progress callback that enforces the
/// monotonic, clamped percentage contract so pipeline steps don't have to.
pub struct ProgressReporter<'a> {
    callback: Option<&'a dyn Fn(&ExportProgress)>,
    last_percent: Cell<f64>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new(callback: Option<&'a dyn Fn(&ExportProgress)>) -> Self {
        Self {
            callback,
            last_percent: Cell::new(0.0),
        }
    }

    pub fn emit<S: Into<String>>(&self, message: S, percent: f64) {
        let percent = percent.clamp(0.0, 100.0).max(self.last_percent.get());
        self.last_percent.set(percent);

        if let Some(callback) = self.callback {
            callback(&ExportProgress {
                message: message.into(),
                percent,
            });
        }
    }
}
