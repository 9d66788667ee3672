use report_core::ReportTranslator;

/// Shared state handed to every request handler.
///
/// Read-only: the translator holds its config and transport behind `Arc`s,
/// so cloning per request is cheap and nothing needs a lock.
#[derive(Clone)]
pub struct AppState {
    translator: ReportTranslator,
}

impl AppState {
    pub fn new(translator: ReportTranslator) -> Self {
        Self { translator }
    }

    pub fn translator(&self) -> &ReportTranslator {
        &self.translator
    }
}
