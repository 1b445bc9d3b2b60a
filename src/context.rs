//! Process-wide application context.
//!
//! External collaborators (page-info resolution, notification delivery)
//! are consumed behind narrow traits and wired into one context object,
//! constructed at startup and passed explicitly to the controller. There
//! is no global mutable state.

use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::error::OpenError;
use crate::io::PdfSource;
use crate::shelf::Thumbnail;

/// What a resolver learned about an added file.
#[derive(Debug, Clone, Default)]
pub struct ResolvedPageInfo {
    /// Number of pages in the document.
    pub page_count: usize,
    /// Optional thumbnail supplied by the collaborator.
    pub thumbnail: Option<Arc<Thumbnail>>,
}

/// Collaborator that resolves page counts and thumbnails for added
/// files.
///
/// Called once per added file, off the interactive context.
pub trait PageInfoResolver: Send + Sync {
    /// Resolve page info for `path`.
    fn resolve(&self, path: &Path) -> Result<ResolvedPageInfo, OpenError>;
}

/// Collaborator that delivers user-facing notifications.
///
/// Fire-and-forget; no return value is consumed.
pub trait NotificationSink: Send + Sync {
    /// Deliver a notification.
    fn notify(&self, title: &str, body: &str);
}

/// Default resolver: reads the page count through [`PdfSource`] and
/// supplies no thumbnail.
#[derive(Debug, Default)]
pub struct PdfSourceResolver;

impl PageInfoResolver for PdfSourceResolver {
    fn resolve(&self, path: &Path) -> Result<ResolvedPageInfo, OpenError> {
        let page_count = PdfSource::page_count_of(path)?;
        Ok(ResolvedPageInfo {
            page_count,
            thumbnail: None,
        })
    }
}

/// Default sink: forwards notifications to the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, title: &str, body: &str) {
        info!(title, body, "notification");
    }
}

/// The collaborators a controller needs, wired once at startup.
#[derive(Clone)]
pub struct AppContext {
    resolver: Arc<dyn PageInfoResolver>,
    notifier: Arc<dyn NotificationSink>,
}

impl AppContext {
    /// Build a context from explicit collaborators.
    pub fn new(resolver: Arc<dyn PageInfoResolver>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self { resolver, notifier }
    }

    /// Build a context with the default collaborators.
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(PdfSourceResolver), Arc::new(LogNotifier))
    }

    /// The page-info resolver.
    pub fn resolver(&self) -> &Arc<dyn PageInfoResolver> {
        &self.resolver
    }

    /// The notification sink.
    pub fn notifier(&self) -> &Arc<dyn NotificationSink> {
        &self.notifier
    }
}
