//! エラー報告チャネル
//!
//! すべてのエラーはここに集約される。メッセージを解決してログに出し、
//! 表示層が接続されていればバナーを出す。報告自体は失敗しない。

use crate::error::Error;
use crate::status::{EnvironmentError, PlacesStatus};
use tracing::error;

/// バナーに出す文言（詳細はコンソールへ）
pub const BANNER_TEXT: &str = "An error has occurred. See the browser console for details.";

/// エラーバナーを表示する表示層
pub trait Banner {
    fn show(&self, text: &str);
}

/// 報告対象
#[derive(Debug, Clone, PartialEq)]
pub enum Issue {
    Status(PlacesStatus),
    Environment(EnvironmentError),
    /// ステータスコード文字列または任意のメッセージ
    Message(String),
}

impl Issue {
    pub fn resolve(&self) -> String {
        match self {
            Issue::Status(status) => status.message(),
            Issue::Environment(err) => err.message().to_string(),
            Issue::Message(text) => resolve_code(text),
        }
    }
}

/// 既知のコード文字列はメッセージに変換し、それ以外はそのまま返す
fn resolve_code(text: &str) -> String {
    if let Some(env) = EnvironmentError::from_code(text) {
        return env.message().to_string();
    }
    match PlacesStatus::from_code(text) {
        PlacesStatus::Other(_) => text.to_string(),
        known => known.message(),
    }
}

impl From<PlacesStatus> for Issue {
    fn from(status: PlacesStatus) -> Self {
        Issue::Status(status)
    }
}

impl From<EnvironmentError> for Issue {
    fn from(err: EnvironmentError) -> Self {
        Issue::Environment(err)
    }
}

impl From<&str> for Issue {
    fn from(text: &str) -> Self {
        Issue::Message(text.to_string())
    }
}

impl From<String> for Issue {
    fn from(text: String) -> Self {
        Issue::Message(text)
    }
}

impl From<&Error> for Issue {
    fn from(err: &Error) -> Self {
        match err {
            Error::Request(status) => Issue::Status(status.clone()),
            Error::Environment(env) => Issue::Environment(*env),
            other => Issue::Message(other.to_string()),
        }
    }
}

#[derive(Default)]
pub struct ErrorReporter {
    banner: Option<Box<dyn Banner>>,
}

impl ErrorReporter {
    /// 表示層なし（ログのみ）
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_banner(banner: impl Banner + 'static) -> Self {
        Self {
            banner: Some(Box::new(banner)),
        }
    }

    /// 報告して解決済みメッセージを返す
    pub fn report(&self, issue: impl Into<Issue>) -> String {
        let message = issue.into().resolve();
        error!("{}", message);
        if let Some(banner) = &self.banner {
            banner.show(BANNER_TEXT);
        }
        message
    }
}

impl std::fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorReporter")
            .field("banner", &self.banner.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct CapturedBanner(Rc<RefCell<Vec<String>>>);

    impl Banner for CapturedBanner {
        fn show(&self, text: &str) {
            self.0.borrow_mut().push(text.to_string());
        }
    }

    #[test]
    fn test_status_code_string_resolves() {
        let reporter = ErrorReporter::new();
        assert_eq!(reporter.report("ZERO_RESULTS"), "No nearby cafes detected.");
        assert_eq!(
            reporter.report("PERMISSION_DENIED"),
            "User denied the request for Geolocation."
        );
    }

    #[test]
    fn test_plain_message_passes_through() {
        let reporter = ErrorReporter::new();
        assert_eq!(reporter.report("Something broke"), "Something broke");
    }

    #[test]
    fn test_status_enum() {
        let reporter = ErrorReporter::new();
        assert_eq!(
            reporter.report(PlacesStatus::InvalidRequest),
            "This request was invalid"
        );
    }

    #[test]
    fn test_error_converts_to_issue() {
        let err = Error::Request(PlacesStatus::RequestDenied);
        assert_eq!(
            ErrorReporter::new().report(&err),
            "The webpage is not allowed to use the PlacesService"
        );
        let err = Error::Storage("quota exceeded".into());
        assert_eq!(
            ErrorReporter::new().report(&err),
            "Storage error: quota exceeded"
        );
    }

    #[test]
    fn test_banner_shown_when_attached() {
        let banner = CapturedBanner::default();
        let reporter = ErrorReporter::with_banner(banner.clone());
        let message = reporter.report(EnvironmentError::Offline);
        assert!(message.contains("offline"));
        assert_eq!(banner.0.borrow().as_slice(), &[BANNER_TEXT.to_string()]);
    }
}
