//! Application constants
//!
//! Centralized location for endpoints, retry policy and host labels.

use std::time::Duration;

/// Default backend the catalog and the submission endpoint live on
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Catalog read endpoint, relative to the base URL
pub const LOTS_PATH: &str = "/api/lots";

/// Submission endpoint, relative to the base URL
pub const ACTION_PATH: &str = "/api/miniapp-action";

/// Catalog fetch attempts per load
pub const MAX_LOAD_ATTEMPTS: u32 = 3;

/// Pause between two catalog fetch attempts
pub const LOAD_RETRY_BACKOFF: Duration = Duration::from_millis(1000);

/// Delay between dispatching a submission and asking the host to close
pub const CLOSE_DELAY: Duration = Duration::from_millis(100);

/// Timeout for a single catalog read (submission dispatch has none)
pub const CATALOG_TIMEOUT_SECS: u64 = 30;

/// Main button label while a unit is selected
pub const LABEL_CONFIRM: &str = "✓ В работу";

/// Main button label while the submission is in flight
pub const LABEL_SENDING: &str = "⏳ Отправка...";

/// Default log file, written next to the working directory
pub const DEFAULT_LOG_FILE: &str = "lotpick.log";

/// Application name
pub const APP_NAME: &str = "RIZALTA";
