//! Temporary config files for tests that go through `Config::load`.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// A unique path in the temp dir with the given prefix and extension.
pub fn temp_path(prefix: &str, extension: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!("draftwise-{prefix}-{nanos}-{n}.{extension}"))
}

pub fn write_temp_config(contents: &str) -> PathBuf {
    let path = temp_path("config", "toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

/// Smallest valid configuration, caching to `cache_path`.
pub fn minimal_config(cache_path: &std::path::Path) -> String {
    format!(
        "[league]\nid = 42\n\n[cache]\npath = {:?}\n\n[logging]\nlevel = \"warn\"\n",
        cache_path.display().to_string()
    )
}
