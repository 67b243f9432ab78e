use std::path::PathBuf;

const DATA_DIR: &str = "UPWATCH_DATA_DIR";

const DEFAULT_DATA_DIR: &str = "./.data";

pub fn get_data_dir() -> PathBuf {
    let dir_from_env = std::env::var(DATA_DIR);
    dir_from_env.map_or(PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from)
}

const LOGS_DIR: &str = "UPWATCH_LOGS_DIR";

const DEFAULT_LOGS_DIR: &str = "./.logs";

pub fn get_logs_dir() -> PathBuf {
    let dir_from_env = std::env::var(LOGS_DIR);
    dir_from_env.map_or(PathBuf::from(DEFAULT_LOGS_DIR), PathBuf::from)
}

/// Current wall-clock time as epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
