use dyncomp::cli::LogLevel;
use dyncomp::logging::select_level;
use tracing::Level;

#[test]
fn defaults_to_warn() {
    assert_eq!(select_level(None, None), Level::WARN);
}

#[test]
fn flag_beats_environment() {
    assert_eq!(select_level(Some(LogLevel::Trace), Some("error")), Level::TRACE);
}

#[test]
fn environment_is_case_insensitive() {
    assert_eq!(select_level(None, Some(" Debug ")), Level::DEBUG);
}

#[test]
fn unknown_environment_value_is_ignored() {
    assert_eq!(select_level(None, Some("chatty")), Level::WARN);
}
