//! Integration tests for the `example run` command.
use agrisim::cli::RunOpts;
use agrisim::cli::example::handle_example_run_command;
use agrisim::settings::Settings;
use tempfile::tempdir;

/// An integration test for the `example run` command.
#[test]
fn test_handle_example_run_command() {
    unsafe { std::env::set_var("AGRISIM_LOG_LEVEL", "off") };

    let dir = tempdir().unwrap();
    let opts = RunOpts {
        output_dir: Some(dir.path().to_path_buf()),
        overwrite: false,
    };
    handle_example_run_command("crops", &opts, Some(Settings::default())).unwrap();

    let results = std::fs::read_to_string(dir.path().join("results.csv")).unwrap();
    assert!(results.contains("Sugarcane,sugarcane,zaid,"));
}
