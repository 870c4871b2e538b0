/// Defines the directory where the result files are saved
pub const DEFAULT_OUT_DIR: &str = "/tmp/visco/results";

/// Defines an auxiliary directory where the test result files are saved
pub const DEFAULT_TEST_DIR: &str = "/tmp/visco/test";
