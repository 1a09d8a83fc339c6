/// Default name of the function run as soon as it is declared.
pub const DEFAULT_ENTRY_POINT: &str = "main";

/// Default limit on nested user function calls.
///
/// Sized so that a full-depth recursion fits on a 2 MiB thread stack.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 200;

/// Settings for a single run of the interpreter.
///
/// # Example
/// ```
/// use declang::config::Config;
///
/// let config = Config { max_call_depth: 64,
///                       ..Config::default() };
/// assert_eq!(config.entry_point, "main");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Function invoked with no arguments when its declaration is reached.
    pub entry_point:    String,
    /// Maximum number of simultaneously active user function calls.
    pub max_call_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { entry_point:    DEFAULT_ENTRY_POINT.to_string(),
               max_call_depth: DEFAULT_MAX_CALL_DEPTH, }
    }
}
