/// Configuration options for the JSON streaming parser.
///
/// The two limits are the parser's defense against resource exhaustion from
/// untrusted input: exceeding either one fails the session with
/// [`ParseErrorKind::TooManyCharacters`] or
/// [`ParseErrorKind::TooManyNestedContainers`] respectively.
///
/// [`ParseErrorKind::TooManyCharacters`]: crate::ParseErrorKind::TooManyCharacters
/// [`ParseErrorKind::TooManyNestedContainers`]: crate::ParseErrorKind::TooManyNestedContainers
///
/// # Examples
///
/// ```rust
/// use jsonflume::ParserOptions;
///
/// let options = ParserOptions {
///     max_depth: 32,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserOptions {
    /// Maximum size in bytes of a single string or number token.
    ///
    /// The limit applies to the decoded token content, including object keys.
    ///
    /// # Default
    ///
    /// 10,000,000
    pub max_token_size: usize,

    /// Maximum combined nesting depth of objects and arrays.
    ///
    /// # Default
    ///
    /// 1024
    pub max_depth: usize,

    #[cfg(any(test, feature = "fuzzing"))]
    #[cfg_attr(feature = "serde", serde(skip))]
    /// Panic on syntax errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on parse failures.
    pub panic_on_error: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_token_size: 10_000_000,
            max_depth: 1024,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: false,
        }
    }
}
