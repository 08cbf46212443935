//! Writer configuration.

/// Default number of value characters after which a data line is wrapped.
pub const DEFAULT_WRAP_WIDTH: usize = 64;

/// Line terminator written by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineEnding {
    /// `\r\n`
    #[default]
    CrLf,
    /// `\n`
    Lf,
}

impl LineEnding {
    /// The terminator characters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CrLf => "\r\n",
            Self::Lf => "\n",
        }
    }
}

/// Options controlling the text layout produced by the encoder.
///
/// Layout options never change the decoded result: any wrap width and
/// either line ending decode to the same mesh.
///
/// # Example
///
/// ```
/// use gfx_core::text_mesh::{EncodeOptions, LineEnding};
///
/// let options = EncodeOptions::default()
///     .with_wrap_width(32)
///     .with_line_ending(LineEnding::Lf);
/// assert_eq!(options.wrap_width, 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// A data line is ended once its value characters exceed this count.
    ///
    /// The line always holds at least one vertex or triangle. `0` puts
    /// every vertex and triangle on its own line.
    pub wrap_width: usize,
    /// Line terminator.
    pub line_ending: LineEnding,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
            line_ending: LineEnding::CrLf,
        }
    }
}

impl EncodeOptions {
    /// Set the wrap width.
    pub fn with_wrap_width(mut self, wrap_width: usize) -> Self {
        self.wrap_width = wrap_width;
        self
    }

    /// Set the line terminator.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}
