//! Options controlling the descriptive fields of a cell dictionary

use crate::text::TextOverflow;

/// Category written when none is given
pub const DEFAULT_CATEGORY: &str = "本地";

/// Description written when none is given
pub const DEFAULT_DESCRIPTION: &str = "由 scel-maker 生成的细胞词库";

/// Settings for [`ScelWriter`](crate::writer::ScelWriter)
///
/// # Examples
///
/// ```rust
/// use scel_formats::{ScelOptions, TextOverflow};
///
/// let options = ScelOptions::new("成语")
///     .with_category("文学")
///     .with_overflow(TextOverflow::Reject)
///     .with_timestamp(1_700_000_000);
/// assert_eq!(options.title, "成语");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScelOptions {
    /// Dictionary title, usually the input file stem
    pub title: String,
    /// Category label
    pub category: String,
    /// Description
    pub description: String,
    /// Handling of text longer than its header window
    pub overflow: TextOverflow,
    /// Fixed session id; random when `None`
    pub session_id: Option<String>,
    /// Fixed timestamp; current time when `None`
    pub timestamp: Option<u32>,
}

impl Default for ScelOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            overflow: TextOverflow::default(),
            session_id: None,
            timestamp: None,
        }
    }
}

impl ScelOptions {
    /// Default options with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the category label
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the overflow policy for header text
    pub fn with_overflow(mut self, overflow: TextOverflow) -> Self {
        self.overflow = overflow;
        self
    }

    /// Use a fixed session id
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Use a fixed timestamp
    pub fn with_timestamp(mut self, timestamp: u32) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
