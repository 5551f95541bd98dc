//! Gate configuration.
//!
//! Settings that shape the registered schemas (page-size bounds) and the request
//! boundary's reporting behavior. A config is consumed once, when the schema
//! registry is built; nothing reads it per request afterwards.

/// Configuration for the schema registry and request gate.
///
/// # Examples
///
/// ```rust
/// use todo_gate::GateConfig;
///
/// let config = GateConfig::default()
///     .with_max_page_size(50)
///     .with_report_stripped_fields(true);
/// assert_eq!(config.max_page_size, 50);
/// assert_eq!(config.default_page_size, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Largest `limit` the list-query schema accepts.
    pub max_page_size: u32,

    /// `limit` injected when the query string omits it.
    pub default_page_size: u32,

    /// Log a warning listing fields dropped by unknown-field stripping.
    /// Callers never see the dropped fields either way.
    pub report_stripped_fields: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_page_size: 100,
            default_page_size: 10,
            report_stripped_fields: false,
        }
    }
}

impl GateConfig {
    /// Set the maximum page size.
    pub fn with_max_page_size(mut self, max_page_size: u32) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    /// Set the default page size.
    pub fn with_default_page_size(mut self, default_page_size: u32) -> Self {
        self.default_page_size = default_page_size;
        self
    }

    /// Enable or disable warnings for stripped unknown fields.
    pub fn with_report_stripped_fields(mut self, report: bool) -> Self {
        self.report_stripped_fields = report;
        self
    }

    /// Check that the page-size settings are usable together.
    pub(crate) fn page_size_bounds(&self) -> Result<(u32, u32), String> {
        if self.max_page_size == 0 {
            return Err("max_page_size must be at least 1".to_string());
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(format!(
                "default_page_size {} must be within 1..={}",
                self.default_page_size, self.max_page_size
            ));
        }
        Ok((self.default_page_size, self.max_page_size))
    }
}
