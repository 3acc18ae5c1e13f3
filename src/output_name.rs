use chrono::Utc;

pub const DEFAULT_PREFIX: &str = "duotone";
const FILE_EXTENSION: &str = "png";

/// Timestamp-based names for the PNG files of one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputName {
    prefix: String,
    timestamp_millis: i64,
}

impl OutputName {
    pub fn new(prefix: &str) -> Self {
        Self::with_timestamp(prefix, Utc::now().timestamp_millis())
    }

    pub fn with_timestamp(prefix: &str, timestamp_millis: i64) -> Self {
        Self {
            prefix: prefix.to_owned(),
            timestamp_millis,
        }
    }

    /// `index` distinguishes the files of a batch; a lone output has none.
    pub fn file_name(&self, index: Option<usize>) -> String {
        match index {
            Some(index) => format!(
                "{}-{}-{}.{}",
                self.prefix, self.timestamp_millis, index, FILE_EXTENSION
            ),
            None => format!(
                "{}-{}.{}",
                self.prefix, self.timestamp_millis, FILE_EXTENSION
            ),
        }
    }
}

impl Default for OutputName {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

#[cfg(test)]
mod test {
    use super::OutputName;

    #[test]
    fn single_file_name() {
        let name = OutputName::with_timestamp("duotone", 1_700_000_000_123);
        assert_eq!(name.file_name(None), "duotone-1700000000123.png");
    }

    #[test]
    fn batch_file_names_are_distinct() {
        let name = OutputName::with_timestamp("brave", 42);
        assert_eq!(name.file_name(Some(1)), "brave-42-1.png");
        assert_eq!(name.file_name(Some(2)), "brave-42-2.png");
    }

    #[test]
    fn browser_download_name_via_prefix() {
        let name = OutputName::with_timestamp("BRAVE", 1_700_000_000_123);
        assert_eq!(name.file_name(None), "BRAVE-1700000000123.png");
    }

    #[test]
    fn timestamp_is_current() {
        let before = chrono::Utc::now().timestamp_millis();
        let name = OutputName::default();
        let after = chrono::Utc::now().timestamp_millis();
        assert!(name.timestamp_millis >= before && name.timestamp_millis <= after);
        assert!(name.file_name(None).starts_with("duotone-"));
    }
}
