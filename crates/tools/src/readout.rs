use std::collections::{BTreeMap, BTreeSet};

/// The text targets the frame driver writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReadoutKey {
    ObjectCount,
    ScrollSpeed,
    ScrollProgress,
    /// Height of the progress bar fill, as a CSS-style percentage.
    ScrollProgressBar,
    HoveredObject,
}

impl ReadoutKey {
    pub const ALL: [ReadoutKey; 5] = [
        ReadoutKey::ObjectCount,
        ReadoutKey::ScrollSpeed,
        ReadoutKey::ScrollProgress,
        ReadoutKey::ScrollProgressBar,
        ReadoutKey::HoveredObject,
    ];

    /// Stable element id on the host page.
    pub fn element_id(self) -> &'static str {
        match self {
            ReadoutKey::ObjectCount => "object-count",
            ReadoutKey::ScrollSpeed => "scroll-speed",
            ReadoutKey::ScrollProgress => "scroll-progress",
            ReadoutKey::ScrollProgressBar => "scroll-progress-bar",
            ReadoutKey::HoveredObject => "hovered-object",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReadoutError {
    #[error("readout element `{0}` is missing")]
    Missing(&'static str),
}

/// Destination for readout text. Writes are best-effort; the caller decides
/// what to do with a failure.
pub trait ReadoutSink {
    fn write(&mut self, key: ReadoutKey, value: &str) -> Result<(), ReadoutError>;
}

/// In-memory readout panel.
///
/// Keys can be marked missing to stand in for a page that lacks an element.
#[derive(Debug, Default, Clone)]
pub struct ReadoutBoard {
    values: BTreeMap<ReadoutKey, String>,
    missing: BTreeSet<ReadoutKey>,
}

impl ReadoutBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A board where writes to `missing` fail.
    pub fn without(missing: impl IntoIterator<Item = ReadoutKey>) -> Self {
        Self {
            values: BTreeMap::new(),
            missing: missing.into_iter().collect(),
        }
    }

    pub fn get(&self, key: ReadoutKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }
}

impl ReadoutSink for ReadoutBoard {
    fn write(&mut self, key: ReadoutKey, value: &str) -> Result<(), ReadoutError> {
        if self.missing.contains(&key) {
            return Err(ReadoutError::Missing(key.element_id()));
        }
        self.values.insert(key, value.to_string());
        Ok(())
    }
}

impl std::fmt::Display for ReadoutBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (key, value) in &self.values {
            writeln!(f, "{:<20} {value}", key.element_id())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ids_are_unique() {
        let ids: BTreeSet<&str> = ReadoutKey::ALL.iter().map(|k| k.element_id()).collect();
        assert_eq!(ids.len(), ReadoutKey::ALL.len());
    }

    #[test]
    fn write_then_read() {
        let mut board = ReadoutBoard::new();
        board.write(ReadoutKey::ScrollSpeed, "1.0x").unwrap();
        board.write(ReadoutKey::ScrollSpeed, "2.5x").unwrap();
        assert_eq!(board.get(ReadoutKey::ScrollSpeed), Some("2.5x"));
        assert_eq!(board.get(ReadoutKey::HoveredObject), None);
    }

    #[test]
    fn missing_element_fails_without_storing() {
        let mut board = ReadoutBoard::without([ReadoutKey::HoveredObject]);
        let err = board.write(ReadoutKey::HoveredObject, "Cube").unwrap_err();
        assert_eq!(err, ReadoutError::Missing("hovered-object"));
        assert_eq!(board.get(ReadoutKey::HoveredObject), None);
        assert!(board.write(ReadoutKey::ObjectCount, "69").is_ok());
    }

    #[test]
    fn display_lists_values() {
        let mut board = ReadoutBoard::new();
        board.write(ReadoutKey::ObjectCount, "69").unwrap();
        let text = format!("{board}");
        assert!(text.contains("object-count"));
        assert!(text.contains("69"));
    }
}
