//! One-hot encoding of a single categorical column.

use std::collections::BTreeSet;

/// Result of looking a category up in a fitted vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryEncoding {
    /// Index of the category in the sorted vocabulary.
    Known(usize),
    /// Category never seen during fit. Encodes as all-zero indicators.
    Unknown,
    /// No value. Encodes as all-zero indicators.
    Missing,
}

/// Fitted vocabulary for one categorical column.
///
/// Categories are kept sorted, so indicator order depends only on the set of
/// values seen during fit, never on row order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OneHotEncoder {
    vocabulary: Vec<String>,
}

impl OneHotEncoder {
    /// Fit on the non-missing values of a column.
    pub fn fit<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        let set: BTreeSet<&str> = values.into_iter().flatten().collect();
        Self {
            vocabulary: set.into_iter().map(str::to_string).collect(),
        }
    }

    /// Rebuild from a stored vocabulary.
    ///
    /// Returns `None` if the vocabulary is not strictly sorted.
    pub fn from_vocabulary(vocabulary: Vec<String>) -> Option<Self> {
        if vocabulary.windows(2).all(|w| w[0] < w[1]) {
            Some(Self { vocabulary })
        } else {
            None
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Number of indicator columns produced.
    #[inline]
    pub fn width(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn encode(&self, value: Option<&str>) -> CategoryEncoding {
        match value {
            None => CategoryEncoding::Missing,
            Some(v) => match self.vocabulary.binary_search_by(|c| c.as_str().cmp(v)) {
                Ok(idx) => CategoryEncoding::Known(idx),
                Err(_) => CategoryEncoding::Unknown,
            },
        }
    }

    /// Write the indicator block for `value` into `out` (`out.len() == width()`).
    pub fn write(&self, value: Option<&str>, out: &mut [f32]) {
        debug_assert_eq!(out.len(), self.width());
        out.fill(0.0);
        match self.encode(value) {
            CategoryEncoding::Known(idx) => out[idx] = 1.0,
            CategoryEncoding::Unknown | CategoryEncoding::Missing => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> OneHotEncoder {
        OneHotEncoder::fit([Some("Iraq"), Some("Egypt"), None, Some("Iraq"), Some("Algeria")])
    }

    #[test]
    fn vocabulary_is_sorted_and_unique() {
        assert_eq!(encoder().vocabulary(), &["Algeria", "Egypt", "Iraq"]);
    }

    #[test]
    fn known_category_sets_one_indicator() {
        let enc = encoder();
        let mut out = vec![9.0; enc.width()];
        enc.write(Some("Egypt"), &mut out);
        assert_eq!(out, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn unknown_and_missing_are_all_zero() {
        let enc = encoder();
        assert_eq!(enc.encode(Some("Atlantis")), CategoryEncoding::Unknown);
        assert_eq!(enc.encode(None), CategoryEncoding::Missing);

        let mut out = vec![1.0; enc.width()];
        enc.write(Some("Atlantis"), &mut out);
        assert!(out.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn from_vocabulary_requires_sorted() {
        assert!(OneHotEncoder::from_vocabulary(vec!["a".into(), "b".into()]).is_some());
        assert!(OneHotEncoder::from_vocabulary(vec!["b".into(), "a".into()]).is_none());
        assert!(OneHotEncoder::from_vocabulary(vec!["a".into(), "a".into()]).is_none());
    }
}
