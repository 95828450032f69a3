use crate::dataset::Dataset;
use crate::error::DateIndexError;
use chrono::NaiveDate;

/// Strictly increasing, deduplicated dates present in a [`Dataset`].
///
/// Slider position `i` maps to `dates()[i]`; `max_position()` is the
/// slider's largest legal value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateIndex {
    dates: Vec<NaiveDate>,
}

impl DateIndex {
    /// Collect the distinct dates of a prepared dataset.
    pub fn build(dataset: &Dataset) -> Self {
        Self::from_dates(dataset.dates())
    }

    /// Sort and deduplicate an arbitrary set of dates.
    pub fn from_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        let mut dates: Vec<NaiveDate> = dates.into_iter().collect();
        dates.sort_unstable();
        dates.dedup();
        DateIndex { dates }
    }

    /// The date at slider position `index`.
    pub fn date_at(&self, index: usize) -> Result<NaiveDate, DateIndexError> {
        self.dates
            .get(index)
            .copied()
            .ok_or(DateIndexError::OutOfRange {
                index,
                len: self.dates.len(),
            })
    }

    /// The slider position of `date`.
    pub fn index_of(&self, date: NaiveDate) -> Result<usize, DateIndexError> {
        self.dates
            .binary_search(&date)
            .map_err(|_| DateIndexError::NotFound(date))
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Largest legal slider position, `None` for an empty index.
    pub fn max_position(&self) -> Option<usize> {
        self.dates.len().checked_sub(1)
    }

    /// Clamp a requested slider position into `[0, max_position]`.
    pub fn clamp(&self, index: usize) -> usize {
        index.min(self.max_position().unwrap_or(0))
    }

    /// The position after `index`, staying at the last position at the end.
    pub fn next_position(&self, index: usize) -> usize {
        self.clamp(index.saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::sample_dataset;

    fn ymd(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, m, d).unwrap()
    }

    #[test]
    fn test_build_is_strictly_increasing() {
        let index = DateIndex::build(&sample_dataset());
        assert_eq!(index.len(), 6);
        assert!(index.dates().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(index.first(), Some(ymd(1, 22)));
        assert_eq!(index.last(), Some(ymd(1, 27)));
        assert_eq!(index.max_position(), Some(5));
    }

    #[test]
    fn test_date_at_and_index_of_agree() {
        let dataset = sample_dataset();
        let index = DateIndex::build(&dataset);
        for date in dataset.dates() {
            let position = index.index_of(date).unwrap();
            assert_eq!(index.date_at(position).unwrap(), date);
        }
    }

    #[test]
    fn test_lookup_errors() {
        let index = DateIndex::build(&sample_dataset());
        assert_eq!(
            index.date_at(6),
            Err(DateIndexError::OutOfRange { index: 6, len: 6 })
        );
        assert_eq!(
            index.index_of(ymd(3, 1)),
            Err(DateIndexError::NotFound(ymd(3, 1)))
        );
    }

    #[test]
    fn test_clamp_and_next_position() {
        let index = DateIndex::from_dates([ymd(1, 3), ymd(1, 1), ymd(1, 2), ymd(1, 1)]);
        assert_eq!(index.dates(), &[ymd(1, 1), ymd(1, 2), ymd(1, 3)]);
        assert_eq!(index.clamp(10), 2);
        assert_eq!(index.clamp(1), 1);
        assert_eq!(index.next_position(0), 1);
        assert_eq!(index.next_position(2), 2);
        assert_eq!(index.next_position(usize::MAX), 2);
    }

    #[test]
    fn test_empty_index() {
        let index = DateIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.max_position(), None);
        assert_eq!(index.clamp(4), 0);
        assert!(index.date_at(0).is_err());
    }
}
