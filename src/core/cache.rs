//! Memoization of pipeline results
//!
//! Entries are keyed by period token and reference day, scoped to one file
//! identity (plus the column mapping). Presenting a different scope drops
//! every entry.

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::rc::Rc;

use crate::core::period::PeriodToken;
use crate::core::pipeline::{ResultBundle, run};
use crate::core::types::{ColumnMap, RowSet};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    token: PeriodToken,
    day: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheScope {
    identity: String,
    columns: ColumnMap,
}

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CacheStats {
    pub(crate) hits: usize,
    pub(crate) misses: usize,
}

#[derive(Debug, Default)]
pub(crate) struct SummaryCache {
    scope: Option<CacheScope>,
    entries: HashMap<CacheKey, ResultBundle>,
    stats: CacheStats,
}

impl SummaryCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Return the cached bundle for this request, running the pipeline on a miss.
    ///
    /// `identity` must change whenever the file content changes.
    pub(crate) fn get_or_run(
        &mut self,
        identity: &str,
        rows: &Rc<RowSet>,
        columns: &ColumnMap,
        token: &PeriodToken,
        reference: NaiveDateTime,
    ) -> &ResultBundle {
        self.enter_scope(identity, columns);

        let key = CacheKey {
            token: token.clone(),
            day: reference.date(),
        };
        if self.entries.contains_key(&key) {
            self.stats.hits += 1;
            tracing::debug!(period = token.label(), "summary cache hit");
        } else {
            self.stats.misses += 1;
        }
        self.entries
            .entry(key)
            .or_insert_with(|| run(rows, columns, token, Some(reference)))
    }

    /// Bundle for a request already run under the current scope
    pub(crate) fn get(&self, token: &PeriodToken, reference: NaiveDateTime) -> Option<&ResultBundle> {
        self.entries.get(&CacheKey {
            token: token.clone(),
            day: reference.date(),
        })
    }

    pub(crate) fn stats(&self) -> CacheStats {
        self.stats
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn enter_scope(&mut self, identity: &str, columns: &ColumnMap) {
        let same = self
            .scope
            .as_ref()
            .is_some_and(|s| s.identity == identity && s.columns == *columns);
        if same {
            return;
        }
        if !self.entries.is_empty() {
            tracing::debug!(dropped = self.entries.len(), "input changed, clearing summary cache");
        }
        self.entries.clear();
        self.scope = Some(CacheScope {
            identity: identity.to_string(),
            columns: columns.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::period::Period;
    use crate::core::types::Row;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|d| d.and_hms_opt(h, 0, 0))
            .unwrap()
    }

    fn rows() -> Rc<RowSet> {
        Rc::new(RowSet::new(
            vec![
                "Transaction Category".into(),
                "Amount Paid".into(),
                "Created On".into(),
            ],
            vec![Row::from_iter(["A", "1", "2024-06-01"])],
        ))
    }

    #[test]
    fn repeated_request_hits() {
        let mut cache = SummaryCache::new();
        let rows = rows();
        let cols = ColumnMap::default();
        let token = PeriodToken::from(Period::Today);

        cache.get_or_run("abc", &rows, &cols, &token, at(2024, 6, 1, 9));
        // Same day, different time of day: still the same key
        let bundle = cache.get_or_run("abc", &rows, &cols, &token, at(2024, 6, 1, 17));
        assert_eq!(bundle.grand_count, 1);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn different_period_or_day_misses() {
        let mut cache = SummaryCache::new();
        let rows = rows();
        let cols = ColumnMap::default();

        cache.get_or_run("abc", &rows, &cols, &Period::Today.into(), at(2024, 6, 1, 9));
        cache.get_or_run("abc", &rows, &cols, &Period::ThisYear.into(), at(2024, 6, 1, 9));
        let next_day = cache.get_or_run("abc", &rows, &cols, &Period::Today.into(), at(2024, 6, 2, 9));
        assert_eq!(next_day.grand_count, 0);
        assert_eq!(cache.stats().misses, 3);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn new_identity_invalidates_everything() {
        let mut cache = SummaryCache::new();
        let rows = rows();
        let cols = ColumnMap::default();
        let token = PeriodToken::from(Period::AllTime);

        cache.get_or_run("first", &rows, &cols, &token, at(2024, 6, 1, 9));
        cache.get_or_run("first", &rows, &cols, &Period::Today.into(), at(2024, 6, 1, 9));
        assert_eq!(cache.len(), 2);

        cache.get_or_run("second", &rows, &cols, &token, at(2024, 6, 1, 9));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats(), CacheStats { hits: 0, misses: 3 });
    }

    #[test]
    fn column_change_invalidates() {
        let mut cache = SummaryCache::new();
        let rows = rows();
        let token = PeriodToken::from(Period::AllTime);
        cache.get_or_run("abc", &rows, &ColumnMap::default(), &token, at(2024, 6, 1, 9));

        let other = ColumnMap {
            category: "Other".into(),
            ..ColumnMap::default()
        };
        let bundle = cache.get_or_run("abc", &rows, &other, &token, at(2024, 6, 1, 9));
        assert!(bundle.table.is_empty());
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn get_reads_without_running() {
        let mut cache = SummaryCache::new();
        let rows = rows();
        let token = PeriodToken::from(Period::ThisYear);
        assert!(cache.get(&token, at(2024, 6, 1, 9)).is_none());

        cache.get_or_run("abc", &rows, &ColumnMap::default(), &token, at(2024, 6, 1, 9));
        assert!(cache.get(&token, at(2024, 6, 1, 23)).is_some());
        assert!(cache.get(&token, at(2024, 6, 2, 0)).is_none());
        assert_eq!(cache.stats(), CacheStats { hits: 0, misses: 1 });
    }
}
