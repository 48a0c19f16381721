//! Category aggregation
//!
//! Groups rows by exact category text and sums their amounts.

use std::collections::HashMap;

use crate::core::types::{AggregateRow, Row, round_cents};

/// Output of one aggregation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct AggregateResult {
    /// Sorted by `total_amount` descending, ties in first-seen order
    pub(crate) rows: Vec<AggregateRow>,
    /// Sum of the rounded per-category totals
    pub(crate) grand_total: f64,
    pub(crate) grand_count: u64,
    /// Rows left out because their category cell was blank
    pub(crate) skipped_rows: usize,
    /// Rows counted with a zero amount because the cell did not parse
    pub(crate) invalid_amounts: usize,
}

/// Column positions the aggregator reads
#[derive(Debug, Clone, Copy)]
pub(crate) struct AggregateFields {
    pub(crate) category: Option<usize>,
    pub(crate) amount: Option<usize>,
}

#[derive(Debug, Default)]
struct CategoryAccumulator {
    count: u64,
    sum: f64,
}

/// Aggregate rows by category (single pass, rounding after summation)
pub(crate) fn aggregate<'a, I>(rows: I, fields: AggregateFields) -> AggregateResult
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, CategoryAccumulator> = HashMap::new();
    let mut skipped_rows = 0;
    let mut invalid_amounts = 0;

    for row in rows {
        let category = fields.category.and_then(|i| row.cell(i)).unwrap_or("");
        if category.is_empty() {
            skipped_rows += 1;
            continue;
        }

        let amount = match fields.amount.and_then(|i| row.cell(i)).and_then(parse_amount) {
            Some(v) => v,
            None => {
                invalid_amounts += 1;
                0.0
            }
        };

        let acc = groups.entry(category.to_string()).or_insert_with(|| {
            order.push(category.to_string());
            CategoryAccumulator::default()
        });
        acc.count += 1;
        acc.sum += amount;
    }

    let mut rows: Vec<AggregateRow> = order
        .into_iter()
        .map(|category| {
            let acc = groups.remove(&category).unwrap_or_default();
            AggregateRow {
                category,
                count: acc.count,
                total_amount: round_cents(acc.sum),
            }
        })
        .collect();
    // Stable sort keeps first-seen order among equal totals
    rows.sort_by(|a, b| b.total_amount.total_cmp(&a.total_amount));

    let grand_total = round_cents(rows.iter().map(|r| r.total_amount).sum());
    let grand_count = rows.iter().map(|r| r.count).sum();

    if skipped_rows > 0 || invalid_amounts > 0 {
        tracing::debug!(skipped_rows, invalid_amounts, "aggregation skipped input");
    }

    AggregateResult {
        rows,
        grand_total,
        grand_count,
        skipped_rows,
        invalid_amounts,
    }
}

/// Lenient amount parsing: thousands separators, currency marks and
/// accounting parentheses are accepted. Non-finite values are rejected.
pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.replace([',', '"', '$'], "");
    let s = s.trim();
    let (negative, s) = match s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, s),
    };
    let s = s.trim_matches(|c: char| {
        c.is_whitespace() || c.is_alphabetic() || matches!(c, '€' | '£' | '¥' | '﷼')
    });
    if s.is_empty() {
        return None;
    }
    let value: f64 = s.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if negative { -value.abs() } else { value })
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    const FIELDS: AggregateFields = AggregateFields {
        category: Some(0),
        amount: Some(1),
    };

    fn rows(data: &[(&str, &str)]) -> Vec<Row> {
        data.iter()
            .map(|(c, a)| Row::from_iter([*c, *a]))
            .collect()
    }

    fn totals(result: &AggregateResult) -> Vec<(&str, u64, f64)> {
        result
            .rows
            .iter()
            .map(|r| (r.category.as_str(), r.count, r.total_amount))
            .collect()
    }

    #[test]
    fn groups_counts_and_sums() {
        let input = rows(&[("Food", "10"), ("Rent", "500"), ("Food", "2.5")]);
        let result = aggregate(&input, FIELDS);
        assert_eq!(totals(&result), vec![("Rent", 1, 500.0), ("Food", 2, 12.5)]);
        assert_eq!(result.grand_total, 512.5);
        assert_eq!(result.grand_count, 3);
    }

    #[test]
    fn categories_are_case_and_space_sensitive() {
        let input = rows(&[("food", "1"), ("Food", "1"), ("Food ", "1")]);
        let result = aggregate(&input, FIELDS);
        assert_eq!(result.rows.len(), 3);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let input = rows(&[("B", "5"), ("A", "5"), ("C", "7"), ("D", "5")]);
        let result = aggregate(&input, FIELDS);
        let names: Vec<_> = result.rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(names, vec!["C", "B", "A", "D"]);
    }

    #[test]
    fn ordering_is_non_increasing() {
        let input = rows(&[
            ("a", "3"),
            ("b", "-4"),
            ("c", "100.5"),
            ("a", "9"),
            ("d", "0"),
            ("e", "12"),
        ]);
        let result = aggregate(&input, FIELDS);
        for pair in result.rows.windows(2) {
            assert!(pair[0].total_amount >= pair[1].total_amount);
        }
    }

    #[test]
    fn rounds_after_summation() {
        // 0.004 * 3 = 0.012 -> 0.01; rounding each row first would give 0.00
        let input = rows(&[("A", "0.004"), ("A", "0.004"), ("A", "0.004")]);
        let result = aggregate(&input, FIELDS);
        assert_eq!(result.rows[0].total_amount, 0.01);
    }

    #[test]
    fn grand_total_sums_rounded_category_totals() {
        // 1.006 rounds to 1.01 per category, so 3.03; rounding the raw sum would give 3.02
        let input = rows(&[("A", "1.006"), ("B", "1.006"), ("C", "1.006")]);
        let result = aggregate(&input, FIELDS);
        assert_eq!(result.grand_total, 3.03);
        let sum: f64 = result.rows.iter().map(|r| r.total_amount).sum();
        assert_eq!(result.grand_total, round_cents(sum));
    }

    #[test]
    fn totals_reconcile() {
        let input = rows(&[("A", "1.10"), ("B", "2.20"), ("A", "3.30"), ("C", "x")]);
        let result = aggregate(&input, FIELDS);
        let count: u64 = result.rows.iter().map(|r| r.count).sum();
        let sum: f64 = result.rows.iter().map(|r| r.total_amount).sum();
        assert_eq!(result.grand_count, count);
        assert!((result.grand_total - sum).abs() < 1e-9);
    }

    #[test]
    fn empty_input_is_zero() {
        let result = aggregate(std::iter::empty::<&Row>(), FIELDS);
        assert!(result.rows.is_empty());
        assert_eq!(result.grand_total, 0.0);
        assert_eq!(result.grand_count, 0);
    }

    #[test]
    fn empty_category_is_skipped() {
        let input = rows(&[("", "10"), ("  ", "5"), ("A", "1"), ("", "2")]);
        let result = aggregate(&input, FIELDS);
        assert_eq!(totals(&result), vec![("  ", 1, 5.0), ("A", 1, 1.0)]);
        assert_eq!(result.skipped_rows, 2);
        assert_eq!(result.grand_count, 2);
    }

    #[test]
    fn invalid_amount_counts_with_zero() {
        let input = rows(&[("A", "n/a"), ("A", ""), ("A", "4")]);
        let result = aggregate(&input, FIELDS);
        assert_eq!(totals(&result), vec![("A", 3, 4.0)]);
        assert_eq!(result.invalid_amounts, 2);
    }

    #[test]
    fn missing_columns_degrade_gracefully() {
        let input = rows(&[("A", "4")]);
        let no_amount = aggregate(
            &input,
            AggregateFields {
                category: Some(0),
                amount: None,
            },
        );
        assert_eq!(totals(&no_amount), vec![("A", 1, 0.0)]);

        let no_category = aggregate(
            &input,
            AggregateFields {
                category: None,
                amount: Some(1),
            },
        );
        assert!(no_category.rows.is_empty());
        assert_eq!(no_category.skipped_rows, 1);
    }

    #[test]
    fn parse_amount_variants() {
        assert_eq!(parse_amount("1,234.50"), Some(1234.5));
        assert_eq!(parse_amount("$12"), Some(12.0));
        assert_eq!(parse_amount("-$12"), Some(-12.0));
        assert_eq!(parse_amount("(45.10)"), Some(-45.1));
        assert_eq!(parse_amount("SAR 99.99"), Some(99.99));
        assert_eq!(parse_amount("99.99 SAR"), Some(99.99));
        assert_eq!(parse_amount("€5"), Some(5.0));
        assert_eq!(parse_amount(" 7 "), Some(7.0));
    }

    #[test]
    fn parse_amount_rejects_non_numbers() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("n/a"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("--"), None);
    }
}
