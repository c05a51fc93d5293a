use serde::Serialize;

use super::limits::ResolvedLimit;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<usize>,
}

impl ResolvedLimit {
    /// Skips `offset` rows and keeps at most the limit. `next_offset` is only
    /// set when rows remain past the kept ones.
    pub fn paginate<T, I>(self, rows: I, offset: usize) -> Page<T>
    where
        I: IntoIterator<Item = T>,
    {
        let cap = self
            .count()
            .map_or(usize::MAX, |n| usize::try_from(n.get()).unwrap_or(usize::MAX));

        let mut out = Vec::new();
        let mut truncated = false;
        let mut next_offset = None;
        for row in rows.into_iter().skip(offset) {
            if out.len() >= cap {
                truncated = true;
                next_offset = Some(offset + out.len());
                break;
            }
            out.push(row);
        }

        Page {
            rows: out,
            truncated,
            next_offset,
        }
    }

    /// Wraps `sql` as a subquery carrying this limit (and an optional offset).
    /// SQLite needs `LIMIT -1` to express an offset without a bound, and rejects
    /// limits above `i64::MAX`, so counts are clamped there.
    pub fn wrap_sql(self, sql: &str, offset: Option<usize>) -> String {
        let sql = sql.trim_end_matches(|c: char| c.is_whitespace() || c == ';');
        let count = self.count().map(|n| n.get().min(i64::MAX as u64));
        match (count, offset) {
            (None, None) => sql.to_string(),
            (None, Some(off)) => format!("SELECT * FROM ({sql}) LIMIT -1 OFFSET {off}"),
            (Some(n), None) => format!("SELECT * FROM ({sql}) LIMIT {n}"),
            (Some(n), Some(off)) => {
                format!("SELECT * FROM ({sql}) LIMIT {n} OFFSET {off}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU64;

    use super::*;

    fn bounded(n: u64) -> ResolvedLimit {
        ResolvedLimit::Bounded(NonZeroU64::new(n).unwrap())
    }

    #[test]
    fn bounded_page_is_truncated() {
        let page = bounded(3).paginate(1..=10, 0);
        assert_eq!(page.rows, vec![1, 2, 3]);
        assert!(page.truncated);
        assert_eq!(page.next_offset, Some(3));
    }

    #[test]
    fn offset_is_applied_before_limit() {
        let page = bounded(3).paginate(1..=10, 4);
        assert_eq!(page.rows, vec![5, 6, 7]);
        assert_eq!(page.next_offset, Some(7));
    }

    #[test]
    fn exact_fit_is_not_truncated() {
        let page = bounded(5).paginate(1..=5, 0);
        assert_eq!(page.rows.len(), 5);
        assert!(!page.truncated);
        assert_eq!(page.next_offset, None);
    }

    #[test]
    fn unbounded_keeps_everything_after_offset() {
        let page = ResolvedLimit::Unbounded.paginate(vec!["a", "b", "c"], 1);
        assert_eq!(page.rows, vec!["b", "c"]);
        assert!(!page.truncated);
    }

    #[test]
    fn offset_past_end_is_empty() {
        let page = bounded(2).paginate(1..=3, 10);
        assert!(page.rows.is_empty());
        assert!(!page.truncated);
    }

    #[test]
    fn wraps_sql() {
        let sql = "SELECT id FROM users;  ";
        assert_eq!(ResolvedLimit::Unbounded.wrap_sql(sql, None), "SELECT id FROM users");
        assert_eq!(
            ResolvedLimit::Unbounded.wrap_sql(sql, Some(5)),
            "SELECT * FROM (SELECT id FROM users) LIMIT -1 OFFSET 5"
        );
        assert_eq!(
            bounded(25).wrap_sql(sql, None),
            "SELECT * FROM (SELECT id FROM users) LIMIT 25"
        );
        assert_eq!(
            bounded(25).wrap_sql(sql, Some(50)),
            "SELECT * FROM (SELECT id FROM users) LIMIT 25 OFFSET 50"
        );
        assert_eq!(
            bounded(u64::MAX).wrap_sql(sql, None),
            format!("SELECT * FROM (SELECT id FROM users) LIMIT {}", i64::MAX)
        );
    }

    #[test]
    fn huge_limit_keeps_all_rows_in_memory() {
        let page = bounded(u64::MAX).paginate(1..=4, 0);
        assert_eq!(page.rows, vec![1, 2, 3, 4]);
        assert!(!page.truncated);
    }

    #[test]
    fn wrapped_sql_runs_on_sqlite() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE items (id INTEGER PRIMARY KEY);
             WITH RECURSIVE n(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM n WHERE x < 40)
             INSERT INTO items (id) SELECT x FROM n;",
        )
        .unwrap();

        let count_rows = |sql: String| -> usize {
            let mut stmt = conn.prepare(&sql).unwrap();
            let ids = stmt
                .query_map([], |r| r.get::<_, i64>(0))
                .unwrap()
                .collect::<Result<Vec<_>, _>>()
                .unwrap();
            ids.len()
        };

        let base = "SELECT id FROM items ORDER BY id";
        assert_eq!(count_rows(bounded(10).wrap_sql(base, None)), 10);
        assert_eq!(count_rows(bounded(10).wrap_sql(base, Some(35))), 5);
        assert_eq!(count_rows(ResolvedLimit::Unbounded.wrap_sql(base, None)), 40);
        assert_eq!(count_rows(ResolvedLimit::Unbounded.wrap_sql(base, Some(30))), 10);

        let huge = crate::core::resolve("99999999999999999999");
        assert_eq!(count_rows(huge.wrap_sql(base, None)), 40);
        assert_eq!(count_rows(huge.wrap_sql(base, Some(38))), 2);
    }
}
