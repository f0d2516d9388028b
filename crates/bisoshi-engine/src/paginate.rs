/// Rows `[page * rows_per_page, page * rows_per_page + rows_per_page)`,
/// clamped to the slice. Out-of-range pages give an empty slice.
pub fn page_slice<T>(items: &[T], page: usize, rows_per_page: usize) -> &[T] {
    let rows_per_page = rows_per_page.max(1);
    let start = page.saturating_mul(rows_per_page).min(items.len());
    let end = start.saturating_add(rows_per_page).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `total` rows; an empty table still has one page.
pub fn page_count(total: usize, rows_per_page: usize) -> usize {
    total.div_ceil(rows_per_page.max(1)).max(1)
}

/// Blank filler rows that keep the final page as tall as the others.
///
/// Zero on every page except the final one, including pages past the end.
pub fn empty_rows(page: usize, rows_per_page: usize, total: usize) -> usize {
    let rows_per_page = rows_per_page.max(1);
    if page.checked_add(1) != Some(page_count(total, rows_per_page)) {
        return 0;
    }
    let shown = total - page * rows_per_page;
    rows_per_page.saturating_sub(shown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_third_page_of_five_rows() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(page_slice(&items, 2, 2), &[5]);
        assert_eq!(empty_rows(2, 2, 5), 1);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let items = [1, 2, 3];
        assert!(page_slice(&items, 7, 2).is_empty());
        assert_eq!(empty_rows(7, 2, 3), 0);
        assert!(page_slice(&items, usize::MAX, usize::MAX).is_empty());
    }

    #[test]
    fn test_filler_only_on_final_page() {
        assert_eq!(empty_rows(0, 5, 12), 0);
        assert_eq!(empty_rows(1, 5, 12), 0);
        assert_eq!(empty_rows(2, 5, 12), 3);
        assert_eq!(empty_rows(0, 5, 3), 2);
        assert_eq!(empty_rows(1, 5, 10), 0);
    }

    #[test]
    fn test_empty_table_fills_first_page() {
        assert_eq!(page_count(0, 5), 1);
        assert_eq!(empty_rows(0, 5, 0), 5);
    }

    #[test]
    fn test_pages_concatenate_to_the_whole() {
        let items: Vec<u32> = (0..23).collect();
        for rows_per_page in 1..=10 {
            let pages = page_count(items.len(), rows_per_page);
            let joined: Vec<u32> = (0..pages)
                .flat_map(|page| page_slice(&items, page, rows_per_page).iter().copied())
                .collect();
            assert_eq!(joined, items, "rows_per_page={}", rows_per_page);
        }
    }
}
