use std::ops::Range;

/// Maximum number of numbered page buttons shown at once.
pub const PAGE_WINDOW: usize = 5;

/// Number of pages needed for `total` rows; never less than one.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Row range covered by the 1-based `page`, clamped to `total`.
pub fn page_range(total: usize, page: usize, page_size: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    start..end
}

/// Slice of `rows` visible on the given page.
pub fn page_slice<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    &rows[page_range(rows.len(), page, page_size)]
}

/// Whether `page` is a valid navigation target.
pub fn in_range(page: usize, total_pages: usize) -> bool {
    (1..=total_pages).contains(&page)
}

/// One entry of the pagination control strip.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PageButton {
    Previous { target: usize, enabled: bool },
    Page { number: usize, current: bool },
    Ellipsis,
    Next { target: usize, enabled: bool },
}

/// Build the control strip: prev, first-page shortcut, up to five pages around the
/// current one, last-page shortcut, next.
pub fn page_buttons(current: usize, total_pages: usize) -> Vec<PageButton> {
    let total_pages = total_pages.max(1);
    let current = current.clamp(1, total_pages);

    let mut start = current.saturating_sub(PAGE_WINDOW / 2).max(1);
    let end = (start + PAGE_WINDOW - 1).min(total_pages);
    if end - start < PAGE_WINDOW - 1 {
        start = end.saturating_sub(PAGE_WINDOW - 1).max(1);
    }

    let mut buttons = vec![PageButton::Previous {
        target: current.saturating_sub(1),
        enabled: current > 1,
    }];

    if start > 1 {
        buttons.push(PageButton::Page {
            number: 1,
            current: false,
        });
        if start > 2 {
            buttons.push(PageButton::Ellipsis);
        }
    }

    for number in start..=end {
        buttons.push(PageButton::Page {
            number,
            current: number == current,
        });
    }

    if end < total_pages {
        if end < total_pages - 1 {
            buttons.push(PageButton::Ellipsis);
        }
        buttons.push(PageButton::Page {
            number: total_pages,
            current: false,
        });
    }

    buttons.push(PageButton::Next {
        target: current + 1,
        enabled: current < total_pages,
    });
    buttons
}

/// Render the strip as compact text, e.g. `‹ 1 … 4 5 [6] 7 8 … 20 ›`.
pub fn render_buttons(buttons: &[PageButton]) -> String {
    buttons
        .iter()
        .map(|button| match button {
            PageButton::Previous { .. } => "‹".to_string(),
            PageButton::Next { .. } => "›".to_string(),
            PageButton::Ellipsis => "…".to_string(),
            PageButton::Page { number, current: true } => format!("[{number}]"),
            PageButton::Page { number, .. } => number.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(buttons: &[PageButton]) -> Vec<usize> {
        buttons
            .iter()
            .filter_map(|b| match b {
                PageButton::Page { number, .. } => Some(*number),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn page_count_rounds_up_with_minimum_one() {
        assert_eq!(total_pages(120, 50), 3);
        assert_eq!(total_pages(100, 50), 2);
        assert_eq!(total_pages(0, 50), 1);
    }

    #[test]
    fn second_page_of_fifty_covers_rows_51_to_100() {
        let rows: Vec<usize> = (1..=120).collect();
        let page = page_slice(&rows, 2, 50);
        assert_eq!(page.first(), Some(&51));
        assert_eq!(page.last(), Some(&100));
        assert_eq!(page_slice(&rows, 3, 50).len(), 20);
    }

    #[test]
    fn pages_concatenate_to_the_full_sequence() {
        let rows: Vec<usize> = (0..137).collect();
        for size in [25, 50, 100] {
            let pages = total_pages(rows.len(), size);
            let joined: Vec<usize> = (1..=pages)
                .flat_map(|p| page_slice(&rows, p, size).iter().copied())
                .collect();
            assert_eq!(joined, rows, "page size {size}");
        }
    }

    #[test]
    fn out_of_range_pages_are_rejected() {
        assert!(!in_range(0, 3));
        assert!(in_range(3, 3));
        assert!(!in_range(4, 3));
        assert!(page_slice(&[1, 2, 3], 9, 2).is_empty());
    }

    #[test]
    fn window_is_centered_with_edge_shortcuts() {
        let buttons = page_buttons(10, 20);
        assert_eq!(numbers(&buttons), vec![1, 8, 9, 10, 11, 12, 20]);
        assert_eq!(
            buttons.iter().filter(|b| **b == PageButton::Ellipsis).count(),
            2
        );
        assert_eq!(render_buttons(&buttons), "‹ 1 … 8 9 [10] 11 12 … 20 ›");
    }

    #[test]
    fn window_shifts_at_the_edges() {
        assert_eq!(numbers(&page_buttons(1, 20)), vec![1, 2, 3, 4, 5, 20]);
        assert_eq!(numbers(&page_buttons(20, 20)), vec![1, 16, 17, 18, 19, 20]);
        assert_eq!(numbers(&page_buttons(2, 3)), vec![1, 2, 3]);
        assert_eq!(render_buttons(&page_buttons(3, 6)), "‹ 1 2 [3] 4 5 6 ›");
    }

    #[test]
    fn prev_and_next_disable_at_bounds() {
        let buttons = page_buttons(1, 1);
        assert_eq!(
            buttons.first(),
            Some(&PageButton::Previous {
                target: 0,
                enabled: false
            })
        );
        assert_eq!(
            buttons.last(),
            Some(&PageButton::Next {
                target: 2,
                enabled: false
            })
        );
    }
}
