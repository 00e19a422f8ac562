//! Page-window computation for pagination controls.
//!
//! Templates receive the label sequence as numbers with `null` marking a gap,
//! so a control renders `1 … 9 10 11 … 20` without recomputing anything.

use serde::Serialize;

/// One slot in a rendered pagination control: either a clickable page number
/// or a non-interactive gap marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageLabel {
    Number(usize),
    /// Serializes as `null`.
    Ellipsis,
}

/// How many pages are shown in full before the window collapses around the
/// current page.
const FULL_WINDOW_MAX: usize = 7;

/// Computes the ordered label sequence for a pagination control.
///
/// Small collections (`total_pages <= 7`) list every page. Larger ones always
/// keep page 1 and the last page visible and collapse the rest around
/// `current_page`. Callers are expected to pass `current_page` already
/// clamped to `[1, total_pages]`; `total_pages` below 1 is treated as 1.
pub fn compute_labels(current_page: usize, total_pages: usize) -> Vec<PageLabel> {
    use PageLabel::{Ellipsis, Number};

    let last = total_pages.max(1);

    if last <= FULL_WINDOW_MAX {
        return (1..=last).map(Number).collect();
    }

    let mut labels = vec![Number(1)];

    if current_page <= 3 {
        labels.extend([Number(2), Number(3), Number(4), Ellipsis, Number(last)]);
    } else if current_page >= last - 2 {
        labels.extend([
            Ellipsis,
            Number(last - 3),
            Number(last - 2),
            Number(last - 1),
            Number(last),
        ]);
    } else {
        labels.extend([
            Ellipsis,
            Number(current_page - 1),
            Number(current_page),
            Number(current_page + 1),
            Ellipsis,
            Number(last),
        ]);
    }

    labels
}

/// A page of items together with everything a template needs to render the
/// pagination control around it.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<PageLabel>,
    pub page: usize,
    pub last_page: usize,
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total: usize, per_page: usize) -> Self {
        let last_page = total.div_ceil(per_page.max(1)).max(1);
        let page = current_page.clamp(1, last_page);

        Self {
            items,
            pages: compute_labels(page, last_page),
            page,
            last_page,
            total,
            has_prev: page > 1,
            has_next: page < last_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PageLabel::{Ellipsis, Number};
    use super::*;

    fn numbers(labels: &[PageLabel]) -> Vec<usize> {
        labels
            .iter()
            .filter_map(|l| match l {
                Number(n) => Some(*n),
                Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn small_sets_list_every_page() {
        for total in 1..=7 {
            for current in 1..=total {
                let labels = compute_labels(current, total);
                assert_eq!(labels.len(), total);
                assert_eq!(numbers(&labels), (1..=total).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn first_and_last_page_always_present() {
        for total in 1..=40 {
            for current in 1..=total {
                let labels = compute_labels(current, total);
                assert_eq!(labels[0], Number(1));
                if total > 1 {
                    assert_eq!(*labels.last().unwrap(), Number(total));
                }
            }
        }
    }

    #[test]
    fn near_start_window() {
        assert_eq!(
            compute_labels(2, 20),
            vec![
                Number(1),
                Number(2),
                Number(3),
                Number(4),
                Ellipsis,
                Number(20)
            ]
        );
    }

    #[test]
    fn middle_window() {
        assert_eq!(
            compute_labels(10, 20),
            vec![
                Number(1),
                Ellipsis,
                Number(9),
                Number(10),
                Number(11),
                Ellipsis,
                Number(20)
            ]
        );
    }

    #[test]
    fn near_end_window() {
        assert_eq!(
            compute_labels(19, 20),
            vec![
                Number(1),
                Ellipsis,
                Number(17),
                Number(18),
                Number(19),
                Number(20)
            ]
        );
    }

    #[test]
    fn zero_total_pages_is_treated_as_one() {
        assert_eq!(compute_labels(1, 0), vec![Number(1)]);
    }

    #[test]
    fn labels_serialize_as_number_or_null() {
        let json = serde_json::to_string(&compute_labels(2, 20)).unwrap();
        assert_eq!(json, "[1,2,3,4,null,20]");
    }

    #[test]
    fn paginated_derives_last_page_and_nav_flags() {
        let p = Paginated::new(vec![0u8; 20], 4, 200, 20);
        assert_eq!(p.last_page, 10);
        assert_eq!(numbers(&p.pages), vec![1, 3, 4, 5, 10]);
        assert!(p.has_prev);
        assert!(p.has_next);

        let empty: Paginated<u8> = Paginated::new(vec![], 1, 0, 20);
        assert_eq!(empty.last_page, 1);
        assert!(!empty.has_prev);
        assert!(!empty.has_next);
    }
}
