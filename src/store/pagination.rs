//! Paginación en memoria del listado de vehículos

use serde::Serialize;

pub const DEFAULT_PER_PAGE: usize = 10;
pub const MAX_PER_PAGE: usize = 100;

/// Una página del listado
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }
}

/// Cortar `items` en la página pedida (base 1).
///
/// La página se ajusta al rango válido: 0 pasa a 1 y una página más allá
/// del final pasa a la última.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.clamp(1, MAX_PER_PAGE);
    let total = items.len();
    let total_pages = total.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total);
    let slice = if start < total { items[start..end].to_vec() } else { Vec::new() };

    Page {
        items: slice,
        page,
        per_page,
        total,
        total_pages,
        has_previous: page > 1,
        has_next: page < total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn test_first_page() {
        let page = paginate(&numbers(25), 1, 10);
        assert_eq!(page.items, numbers(10));
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_previous);
        assert!(page.has_next);
    }

    #[test]
    fn test_last_page_is_partial() {
        let page = paginate(&numbers(25), 3, 10);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert!(page.has_previous);
        assert!(!page.has_next);
    }

    #[test]
    fn test_page_is_clamped() {
        assert_eq!(paginate(&numbers(25), 0, 10).page, 1);

        let past_end = paginate(&numbers(25), 9, 10);
        assert_eq!(past_end.page, 3);
        assert_eq!(past_end.items.len(), 5);
    }

    #[test]
    fn test_per_page_is_clamped() {
        assert_eq!(paginate(&numbers(5), 1, 0).per_page, 1);
        assert_eq!(paginate(&numbers(500), 1, 1000).items.len(), MAX_PER_PAGE);
    }

    #[test]
    fn test_empty_list() {
        let page = paginate::<usize>(&[], 4, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_previous);
        assert!(!page.has_next);
    }
}
