pub const QUESTIONS_PER_PAGE: usize = 10;

/// Returns the 1-based `page` of `items`: the slice `[(page-1)*10, page*10)`.
/// Pages past the end, and page 0, are empty.
pub fn paginate<T>(items: Vec<T>, page: u32) -> Vec<T> {
    let Some(index) = (page as usize).checked_sub(1) else {
        return Vec::new();
    };
    items
        .into_iter()
        .skip(index.saturating_mul(QUESTIONS_PER_PAGE))
        .take(QUESTIONS_PER_PAGE)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_contiguous_slices() {
        let items: Vec<u32> = (0..25).collect();
        for page in 1..=3u32 {
            let start = (page as usize - 1) * QUESTIONS_PER_PAGE;
            let end = (start + QUESTIONS_PER_PAGE).min(items.len());
            assert_eq!(paginate(items.clone(), page), items[start..end].to_vec());
        }
    }

    #[test]
    fn last_page_is_partial() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(paginate(items, 3), vec![20, 21, 22, 23, 24]);
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items: Vec<u32> = (0..25).collect();
        assert!(paginate(items.clone(), 4).is_empty());
        assert!(paginate(items.clone(), 0).is_empty());
        assert!(paginate(items, u32::MAX).is_empty());
        assert!(paginate(Vec::<u32>::new(), 1).is_empty());
    }
}
