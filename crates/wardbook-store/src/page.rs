use serde::Serialize;

/// Splits a result set into fixed-size pages.
///
/// Page numbers are one-based and clamped: asking for page 0 yields the
/// first page, asking past the end yields the last. An empty result set
/// still has one (empty) page, so templates always have a page to render.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
	per_page: usize,
}

impl Paginator {
	pub fn new(per_page: usize) -> Self {
		assert!(per_page > 0, "page size must be positive");
		Self { per_page }
	}

	pub fn num_pages(&self, total: usize) -> usize {
		total.div_ceil(self.per_page).max(1)
	}

	pub fn page<T>(&self, items: Vec<T>, number: usize) -> Page<T> {
		let num_pages = self.num_pages(items.len());
		let number = number.clamp(1, num_pages);
		let start = (number - 1) * self.per_page;
		let items: Vec<T> = items
			.into_iter()
			.skip(start)
			.take(self.per_page)
			.collect();
		Page { number, num_pages, items }
	}
}

/// One page of results plus the numbers templates need for paging links.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
	pub number: usize,
	pub num_pages: usize,
	pub items: Vec<T>,
}

impl<T> Page<T> {
	pub fn has_previous(&self) -> bool {
		self.number > 1
	}

	pub fn has_next(&self) -> bool {
		self.number < self.num_pages
	}

	pub fn previous_number(&self) -> usize {
		self.number.saturating_sub(1).max(1)
	}

	pub fn next_number(&self) -> usize {
		(self.number + 1).min(self.num_pages)
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(0, 1)]
	#[case(1, 1)]
	#[case(10, 1)]
	#[case(11, 2)]
	#[case(25, 3)]
	fn page_count(#[case] total: usize, #[case] expected: usize) {
		assert_eq!(Paginator::new(10).num_pages(total), expected);
	}

	#[test]
	fn out_of_range_page_numbers_are_clamped() {
		let paginator = Paginator::new(2);
		let items: Vec<i32> = (1..=5).collect();

		let first = paginator.page(items.clone(), 0);
		assert_eq!(first.number, 1);
		assert_eq!(first.items, vec![1, 2]);

		let last = paginator.page(items, 99);
		assert_eq!(last.number, 3);
		assert_eq!(last.items, vec![5]);
	}

	#[test]
	fn empty_set_has_one_empty_page() {
		let page = Paginator::new(10).page(Vec::<i32>::new(), 1);
		assert_eq!(page.number, 1);
		assert_eq!(page.num_pages, 1);
		assert!(page.items.is_empty());
		assert!(!page.has_previous());
		assert!(!page.has_next());
	}

	#[test]
	fn middle_page_links_both_ways() {
		let page = Paginator::new(2).page((1..=6).collect::<Vec<i32>>(), 2);
		assert!(page.has_previous());
		assert!(page.has_next());
		assert_eq!(page.previous_number(), 1);
		assert_eq!(page.next_number(), 3);
	}
}
