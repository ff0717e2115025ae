use std::num::NonZeroU32;

/// Fixed page size for question listings.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// A 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Page(NonZeroU32);

impl Page {
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Returns `None` for page 0.
    #[must_use]
    pub fn new(number: u32) -> Option<Self> {
        NonZeroU32::new(number).map(Self)
    }

    /// Lenient conversion of a raw `page` query value.
    ///
    /// Missing, non-numeric, zero and negative values all fall back to page 1.
    /// A positive number too large for `u32` saturates, so it still lands past
    /// the last page.
    #[must_use]
    pub fn from_query(raw: Option<&str>) -> Self {
        raw.and_then(parse_page_number)
            .and_then(Self::new)
            .unwrap_or(Self::FIRST)
    }

    #[must_use]
    pub fn number(self) -> u32 {
        self.0.get()
    }

    #[must_use]
    pub fn window(self, page_size: usize) -> PageWindow {
        PageWindow::new(self, page_size)
    }
}

fn parse_page_number(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse::<u32>().unwrap_or(u32::MAX))
}

impl Default for Page {
    fn default() -> Self {
        Self::FIRST
    }
}

/// The `(offset, limit)` pair selected by a page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    offset: usize,
    limit: usize,
}

impl PageWindow {
    #[must_use]
    pub fn new(page: Page, page_size: usize) -> Self {
        let index = usize::try_from(page.number() - 1).unwrap_or(usize::MAX);
        Self {
            offset: index.saturating_mul(page_size),
            limit: page_size,
        }
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Exclusive end index, before clipping to any sequence.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.limit)
    }

    /// The part of `items` inside this window. Empty when the window starts past the end.
    #[must_use]
    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        if self.offset >= items.len() {
            return &[];
        }
        let end = self.end().min(items.len());
        &items[self.offset..end]
    }
}

/// Window an already-ordered sequence. Never re-sorts.
#[must_use]
pub fn paginate<T>(items: &[T], page: Page, page_size: usize) -> &[T] {
    page.window(page_size).apply(items)
}
