//! Page requests and the paged response envelope.
//!
//! # Invariants
//! - `page_size` is always within `1..=MAX_PAGE_SIZE` once a `PageRequest` exists.
//! - Envelope flags are derived only from `page_number`, `page_size`,
//!   `total_elements` and the returned content length.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_NUMBER: u32 = 0;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_SORT_BY: &str = "id";
pub const DEFAULT_SORT_DIR: &str = "asc";

/// Sort order for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any letter case selects descending; anything else is ascending.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Post columns a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSortField {
    #[default]
    Id,
    Title,
    Description,
    Content,
}

impl PostSortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "description" => Some(Self::Description),
            "content" => Some(Self::Content),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Description => "description",
            Self::Content => "content",
        }
    }
}

/// Validated page window plus ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
    pub sort_field: PostSortField,
    pub direction: SortDirection,
}

impl PageRequest {
    /// Builds a request, returning `None` when `page_size` is outside `1..=MAX_PAGE_SIZE`.
    pub fn new(
        page_number: u32,
        page_size: u32,
        sort_field: PostSortField,
        direction: SortDirection,
    ) -> Option<Self> {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return None;
        }
        Some(Self {
            page_number,
            page_size,
            sort_field,
            direction,
        })
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Row offset of the first element on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number) * u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
            sort_field: PostSortField::default(),
            direction: SortDirection::default(),
        }
    }
}

/// One page of results with pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number_of_elements: usize,
    pub first_page: bool,
    pub last_page: bool,
    pub empty: bool,
    pub has_next: bool,
    pub has_previous: bool,
    pub has_content: bool,
}

impl<T> Page<T> {
    /// Wraps `content` fetched for `request` out of `total_elements` rows.
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let page_size = u64::from(request.page_size());
        let total_pages = total_elements.div_ceil(page_size);
        let has_previous = request.page_number() > 0;
        let has_next = u64::from(request.page_number()) + 1 < total_pages;
        let number_of_elements = content.len();

        Self {
            content,
            page_number: request.page_number(),
            page_size: request.page_size(),
            total_elements,
            total_pages,
            number_of_elements,
            first_page: !has_previous,
            last_page: !has_next,
            empty: number_of_elements == 0,
            has_next,
            has_previous,
            has_content: number_of_elements > 0,
        }
    }

    /// Converts the content while keeping every metadata field.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number_of_elements: self.number_of_elements,
            first_page: self.first_page,
            last_page: self.last_page,
            empty: self.empty,
            has_next: self.has_next,
            has_previous: self.has_previous,
            has_content: self.has_content,
        }
    }
}
