//! Filtering, search and pagination over a store snapshot.
//!
//! Everything here is pure: it takes an owned snapshot and returns a new
//! value. Filters and search keep the snapshot's insertion order, and
//! callers paginate after filtering.

use serde::Serialize;

use crate::error::ApiError;
use crate::product::Product;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// Keeps products whose category equals `category`, ignoring case. An absent
/// or empty filter keeps everything.
pub fn filter_by_category(mut items: Vec<Product>, category: Option<&str>) -> Vec<Product> {
    if let Some(category) = category.filter(|c| !c.is_empty()) {
        let wanted = category.to_lowercase();
        items.retain(|p| p.category.to_lowercase() == wanted);
    }
    items
}

/// Keeps products whose stock flag matches. Only the exact string `"true"`
/// means in stock; any other present value means out of stock.
pub fn filter_by_stock(mut items: Vec<Product>, flag: Option<&str>) -> Vec<Product> {
    if let Some(flag) = flag {
        let wanted = flag == "true";
        items.retain(|p| p.in_stock == wanted);
    }
    items
}

/// A validated page window request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    /// Absent or non-numeric values fall back to page 1, limit 10.
    ///
    /// A numeric value is an optionally signed run of digits, optionally
    /// followed by a fractional part that is truncated away. Integers too
    /// large for `usize` saturate. Anything below 1 is rejected.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, ApiError> {
        Ok(Self {
            page: count_or(page, DEFAULT_PAGE)?,
            limit: count_or(limit, DEFAULT_LIMIT)?,
        })
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT }
    }
}

fn count_or(raw: Option<&str>, default: usize) -> Result<usize, ApiError> {
    let Some(raw) = raw.map(str::trim) else {
        return Ok(default);
    };
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !digits(whole) || !digits(fraction) {
        return Ok(default);
    }

    // Only overflow can fail once the input is known to be all digits.
    let value = whole.parse::<usize>().unwrap_or(usize::MAX);
    if negative || value == 0 {
        return Err(ApiError::InvalidPagination);
    }
    Ok(value)
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_products: usize,
    pub products_per_page: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

#[derive(Debug, Serialize)]
pub struct Page {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

/// Cuts `items[(page-1)*limit .. page*limit]`. A page past the end is empty
/// but still reports the totals.
pub fn paginate(items: Vec<Product>, req: PageRequest) -> Page {
    let PageRequest { page, limit } = req;
    let total = items.len();
    let start = (page - 1).saturating_mul(limit);
    let end = start.saturating_add(limit);
    let products = items.into_iter().skip(start).take(limit).collect();
    Page {
        products,
        pagination: Pagination {
            current_page: page,
            total_pages: total.div_ceil(limit),
            total_products: total,
            products_per_page: limit,
            has_next_page: end < total,
            has_prev_page: page > 1,
        },
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub search_term: String,
    pub results: Vec<Product>,
    pub count: usize,
}

/// Case-insensitive substring match on name or description. The term is
/// matched as given, surrounding whitespace included.
pub fn search(items: Vec<Product>, term: Option<&str>) -> Result<SearchResults, ApiError> {
    let term = term.filter(|t| !t.is_empty()).ok_or(ApiError::MissingQuery)?;
    let needle = term.to_lowercase();
    let results: Vec<_> = items
        .into_iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .collect();
    Ok(SearchResults { search_term: term.to_owned(), count: results.len(), results })
}
