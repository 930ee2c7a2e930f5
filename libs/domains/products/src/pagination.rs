//! Page requests and page results for product listings.
//!
//! A listing is requested as `?categoryId=&page=&size=&sort=`. Defaults are
//! page 0, size 20, sorted by name ascending. An explicit `size` must be in
//! `1..=100`; it replaces the default size and keeps page and sort.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

use crate::error::{ProductError, ProductResult};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Product fields a listing can be ordered by
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortProperty {
    Id,
    #[default]
    Name,
    Price,
}

/// Sort specification, written as `property` or `property,direction`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub property: SortProperty,
    pub direction: Direction,
}

impl Sort {
    pub fn new(property: SortProperty, direction: Direction) -> Self {
        Self {
            property,
            direction,
        }
    }
}

impl FromStr for Sort {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ',').map(str::trim);

        let property = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ProductError::InvalidArgument("sort property is empty".to_string()))?;
        let property = property.parse::<SortProperty>().map_err(|_| {
            ProductError::InvalidArgument(format!(
                "cannot sort by '{}'; expected one of id, name, price",
                property
            ))
        })?;

        let direction = match parts.next() {
            None => Direction::default(),
            Some(d) => d.parse::<Direction>().map_err(|_| {
                ProductError::InvalidArgument(format!(
                    "invalid sort direction '{}'; expected asc or desc",
                    d
                ))
            })?,
        };

        Ok(Self::new(property, direction))
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.property, self.direction)
    }
}

/// Page number (0-based), page size and sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pageable {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

impl Default for Pageable {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Sort::default(),
        }
    }
}

impl Pageable {
    pub fn new(page: u32, size: u32, sort: Sort) -> Self {
        Self { page, size, sort }
    }

    /// Same page number and sort, different size.
    pub fn with_size(self, size: u32) -> Self {
        Self { size, ..self }
    }

    /// Number of elements preceding this page.
    pub fn offset(&self) -> usize {
        self.page as usize * self.size as usize
    }
}

/// Query string of the product listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Category whose products are listed
    pub category_id: i64,
    /// 0-based page number; negative values are treated as 0
    pub page: Option<i64>,
    /// Page size between 1 and 100 (default 20)
    pub size: Option<i64>,
    /// `property[,asc|desc]` where property is id, name or price (default `name,asc`)
    pub sort: Option<String>,
}

impl PageParams {
    /// Build the page request: framework defaults first, then the explicit
    /// size override, which is bounds-checked.
    pub fn to_pageable(&self) -> ProductResult<Pageable> {
        let page = self
            .page
            .map(|p| p.clamp(0, i64::from(u32::MAX)) as u32)
            .unwrap_or(0);
        let sort = match self.sort.as_deref() {
            Some(s) => s.parse::<Sort>()?,
            None => Sort::default(),
        };
        let pageable = Pageable::new(page, DEFAULT_PAGE_SIZE, sort);

        match self.size {
            Some(size) => Ok(pageable.with_size(validate_page_size(size)?)),
            None => Ok(pageable),
        }
    }
}

fn validate_page_size(size: i64) -> ProductResult<u32> {
    if (1..=i64::from(MAX_PAGE_SIZE)).contains(&size) {
        Ok(size as u32)
    } else {
        Err(ProductError::InvalidArgument(format!(
            "size must be between 1 and {}, got {}",
            MAX_PAGE_SIZE, size
        )))
    }
}

/// One page of results plus paging metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, pageable: &Pageable, total_elements: u64) -> Self {
        let size = u64::from(pageable.size.max(1));
        let total_pages = total_elements.div_ceil(size);

        Self {
            content,
            page: pageable.page,
            size: pageable.size,
            total_elements,
            total_pages,
            has_next: u64::from(pageable.page) + 1 < total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            has_next: self.has_next,
        }
    }
}
