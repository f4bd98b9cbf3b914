//! Splitting an already computed result list into fixed-size pages.

use crate::error::{Result, SearchError};
use std::fmt;
use std::ops::Deref;
use std::slice::Chunks;

/// One contiguous page. Displays as its items back to back.
#[derive(Debug)]
pub struct Page<'a, T>(&'a [T]);

impl<T> Clone for Page<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Page<'_, T> {}

impl<T> Deref for Page<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.0
    }
}

impl<T: fmt::Display> fmt::Display for Page<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|item| write!(f, "{item}"))
    }
}

#[derive(Debug)]
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: usize,
}

impl<'a, T> Paginator<'a, T> {
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages; the last one may be short.
    pub fn len(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pages are produced on demand; every call starts again from the first page.
    pub fn iter(&self) -> Pages<'a, T> {
        Pages { chunks: self.items.chunks(self.page_size) }
    }
}

impl<'a, T> IntoIterator for &Paginator<'a, T> {
    type Item = Page<'a, T>;
    type IntoIter = Pages<'a, T>;

    fn into_iter(self) -> Pages<'a, T> {
        self.iter()
    }
}

#[derive(Debug)]
pub struct Pages<'a, T> {
    chunks: Chunks<'a, T>,
}

impl<'a, T> Iterator for Pages<'a, T> {
    type Item = Page<'a, T>;

    fn next(&mut self) -> Option<Page<'a, T>> {
        self.chunks.next().map(Page)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl<T> ExactSizeIterator for Pages<'_, T> {}

/// Fails on a zero page size or an empty item list.
pub fn paginate<T>(items: &[T], page_size: usize) -> Result<Paginator<'_, T>> {
    if page_size == 0 {
        return Err(SearchError::invalid("page size must be positive"));
    }
    if items.is_empty() {
        return Err(SearchError::invalid("nothing to paginate"));
    }
    Ok(Paginator { items, page_size })
}
