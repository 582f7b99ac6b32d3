//! Ordered filter composition.
//!
//! A [`FilterChain`] never keeps intermediate results. Every call to
//! [`FilterChain::apply`] starts again from the pristine original, so
//! removing a filter anywhere in the chain leaves no trace of it.

use std::time::Instant;

use tracing::{debug, info};

use crate::buffer::PixelBuffer;
use crate::error::FilterError;
use crate::filter::{Filter, ImageFilter};

/// An ordered list of filters applied left to right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChain {
    filters: Vec<Filter>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, filter: impl Into<Filter>) {
        self.filters.push(filter.into());
    }

    /// Insert at `index`, shifting later filters. Panics if `index > len`.
    pub fn insert(&mut self, index: usize, filter: impl Into<Filter>) {
        self.filters.insert(index, filter.into());
    }

    /// Remove and return the filter at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<Filter> {
        if index < self.filters.len() {
            Some(self.filters.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Filter> {
        self.filters.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.filters.iter()
    }

    pub fn labels(&self) -> Vec<String> {
        self.filters.iter().map(ImageFilter::label).collect()
    }

    /// Run every filter in order, starting from `original`.
    ///
    /// Returns [`FilterError::NullSource`] when no image is loaded. An empty
    /// chain yields a packed copy of the original.
    pub fn apply(&self, original: Option<&PixelBuffer>) -> Result<PixelBuffer, FilterError> {
        let original = original.ok_or(FilterError::NullSource)?;
        let started = Instant::now();

        let mut current = original.to_packed();
        for filter in &self.filters {
            let step = Instant::now();
            current = filter.apply(&current);
            debug!(
                filter = %filter.label(),
                width = current.width(),
                height = current.height(),
                elapsed_ms = step.elapsed().as_millis() as u64,
                "Applied filter"
            );
        }

        info!(
            filters = self.filters.len(),
            width = original.width(),
            height = original.height(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Applied filter chain"
        );
        Ok(current)
    }
}

impl FromIterator<Filter> for FilterChain {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

impl Extend<Filter> for FilterChain {
    fn extend<I: IntoIterator<Item = Filter>>(&mut self, iter: I) {
        self.filters.extend(iter);
    }
}

impl<'a> IntoIterator for &'a FilterChain {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}
