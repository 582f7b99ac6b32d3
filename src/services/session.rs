//! Interactive editing state around a [`FilterChain`].
//!
//! The session owns the pristine original image and re-renders from it
//! after every change. Removed filters go onto a redo stack; selecting a
//! new filter discards that stack.

use pixel_filters::{
    ChannelWeights, Filter, FilterChain, FilterError, Grayscale, ImageFilter, PixelBuffer,
};

#[derive(Debug, Default)]
pub struct EditorSession {
    original: Option<PixelBuffer>,
    chain: FilterChain,
    removed: Vec<Filter>,
    grayscale: bool,
    rendered: Option<PixelBuffer>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an image with a chain and grayscale setting already chosen,
    /// rendering once.
    pub fn with_chain(
        image: PixelBuffer,
        filters: impl IntoIterator<Item = Filter>,
        grayscale: bool,
    ) -> Result<Self, FilterError> {
        let mut session = Self {
            original: Some(image.to_packed()),
            chain: filters.into_iter().collect(),
            grayscale,
            ..Self::default()
        };
        session.refresh()?;
        Ok(session)
    }

    /// Replace the original image and render the current chain on it.
    pub fn load(&mut self, image: PixelBuffer) -> Result<&PixelBuffer, FilterError> {
        self.original = Some(image.to_packed());
        self.refresh()
    }

    pub fn original(&self) -> Option<&PixelBuffer> {
        self.original.as_ref()
    }

    /// Result of the last render, if an image is loaded.
    pub fn rendered(&self) -> Option<&PixelBuffer> {
        self.rendered.as_ref()
    }

    pub fn chain(&self) -> &FilterChain {
        &self.chain
    }

    pub fn redo_len(&self) -> usize {
        self.removed.len()
    }

    pub fn grayscale(&self) -> bool {
        self.grayscale
    }

    /// Append a filter. Clears the redo stack.
    pub fn select(&mut self, filter: impl Into<Filter>) -> Result<&PixelBuffer, FilterError> {
        self.select_all([filter.into()])
    }

    /// Append several filters with a single re-render. Clears the redo stack.
    pub fn select_all(
        &mut self,
        filters: impl IntoIterator<Item = Filter>,
    ) -> Result<&PixelBuffer, FilterError> {
        self.require_image()?;
        self.chain.extend(filters);
        self.removed.clear();
        self.refresh()
    }

    /// Remove the filter at `index` onto the redo stack.
    ///
    /// An index past the end leaves the chain unchanged.
    pub fn remove(&mut self, index: usize) -> Result<&PixelBuffer, FilterError> {
        self.require_image()?;
        match self.chain.remove(index) {
            Some(filter) => {
                tracing::debug!(index, filter = %filter.label(), "Removed filter");
                self.removed.push(filter);
            }
            None => tracing::warn!(index, len = self.chain.len(), "No filter to remove"),
        }
        self.refresh()
    }

    /// Re-append every removed filter in removal order.
    pub fn redo(&mut self) -> Result<&PixelBuffer, FilterError> {
        self.require_image()?;
        let removed = std::mem::take(&mut self.removed);
        tracing::debug!(count = removed.len(), "Restoring removed filters");
        self.chain.extend(removed);
        self.refresh()
    }

    /// Toggle the grayscale pass that runs before the chain.
    pub fn set_grayscale(&mut self, on: bool) -> Result<&PixelBuffer, FilterError> {
        self.require_image()?;
        self.grayscale = on;
        self.refresh()
    }

    /// Drop every filter and the redo stack.
    pub fn reset(&mut self) -> Result<&PixelBuffer, FilterError> {
        self.require_image()?;
        self.chain.clear();
        self.removed.clear();
        self.refresh()
    }

    fn require_image(&self) -> Result<(), FilterError> {
        match self.original {
            Some(_) => Ok(()),
            None => Err(FilterError::NullSource),
        }
    }

    fn refresh(&mut self) -> Result<&PixelBuffer, FilterError> {
        let original = self.original.as_ref().ok_or(FilterError::NullSource)?;
        let output = if self.grayscale {
            let base = Grayscale::new(ChannelWeights::LUMA).apply(original);
            self.chain.apply(Some(&base))?
        } else {
            self.chain.apply(Some(original))?
        };
        Ok(self.rendered.insert(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_filters::{Brightness, Invert};
    use pretty_assertions::assert_eq;

    fn image() -> PixelBuffer {
        PixelBuffer::filled(2, 2, [10, 20, 30, 255])
    }

    #[test]
    fn test_changes_without_image_fail() {
        let mut session = EditorSession::new();
        assert_eq!(session.select(Invert).unwrap_err(), FilterError::NullSource);
        assert_eq!(session.redo().unwrap_err(), FilterError::NullSource);
        assert!(session.chain().is_empty());
    }

    #[test]
    fn test_empty_chain_renders_original() {
        let mut session = EditorSession::new();
        let out = session.load(image()).unwrap().clone();
        assert_eq!(out, image());
    }

    #[test]
    fn test_with_chain_matches_step_by_step_edits() {
        let filters = vec![Filter::from(Invert), Filter::brightness(5)];
        let session = EditorSession::with_chain(image(), filters.clone(), true).unwrap();

        let mut stepped = EditorSession::new();
        stepped.load(image()).unwrap();
        stepped.set_grayscale(true).unwrap();
        stepped.select_all(filters).unwrap();

        assert_eq!(session.rendered(), stepped.rendered());
        assert_eq!(session.chain().len(), 2);
        assert!(session.grayscale());
        // 255 - 22 + 5
        assert_eq!(session.rendered().unwrap().pixel(0, 0).unwrap(), [238, 238, 238, 255]);
    }

    #[test]
    fn test_select_clears_redo() {
        let mut session = EditorSession::new();
        session.load(image()).unwrap();
        session.select(Invert).unwrap();
        session.remove(0).unwrap();
        assert_eq!(session.redo_len(), 1);

        session.select(Brightness::new(5)).unwrap();
        assert_eq!(session.redo_len(), 0);
        assert_eq!(session.chain().labels(), vec!["Brightness +5"]);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut session = EditorSession::new();
        session.load(image()).unwrap();
        session.select(Invert).unwrap();
        session.remove(3).unwrap();
        assert_eq!(session.chain().len(), 1);
        assert_eq!(session.redo_len(), 0);
    }

    #[test]
    fn test_grayscale_base_runs_before_chain() {
        let mut session = EditorSession::new();
        session.load(image()).unwrap();
        let gray = session.set_grayscale(true).unwrap().clone();
        // 0.3 * 30 + 0.59 * 20 + 0.11 * 10 = 21.9
        assert_eq!(gray.pixel(0, 0).unwrap(), [22, 22, 22, 255]);

        let out = session.select(Invert).unwrap();
        assert_eq!(out.pixel(0, 0).unwrap(), [233, 233, 233, 255]);
    }
}
