//! Editing state for the resize/rotate tool.
//!
//! An [`EditSession`] owns the loaded source image and the pending edit: target
//! size, keep-ratio flag and rotation. Loads are tracked by generation so a
//! slow decode that finishes after a newer one started is dropped instead of
//! replacing the newer image.

use crate::decode::{DecodeError, RasterImage};
use crate::encode::EncodedImage;
use crate::pipeline::resize_then_rotate_with;
use crate::transform::{TransformError, TransformOptions};

/// Step used by [`EditSession::rotate_right`] and [`EditSession::rotate_left`].
pub const ROTATION_STEP: u32 = 90;

/// Generation number for a pending load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Caller-owned state for one image being edited.
#[derive(Debug, Clone)]
pub struct EditSession {
    source: Option<RasterImage>,
    original_width: u32,
    original_height: u32,
    width: u32,
    height: u32,
    keep_ratio: bool,
    rotation: u32,
    generation: u64,
    options: TransformOptions,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    /// Empty session with keep-ratio on and no rotation.
    pub fn new() -> Self {
        Self::with_options(TransformOptions::default())
    }

    pub fn with_options(options: TransformOptions) -> Self {
        Self {
            source: None,
            original_width: 0,
            original_height: 0,
            width: 0,
            height: 0,
            keep_ratio: true,
            rotation: 0,
            generation: 0,
            options,
        }
    }

    /// Start a new load. Any ticket handed out earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Whether `ticket` belongs to the most recent [`begin_load`](Self::begin_load).
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Complete a load started with `ticket`.
    ///
    /// Returns `Ok(true)` if the image was installed and `Ok(false)` if the
    /// ticket was stale, in which case `result` is dropped whether it
    /// succeeded or not. Installing resets the target size to the image's
    /// natural size.
    ///
    /// # Errors
    ///
    /// Returns the decode error of a current load. The session keeps its
    /// previous image in that case.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<RasterImage, DecodeError>,
    ) -> Result<bool, DecodeError> {
        if !self.is_current(ticket) {
            log::warn!(
                "Discarding load {} superseded by load {}",
                ticket.0,
                self.generation
            );
            return Ok(false);
        }

        let image = result?;
        self.install(image);
        Ok(true)
    }

    /// Install an already decoded image, superseding any pending load.
    pub fn load(&mut self, image: RasterImage) {
        self.begin_load();
        self.install(image);
    }

    fn install(&mut self, image: RasterImage) {
        self.original_width = image.natural_width();
        self.original_height = image.natural_height();
        self.width = self.original_width;
        self.height = self.original_height;
        log::debug!(
            "Session loaded {}x{} {} image",
            self.original_width,
            self.original_height,
            image.format().label()
        );
        self.source = Some(image);
    }

    pub fn source(&self) -> Option<&RasterImage> {
        self.source.as_ref()
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Natural size of the loaded image, `(0, 0)` before the first load.
    pub fn original_size(&self) -> (u32, u32) {
        (self.original_width, self.original_height)
    }

    /// Pending target width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pending target height.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn keep_ratio(&self) -> bool {
        self.keep_ratio
    }

    pub fn set_keep_ratio(&mut self, keep_ratio: bool) {
        self.keep_ratio = keep_ratio;
    }

    /// Rotation in degrees, always one of 0, 90, 180 or 270.
    pub fn rotation(&self) -> u32 {
        self.rotation
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: TransformOptions) {
        self.options = options;
    }

    /// Set the target width; with keep-ratio on the height follows.
    pub fn set_width(&mut self, width: u32) {
        if self.keep_ratio && self.original_width > 0 && self.original_height > 0 {
            self.height = scale_side(width, self.original_height, self.original_width);
        }
        self.width = width;
    }

    /// Set the target height; with keep-ratio on the width follows.
    pub fn set_height(&mut self, height: u32) {
        if self.keep_ratio && self.original_width > 0 && self.original_height > 0 {
            self.width = scale_side(height, self.original_width, self.original_height);
        }
        self.height = height;
    }

    /// Restore the target size to the natural size of the loaded image.
    pub fn reset_size(&mut self) {
        self.width = self.original_width;
        self.height = self.original_height;
    }

    pub fn rotate_right(&mut self) {
        self.rotation = (self.rotation + ROTATION_STEP) % 360;
    }

    pub fn rotate_left(&mut self) {
        self.rotation = (self.rotation + 360 - ROTATION_STEP) % 360;
    }

    pub fn reset_rotation(&mut self) {
        self.rotation = 0;
    }

    /// Render the pending edit, or `None` if nothing is loaded yet.
    pub fn render(&self) -> Result<Option<EncodedImage>, TransformError> {
        let Some(source) = &self.source else {
            return Ok(None);
        };

        resize_then_rotate_with(
            source,
            self.width,
            self.height,
            self.rotation as f64,
            &self.options,
        )
        .map(Some)
    }
}

/// `value * numerator / denominator`, rounded to the nearest pixel, at least 1.
fn scale_side(value: u32, numerator: u32, denominator: u32) -> u32 {
    let scaled = (value as f64 * numerator as f64 / denominator as f64).round();
    scaled.clamp(1.0, u32::MAX as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ImageFormat;
    use crate::encode::OutputFormat;
    use crate::test_support::raster;

    fn loaded(width: u32, height: u32) -> EditSession {
        let mut session = EditSession::new();
        session.load(raster(width, height, ImageFormat::Png));
        session
    }

    #[test]
    fn test_new_session_defaults() {
        let session = EditSession::new();

        assert!(!session.has_source());
        assert!(session.keep_ratio());
        assert_eq!(session.rotation(), 0);
        assert_eq!(session.original_size(), (0, 0));
        assert!(session.render().unwrap().is_none());
    }

    #[test]
    fn test_load_sets_target_to_natural_size() {
        let session = loaded(100, 50);

        assert_eq!(session.original_size(), (100, 50));
        assert_eq!((session.width(), session.height()), (100, 50));
    }

    #[test]
    fn test_finish_load_installs_current_ticket() {
        let mut session = EditSession::new();
        let ticket = session.begin_load();

        let installed = session
            .finish_load(ticket, Ok(raster(8, 4, ImageFormat::Png)))
            .unwrap();

        assert!(installed);
        assert_eq!(session.original_size(), (8, 4));
    }

    #[test]
    fn test_superseded_load_is_discarded() {
        let mut session = EditSession::new();
        let slow = session.begin_load();
        let fast = session.begin_load();

        assert!(session
            .finish_load(fast, Ok(raster(20, 10, ImageFormat::Png)))
            .unwrap());
        assert!(!session
            .finish_load(slow, Ok(raster(99, 99, ImageFormat::Png)))
            .unwrap());

        assert_eq!(session.original_size(), (20, 10));
    }

    #[test]
    fn test_superseded_failure_is_discarded() {
        let mut session = EditSession::new();
        let slow = session.begin_load();
        let _fast = session.begin_load();

        assert!(!session.finish_load(slow, Err(DecodeError::Empty)).unwrap());
    }

    #[test]
    fn test_current_failure_keeps_previous_image() {
        let mut session = loaded(30, 15);
        let ticket = session.begin_load();

        let result = session.finish_load(ticket, Err(DecodeError::InvalidFormat));

        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
        assert_eq!(session.original_size(), (30, 15));
    }

    #[test]
    fn test_keep_ratio_follows_width() {
        let mut session = loaded(100, 50);
        session.set_width(50);
        assert_eq!((session.width(), session.height()), (50, 25));

        session.set_width(33);
        assert_eq!((session.width(), session.height()), (33, 17));
    }

    #[test]
    fn test_keep_ratio_follows_height() {
        let mut session = loaded(100, 50);
        session.set_height(10);
        assert_eq!((session.width(), session.height()), (20, 10));
    }

    #[test]
    fn test_keep_ratio_clamps_to_one_pixel() {
        let mut session = loaded(1000, 10);
        session.set_width(20);
        assert_eq!(session.height(), 1);
    }

    #[test]
    fn test_free_ratio() {
        let mut session = loaded(100, 50);
        session.set_keep_ratio(false);
        session.set_width(10);
        assert_eq!((session.width(), session.height()), (10, 50));
    }

    #[test]
    fn test_reset_size() {
        let mut session = loaded(100, 50);
        session.set_width(10);
        session.reset_size();
        assert_eq!((session.width(), session.height()), (100, 50));
    }

    #[test]
    fn test_rotation_wraps() {
        let mut session = EditSession::new();

        session.rotate_left();
        assert_eq!(session.rotation(), 270);

        for _ in 0..4 {
            session.rotate_right();
        }
        assert_eq!(session.rotation(), 270);

        session.rotate_right();
        assert_eq!(session.rotation(), 0);

        session.rotate_right();
        session.reset_rotation();
        assert_eq!(session.rotation(), 0);
    }

    #[test]
    fn test_render_applies_size_then_rotation() {
        let mut session = loaded(100, 50);
        session.set_width(50);
        session.rotate_right();

        let encoded = session.render().unwrap().unwrap();
        assert_eq!(encoded.format(), OutputFormat::Png);
        assert_eq!((encoded.width(), encoded.height()), (25, 50));
    }

    #[test]
    fn test_render_rejects_zero_size() {
        let mut session = loaded(100, 50);
        session.set_keep_ratio(false);
        session.set_width(0);

        assert!(matches!(
            session.render(),
            Err(TransformError::InvalidDimensions { .. })
        ));
    }
}
