/// Tracks which photo of the active profile is displayed
///
/// Independent of the outer card gesture; the index always satisfies
/// `0 <= index < len` and resets to 0 whenever the active profile changes.
/// Stepping past either end saturates rather than wrapping.
#[derive(Debug, Clone, Copy)]
pub struct PhotoCarousel {
    index: usize,
    len: usize,
}

impl PhotoCarousel {
    pub fn new(photo_count: usize) -> Self {
        Self {
            index: 0,
            // Normalized profiles always carry at least one photo
            len: photo_count.max(1),
        }
    }

    /// The active profile changed; start over on its first photo
    pub fn show_profile(&mut self, photo_count: usize) {
        self.index = 0;
        self.len = photo_count.max(1);
    }

    pub fn next(&mut self) -> usize {
        if self.index + 1 < self.len {
            self.index += 1;
        }
        self.index
    }

    pub fn prev(&mut self) -> usize {
        self.index = self.index.saturating_sub(1);
        self.index
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn photo_count(&self) -> usize {
        self.len
    }
}

impl Default for PhotoCarousel {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_saturates_at_last_photo() {
        let mut carousel = PhotoCarousel::new(3);
        assert_eq!(carousel.next(), 1);
        assert_eq!(carousel.next(), 2);
        assert_eq!(carousel.next(), 2);
    }

    #[test]
    fn test_prev_saturates_at_first_photo() {
        let mut carousel = PhotoCarousel::new(3);
        carousel.next();
        assert_eq!(carousel.prev(), 0);
        assert_eq!(carousel.prev(), 0);
    }

    #[test]
    fn test_profile_change_resets_index() {
        let mut carousel = PhotoCarousel::new(4);
        carousel.next();
        carousel.next();

        carousel.show_profile(2);
        assert_eq!(carousel.index(), 0);
        assert_eq!(carousel.photo_count(), 2);
    }

    #[test]
    fn test_zero_photos_clamped_to_one() {
        let mut carousel = PhotoCarousel::new(0);
        assert_eq!(carousel.photo_count(), 1);
        assert_eq!(carousel.next(), 0);
    }
}
