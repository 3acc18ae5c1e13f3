use std::mem;

use super::{Dot, Image};
use crate::error::Error;

/// Output buffer owned by a single conversion.
///
/// A target is acquired for the dimensions of one raster, filled, and handed
/// out with [`RenderTarget::finish`]. Afterwards it is empty again and can be
/// acquired for the next conversion.
#[derive(Debug, Default)]
pub struct RenderTarget {
    width: u32,
    height: u32,
    dots: Vec<Dot>,
}

impl RenderTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sizes the buffer for a `width` x `height` raster and returns it zeroed.
    pub fn acquire(&mut self, width: u32, height: u32) -> crate::Result<&mut [Dot]> {
        let unavailable = || Error::RenderingUnavailable { width, height };
        let number_of_dots = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(unavailable)?;
        number_of_dots
            .checked_mul(mem::size_of::<Dot>())
            .ok_or_else(unavailable)?;
        self.dots.clear();
        self.dots
            .try_reserve_exact(number_of_dots)
            .map_err(|_| unavailable())?;
        self.dots.resize(number_of_dots, Dot::default());
        self.width = width;
        self.height = height;
        Ok(&mut self.dots)
    }

    pub fn is_acquired(&self) -> bool {
        !self.dots.is_empty()
    }

    /// Hands the rendered raster out and releases the target.
    pub fn finish(&mut self) -> Image {
        let dots = mem::take(&mut self.dots);
        let image = Image {
            width: self.width,
            height: self.height,
            dots,
        };
        self.width = 0;
        self.height = 0;
        image
    }
}

#[cfg(test)]
mod test {
    use super::RenderTarget;
    use crate::error::Error;

    #[test]
    fn acquire_and_finish() {
        let mut target = RenderTarget::new();
        let dots = target.acquire(3, 2).unwrap();
        assert_eq!(dots.len(), 6);
        dots[5] = [1, 2, 3, 4];
        assert!(target.is_acquired());
        let image = target.finish();
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(image.dot(2, 1), [1, 2, 3, 4]);
        assert!(!target.is_acquired());
    }

    #[test]
    fn reacquire_starts_zeroed() {
        let mut target = RenderTarget::new();
        target.acquire(1, 1).unwrap()[0] = [9, 9, 9, 9];
        let dots = target.acquire(2, 1).unwrap();
        assert_eq!(dots, &[[0, 0, 0, 0], [0, 0, 0, 0]]);
    }

    #[test]
    fn oversized_target_is_unavailable() {
        let mut target = RenderTarget::new();
        match target.acquire(u32::MAX, u32::MAX) {
            Err(Error::RenderingUnavailable { width, height }) => {
                assert_eq!(width, u32::MAX);
                assert_eq!(height, u32::MAX);
            }
            other => panic!("Oversized target was acquired: {:?}", other.map(|d| d.len())),
        }
        assert!(!target.is_acquired());
    }
}
