//! Raw depth buffers

use crate::error::DepthError;
use image::GrayImage;
use std::sync::Arc;

/// An immutable grid of 8-bit depth samples
///
/// Pixels may span several bytes (depth maps rendered to BGRA carry four);
/// samplers pick which byte of each pixel holds the intensity. Cloning is
/// cheap, the sample data is shared.
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    width: usize,
    height: usize,
    stride: usize,
    bytes_per_pixel: usize,
    data: Arc<[u8]>,
}

impl DepthBuffer {
    /// Wrap raw sample data
    ///
    /// `stride` is the distance in bytes between the starts of two rows.
    pub fn new(
        width: usize,
        height: usize,
        stride: usize,
        bytes_per_pixel: usize,
        data: impl Into<Arc<[u8]>>,
    ) -> Result<Self, DepthError> {
        let data = data.into();

        if width == 0 || height == 0 || data.is_empty() {
            return Err(DepthError::Empty);
        }
        if bytes_per_pixel == 0 {
            return Err(DepthError::InvalidChannel { offset: 0, bytes_per_pixel });
        }

        let row_bytes = width * bytes_per_pixel;
        if stride < row_bytes {
            return Err(DepthError::StrideTooSmall { stride, row_bytes });
        }

        let expected = (height - 1) * stride + row_bytes;
        if data.len() < expected {
            return Err(DepthError::Truncated { expected, actual: data.len() });
        }

        Ok(Self {
            width,
            height,
            stride,
            bytes_per_pixel,
            data,
        })
    }

    /// Wrap tightly packed rows
    pub fn packed(
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
        data: impl Into<Arc<[u8]>>,
    ) -> Result<Self, DepthError> {
        Self::new(width, height, width * bytes_per_pixel, bytes_per_pixel, data)
    }

    /// A buffer with the same intensity in every byte
    pub fn uniform(
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
        intensity: u8,
    ) -> Result<Self, DepthError> {
        let data = vec![intensity; width * height * bytes_per_pixel];
        Self::packed(width, height, bytes_per_pixel, data)
    }

    /// One byte per pixel from a grayscale image
    pub fn from_luma(image: &GrayImage) -> Result<Self, DepthError> {
        let (width, height) = image.dimensions();
        Self::packed(width as usize, height as usize, 1, image.as_raw().as_slice())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    /// Check that `channel` addresses a byte inside each pixel
    pub fn check_channel(&self, channel: usize) -> Result<(), DepthError> {
        if channel >= self.bytes_per_pixel {
            return Err(DepthError::InvalidChannel {
                offset: channel,
                bytes_per_pixel: self.bytes_per_pixel,
            });
        }
        Ok(())
    }

    /// Read one sample, clamping the coordinates into the buffer
    ///
    /// Returns `None` only for a channel outside the pixel.
    pub fn intensity(&self, x: usize, y: usize, channel: usize) -> Option<u8> {
        if channel >= self.bytes_per_pixel {
            return None;
        }
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.data
            .get(y * self.stride + x * self.bytes_per_pixel + channel)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_buffer() {
        let data: Vec<u8> = (0..12).collect();
        let buffer = DepthBuffer::packed(3, 2, 2, data).unwrap();

        assert_eq!(buffer.stride(), 6);
        assert_eq!(buffer.intensity(0, 0, 0), Some(0));
        assert_eq!(buffer.intensity(1, 0, 1), Some(3));
        assert_eq!(buffer.intensity(2, 1, 0), Some(10));
    }

    #[test]
    fn test_padded_stride() {
        // Two pixels per row plus two bytes of padding
        let data = vec![1u8, 2, 0, 0, 3, 4, 0, 0];
        let buffer = DepthBuffer::new(2, 2, 4, 1, data).unwrap();

        assert_eq!(buffer.intensity(0, 1, 0), Some(3));
        assert_eq!(buffer.intensity(1, 1, 0), Some(4));
    }

    #[test]
    fn test_last_row_may_skip_padding() {
        let data = vec![1u8, 2, 0, 0, 3, 4];
        assert!(DepthBuffer::new(2, 2, 4, 1, data).is_ok());
    }

    #[test]
    fn test_intensity_clamps_coordinates() {
        let data = vec![10u8, 20, 30, 40];
        let buffer = DepthBuffer::packed(2, 2, 1, data).unwrap();

        assert_eq!(buffer.intensity(9, 0, 0), Some(20));
        assert_eq!(buffer.intensity(0, 9, 0), Some(30));
        assert_eq!(buffer.intensity(9, 9, 0), Some(40));
        assert_eq!(buffer.intensity(0, 0, 1), None);
    }

    #[test]
    fn test_rejects_truncated_data() {
        let err = DepthBuffer::packed(4, 4, 4, vec![0u8; 10]).unwrap_err();
        assert_eq!(err, DepthError::Truncated { expected: 64, actual: 10 });
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(DepthBuffer::packed(0, 4, 4, vec![0u8; 4]).unwrap_err(), DepthError::Empty);
        assert_eq!(
            DepthBuffer::packed(2, 2, 1, Vec::<u8>::new()).unwrap_err(),
            DepthError::Empty
        );
    }

    #[test]
    fn test_rejects_short_stride() {
        let err = DepthBuffer::new(4, 1, 8, 4, vec![0u8; 16]).unwrap_err();
        assert_eq!(err, DepthError::StrideTooSmall { stride: 8, row_bytes: 16 });
    }

    #[test]
    fn test_from_luma() {
        let image = GrayImage::from_raw(2, 1, vec![160, 210]).unwrap();
        let buffer = DepthBuffer::from_luma(&image).unwrap();

        assert_eq!(buffer.bytes_per_pixel(), 1);
        assert_eq!(buffer.intensity(1, 0, 0), Some(210));
    }
}
