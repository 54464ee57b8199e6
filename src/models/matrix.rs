/// Bit-packed mask over an image, one bit per pixel.
///
/// Throughout the crate a set bit means the pixel was classified bright by
/// the brightness threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create an all-dark mask with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Build a mask by evaluating `predicate(x, y)` for every pixel
    pub fn from_fn<F>(width: usize, height: usize, mut predicate: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut matrix = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if predicate(x, y) {
                    matrix.set(x, y, true);
                }
            }
        }
        matrix
    }

    /// Mask width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y); out-of-range coordinates read as dark
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set bit at (x, y); out-of-range writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let byte_index = index / 8;
        let bit_index = index % 8;
        if value {
            self.data[byte_index] |= 1 << bit_index;
        } else {
            self.data[byte_index] &= !(1 << bit_index);
        }
    }

    /// Set every bit to `value`
    pub fn fill(&mut self, value: bool) {
        self.data.fill(if value { 0xFF } else { 0 });
        if value {
            self.mask_tail();
        }
    }

    /// Number of bright pixels
    pub fn count_set(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Total number of pixels covered by the mask
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// True when the mask covers no pixels
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Padding bits past the last pixel must stay zero for count_set.
    fn mask_tail(&mut self) {
        let used = self.len() % 8;
        if used != 0 {
            if let Some(last) = self.data.last_mut() {
                *last &= (1u8 << used) - 1;
            }
        }
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_matrix() {
        let mut matrix = BitMatrix::new(8, 8);
        assert_eq!(matrix.width(), 8);
        assert_eq!(matrix.height(), 8);

        matrix.set(3, 4, true);
        assert!(matrix.get(3, 4));
        assert!(!matrix.get(3, 3));
        assert_eq!(matrix.count_set(), 1);

        matrix.set(3, 4, false);
        assert!(!matrix.get(3, 4));
        assert_eq!(matrix.count_set(), 0);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut matrix = BitMatrix::new(8, 8);
        matrix.set(10, 10, true); // Should not panic
        assert!(!matrix.get(10, 10));
    }

    #[test]
    fn test_fill_ignores_padding_bits() {
        let mut matrix = BitMatrix::new(3, 3);
        matrix.fill(true);
        assert_eq!(matrix.count_set(), 9);
        matrix.fill(false);
        assert_eq!(matrix.count_set(), 0);
    }

    #[test]
    fn test_from_fn() {
        let matrix = BitMatrix::from_fn(4, 2, |x, y| x == y);
        assert!(matrix.get(0, 0));
        assert!(matrix.get(1, 1));
        assert!(!matrix.get(1, 0));
        assert_eq!(matrix.count_set(), 2);
    }
}
