/// Bit-packed binary image; `true` marks a foreground pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Mask {
    /// Create an all-background mask with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Build a mask by evaluating `f(x, y)` for every pixel
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if f(x, y) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    /// Get mask width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get mask height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Foreground test at (x, y); anything outside the mask is background
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set the pixel at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let bit = 1 << (index % 8);
        if value {
            self.data[index / 8] |= bit;
        } else {
            self.data[index / 8] &= !bit;
        }
    }

    /// Number of foreground pixels
    pub fn count_foreground(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// True when no pixel is foreground
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }
}

impl Default for Mask {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
