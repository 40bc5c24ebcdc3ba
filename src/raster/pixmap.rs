use crate::foundation::{
    core::{Rgba8Premul, SurfaceSize},
    error::{FractalineError, FractalineResult},
};

/// A premultiplied RGBA8 raster buffer.
///
/// All drawing in the engine happens on pixmaps: the source drawing, the two
/// fractal buffers and the editor overlay are each one of these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pixmap {
    size: SurfaceSize,
    data: Vec<u8>,
}

impl Pixmap {
    /// A fully transparent pixmap of the given size.
    pub fn new(size: SurfaceSize) -> Self {
        let len = size.width as usize * size.height as usize * 4;
        Self {
            size,
            data: vec![0; len],
        }
    }

    /// Wrap an existing premultiplied RGBA8 buffer. Fails when the byte
    /// length does not match `width * height * 4`.
    pub fn from_rgba8(size: SurfaceSize, data: Vec<u8>) -> FractalineResult<Self> {
        let expected = size.width as usize * size.height as usize * 4;
        if data.len() != expected {
            return Err(FractalineError::raster(format!(
                "pixmap byte length {} does not match {}x{} surface",
                data.len(),
                size.width,
                size.height
            )));
        }
        Ok(Self { size, data })
    }

    /// Surface dimensions.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// The raw premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the raw bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Fill every pixel with `color`.
    pub fn fill(&mut self, color: Rgba8Premul) {
        let px = color.to_array();
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Pixel at `(x, y)`. Out-of-bounds reads are transparent.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8Premul {
        if x >= self.size.width || y >= self.size.height {
            return Rgba8Premul::transparent();
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        Rgba8Premul {
            r: self.data[i],
            g: self.data[i + 1],
            b: self.data[i + 2],
            a: self.data[i + 3],
        }
    }

    /// Store `color` at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba8Premul) {
        if x >= self.size.width || y >= self.size.height {
            return;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        self.data[i..i + 4].copy_from_slice(&color.to_array());
    }

    /// Resize the buffer to `new_size`, keeping the old content centred:
    /// cropped symmetrically when shrinking, padded with transparency when
    /// growing. Resizing to the current size leaves the pixels untouched.
    pub fn resize_recenter(&mut self, new_size: SurfaceSize) {
        if new_size == self.size {
            return;
        }

        let (old_w, old_h) = (self.size.width, self.size.height);
        let (new_w, new_h) = (new_size.width, new_size.height);

        let (crop_x, x_off) = if new_w < old_w {
            ((old_w - new_w) / 2, 0)
        } else {
            (0, (new_w - old_w) / 2)
        };
        let (crop_y, y_off) = if new_h < old_h {
            ((old_h - new_h) / 2, 0)
        } else {
            (0, (new_h - old_h) / 2)
        };
        let copy_w = old_w.min(new_w) as usize;
        let copy_h = old_h.min(new_h);

        let mut data = vec![0u8; new_w as usize * new_h as usize * 4];
        for row in 0..copy_h {
            let src_start = ((crop_y + row) as usize * old_w as usize + crop_x as usize) * 4;
            let dst_start = ((y_off + row) as usize * new_w as usize + x_off as usize) * 4;
            data[dst_start..dst_start + copy_w * 4]
                .copy_from_slice(&self.data[src_start..src_start + copy_w * 4]);
        }

        self.size = new_size;
        self.data = data;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/pixmap.rs"]
mod tests;
