use crate::TerrainError;
use std::path::Path;

/// Grid of heights in `[0, 1]`, stored row-major. Row `i` and column `j`
/// correspond to pixel `(x = j, y = i)` of the source image.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    width: u32,
    height: u32,
    samples: Vec<f32>,
}

impl HeightField {
    /// Load a height field from an image file, using the red channel.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TerrainError> {
        let path = path.as_ref();
        let img = image::open(path)?;
        let field = Self::from_image(&img)?;
        tracing::info!(
            path = %path.display(),
            width = field.width,
            height = field.height,
            "loaded height field"
        );
        Ok(field)
    }

    pub fn from_image(img: &image::DynamicImage) -> Result<Self, TerrainError> {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let samples = rgba.pixels().map(|p| f32::from(p.0[0]) / 255.0).collect();
        Self::from_samples(width, height, samples)
    }

    pub fn from_samples(width: u32, height: u32, samples: Vec<f32>) -> Result<Self, TerrainError> {
        if width < 2 || height < 2 {
            return Err(TerrainError::TooSmall { width, height });
        }
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(TerrainError::SampleCount {
                width,
                height,
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// A field where every sample has the same value.
    pub fn flat(width: u32, height: u32, value: f32) -> Result<Self, TerrainError> {
        Self::from_samples(width, height, vec![value; width as usize * height as usize])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample at row `row` (image y) and column `col` (image x).
    pub fn sample(&self, row: u32, col: u32) -> f32 {
        self.samples[row as usize * self.width as usize + col as usize]
    }

    /// Number of triangles the builder will produce.
    pub fn triangle_count(&self) -> usize {
        2 * (self.width as usize - 1) * (self.height as usize - 1)
    }
}
