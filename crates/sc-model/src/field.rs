use std::fmt;
use std::str::FromStr;

use burn::tensor::{backend::Backend, Device, Tensor};
use sc_core::error::{Error, Result};

/// Grid dimensions, rows x columns
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
}

impl Default for Grid {
    fn default() -> Self {
        Self { rows: 32, cols: 64 }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (rows, cols) = s
            .split_once('x')
            .ok_or_else(|| Error::Config(format!("Expected ROWSxCOLS, got '{}'", s)))?;

        let parse = |v: &str| {
            v.trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| Error::Config(format!("Invalid grid size '{}'", s)))
        };

        Ok(Self { rows: parse(rows)?, cols: parse(cols)? })
    }
}

/// A 2-D field labelled with the lead time it is valid for
#[derive(Clone, Debug)]
pub struct Field<B: Backend> {
    pub lead_time: u32,
    pub data: Tensor<B, 2>,
}

impl<B: Backend> Field<B> {
    pub fn new(lead_time: u32, data: Tensor<B, 2>) -> Self {
        Self { lead_time, data }
    }

    /// Smooth synthetic analysis: a wave pattern around `base`
    pub fn synthetic(grid: Grid, base: f32, device: &Device<B>) -> Self {
        let mut values = Vec::with_capacity(grid.rows * grid.cols);

        for r in 0..grid.rows {
            let lat = r as f32 / grid.rows as f32 * std::f32::consts::PI;
            for c in 0..grid.cols {
                let lon = c as f32 / grid.cols as f32 * 2.0 * std::f32::consts::PI;
                values.push(base + 10.0 * lat.sin() * lon.cos());
            }
        }

        let data: Tensor<B, 1> = Tensor::from_floats(values.as_slice(), device);
        Self::new(0, data.reshape([grid.rows, grid.cols]))
    }

    pub fn grid(&self) -> Grid {
        let [rows, cols] = self.data.dims();
        Grid { rows, cols }
    }

    pub fn values(&self) -> Vec<f32> {
        self.data.clone().into_data().iter::<f32>().collect()
    }

    pub fn mean(&self) -> f32 {
        let values = self.values();
        values.iter().sum::<f32>() / values.len() as f32
    }

    pub fn max_abs_diff(&self, other: &Field<B>) -> f32 {
        self.values()
            .iter()
            .zip(other.values())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }
}
