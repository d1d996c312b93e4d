//! Reconciles a symbol's module grid with a requested pixel size.

use tracing::debug;

use crate::{QrImageError, Result};

/// How a symbol of `module_count` modules maps onto `desired_pixel_size` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizingPlan {
    pub module_count: u32,
    pub border_modules: u32,
    /// Modules per side including the quiet zone on both sides.
    pub total_modules: u32,
    /// Pixels per module, never below 1.
    pub box_size: u32,
    pub desired_pixel_size: u32,
}

impl SizingPlan {
    pub fn new(module_count: u32, border_modules: u32, desired_pixel_size: u32) -> Result<Self> {
        if desired_pixel_size == 0 {
            return Err(QrImageError::InvalidDimension(
                "desired pixel size must be positive".into(),
            ));
        }

        let total_modules = border_modules
            .checked_mul(2)
            .and_then(|b| b.checked_add(module_count))
            .filter(|&t| t > 0)
            .ok_or_else(|| {
                QrImageError::InvalidDimension(format!(
                    "computed total modules is invalid (modules={module_count}, border={border_modules})"
                ))
            })?;

        let box_size = (desired_pixel_size / total_modules).max(1);
        if desired_pixel_size < total_modules {
            debug!(
                desired_pixel_size,
                total_modules, "Requested size is below one pixel per module, upscaling"
            );
        }

        Ok(Self {
            module_count,
            border_modules,
            total_modules,
            box_size,
            desired_pixel_size,
        })
    }

    /// Side of the raster painted at `box_size`, before any resampling.
    pub fn native_side(&self) -> u32 {
        self.box_size * self.total_modules
    }

    /// Whether the native raster must be resampled to reach the requested size.
    pub fn needs_resize(&self) -> bool {
        self.native_side() != self.desired_pixel_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_multiple_needs_no_resize() {
        // 21 modules + 2*2 border = 25, 250 / 25 = 10
        let plan = SizingPlan::new(21, 2, 250).unwrap();
        assert_eq!(plan.total_modules, 25);
        assert_eq!(plan.box_size, 10);
        assert_eq!(plan.native_side(), 250);
        assert!(!plan.needs_resize());
    }

    #[test]
    fn box_size_floors() {
        // 21 + 2 = 23, 200 / 23 = 8 -> 184px native
        let plan = SizingPlan::new(21, 1, 200).unwrap();
        assert_eq!(plan.box_size, 8);
        assert_eq!(plan.native_side(), 184);
        assert!(plan.needs_resize());
    }

    #[test]
    fn box_size_never_below_one() {
        let plan = SizingPlan::new(25, 1, 10).unwrap();
        assert_eq!(plan.box_size, 1);
        assert_eq!(plan.native_side(), 27);
        assert!(plan.needs_resize());
    }

    #[test]
    fn zero_border_uses_module_count_only() {
        let plan = SizingPlan::new(21, 0, 42).unwrap();
        assert_eq!(plan.total_modules, 21);
        assert_eq!(plan.box_size, 2);
    }

    #[test]
    fn zero_pixel_size_rejected() {
        assert!(matches!(
            SizingPlan::new(21, 1, 0),
            Err(QrImageError::InvalidDimension(_))
        ));
    }

    #[test]
    fn empty_grid_rejected() {
        assert!(matches!(
            SizingPlan::new(0, 0, 40),
            Err(QrImageError::InvalidDimension(_))
        ));
    }

    #[test]
    fn overflowing_border_rejected() {
        assert!(matches!(
            SizingPlan::new(21, u32::MAX, 40),
            Err(QrImageError::InvalidDimension(_))
        ));
    }
}
