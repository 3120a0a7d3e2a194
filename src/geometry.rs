/// Content-box dimensions of an observed element, in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size::new(0.0, 0.0);

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Rectangle describing a measured content box, anchored at the element's
/// content origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_comparison_detects_dimension_changes() {
        let a = Size::new(100.0, 50.0);
        let b = Size::new(100.0, 51.0);
        assert_ne!(a, b);
        assert_eq!(a, Size::new(100.0, 50.0));
    }

    #[test]
    fn rect_exposes_its_size() {
        let rect = Rect::new(4.0, 8.0, 100.0, 50.0);
        assert_eq!(rect.size(), Size::new(100.0, 50.0));
        assert_eq!(rect.right(), 104.0);
        assert_eq!(rect.bottom(), 58.0);
    }
}
