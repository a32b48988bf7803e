//! Page geometry in PDF points (1/72 inch, origin bottom-left).

/// A page size in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

/// ISO A4 portrait.
pub const A4: PageSize = PageSize {
    width: 595.28,
    height: 841.89,
};

/// Where the image lands on the page, in PDF user space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Fit an image of `width`×`height` pixels onto `page`, anchored top-left.
///
/// The image spans the full page width; a bitmap too tall for that is
/// scaled down to the page height instead.
pub fn fit_to_page(width: u32, height: u32, page: PageSize) -> PageRect {
    let (w, h) = (width.max(1) as f64, height.max(1) as f64);
    let mut scale = page.width / w;
    if h * scale > page.height {
        scale = page.height / h;
    }
    let (out_w, out_h) = (w * scale, h * scale);
    PageRect {
        x: 0.0,
        y: page.height - out_h,
        width: out_w,
        height: out_h,
    }
}

/// [`fit_to_page`] on portrait A4.
pub fn fit_to_a4(width: u32, height: u32) -> PageRect {
    fit_to_page(width, height, A4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_image_spans_page_width() {
        let r = fit_to_page(1600, 1200, A4);
        assert!((r.width - A4.width).abs() < 1e-6);
        assert!((r.height - A4.width * 0.75).abs() < 1e-6);
        assert!((r.y + r.height - A4.height).abs() < 1e-6, "anchored to top");
    }

    #[test]
    fn tall_image_fits_page_height() {
        let r = fit_to_page(100, 1000, A4);
        assert!((r.height - A4.height).abs() < 1e-6);
        assert!(r.width < A4.width);
        assert!(r.y.abs() < 1e-6);
    }
}
