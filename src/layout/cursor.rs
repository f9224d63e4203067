use crate::canvas::Canvas;
use crate::error::Error;

/// Emitted by [`LayoutCursor::reserve`] when the requested block does not fit
/// on the current page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageBreak {
    pub from_page: usize,
    pub to_page: usize,
}

/// Current page and vertical write position of a report being laid out.
///
/// `margin <= y <= page_height - margin` holds after every operation.
#[derive(Clone, Debug)]
pub struct LayoutCursor {
    page_index: usize,
    y: f32,
    page_width: f32,
    page_height: f32,
    margin: f32,
    line_height: f32,
}

impl LayoutCursor {
    pub fn new(page_width: f32, page_height: f32, margin: f32, line_height: f32) -> Self {
        LayoutCursor {
            page_index: 0,
            y: margin,
            page_width,
            page_height,
            margin,
            line_height,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    pub fn page_height(&self) -> f32 {
        self.page_height
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Lowest `y` content may reach on a page.
    pub fn bottom(&self) -> f32 {
        self.page_height - self.margin
    }

    pub fn left(&self) -> f32 {
        self.margin
    }

    pub fn right(&self) -> f32 {
        self.page_width - self.margin
    }

    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    pub fn remaining(&self) -> f32 {
        self.bottom() - self.y
    }

    pub fn at_page_top(&self) -> bool {
        self.y <= self.margin
    }

    /// Make sure `height` fits below the cursor, breaking to a new page when
    /// it does not. A cursor already at the top of a page never breaks: a
    /// block taller than the usable height is drawn there and clipped.
    pub fn reserve(&mut self, height: f32) -> Option<PageBreak> {
        if self.y + height <= self.bottom() || self.at_page_top() {
            return None;
        }
        let from_page = self.page_index;
        self.page_index += 1;
        self.y = self.margin;
        log::debug!(
            "Page break {} -> {} (needed {height:.1}pt)",
            from_page + 1,
            self.page_index + 1
        );
        Some(PageBreak {
            from_page,
            to_page: self.page_index,
        })
    }

    /// [`reserve`](Self::reserve), starting a new canvas page on a break.
    pub fn reserve_on(
        &mut self,
        canvas: &mut dyn Canvas,
        height: f32,
    ) -> Result<Option<PageBreak>, Error> {
        let brk = self.reserve(height);
        if brk.is_some() {
            canvas.add_page()?;
        }
        Ok(brk)
    }

    pub fn reserve_line_on(&mut self, canvas: &mut dyn Canvas) -> Result<Option<PageBreak>, Error> {
        self.reserve_on(canvas, self.line_height)
    }

    /// Move down by `height`. Callers reserve first; the position is clamped
    /// to the bottom margin so an unreserved advance cannot leave the page.
    pub fn advance(&mut self, height: f32) {
        self.y = (self.y + height.max(0.0)).min(self.bottom());
    }
}
