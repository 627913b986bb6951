//! In-memory paginated report.
//!
//! Pages and their drawing operations are append-only. Coordinates are in
//! millimetres measured from the top-left corner of the page; the PDF backend
//! flips them.

/// A4 short edge
pub const A4_SHORT_MM: f32 = 210.0;
/// A4 long edge
pub const A4_LONG_MM: f32 = 297.0;

/// Distance of the footer baseline from the bottom edge.
pub const FOOTER_OFFSET_MM: f32 = 10.0;
/// Height reserved above the bottom edge for the footer.
pub const FOOTER_BAND_MM: f32 = 20.0;

const PT_TO_MM: f32 = 25.4 / 72.0;
// Average Helvetica glyph advance, as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// (width, height) of an A4 page in this orientation.
    pub fn size_mm(self) -> (f32, f32) {
        match self {
            Orientation::Portrait => (A4_SHORT_MM, A4_LONG_MM),
            Orientation::Landscape => (A4_LONG_MM, A4_SHORT_MM),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Orientation::Portrait => Orientation::Landscape,
            Orientation::Landscape => Orientation::Portrait,
        }
    }
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8(pub u8, pub u8, pub u8);

impl Rgb8 {
    pub const BLACK: Rgb8 = Rgb8(0, 0, 0);
    pub const WHITE: Rgb8 = Rgb8(255, 255, 255);
    pub const GREY: Rgb8 = Rgb8(110, 110, 110);
    pub const GREEN: Rgb8 = Rgb8(40, 167, 69);
    pub const RED: Rgb8 = Rgb8(220, 53, 69);
    pub const HEADING: Rgb8 = Rgb8(27, 94, 32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    pub text: String,
    /// Left edge, or the centre line for [`Align::Center`]
    pub x_mm: f32,
    /// Baseline, from the top of the page
    pub y_mm: f32,
    pub size_pt: f32,
    pub bold: bool,
    pub color: Rgb8,
    pub align: Align,
}

impl TextOp {
    /// Estimated rendered width, good enough for centring builtin fonts.
    pub fn estimated_width_mm(&self) -> f32 {
        self.text.chars().count() as f32 * self.size_pt * AVG_GLYPH_WIDTH * PT_TO_MM
    }

    /// Left edge of the text after alignment.
    pub fn left_mm(&self) -> f32 {
        match self.align {
            Align::Left => self.x_mm,
            Align::Center => self.x_mm - self.estimated_width_mm() / 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectOp {
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
    pub fill: Rgb8,
}

/// Opaque RGB pixels placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageOp {
    pub width_px: u32,
    pub height_px: u32,
    pub rgb: Vec<u8>,
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text(TextOp),
    Rect(RectOp),
    Image(ImageOp),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub orientation: Orientation,
    ops: Vec<DrawOp>,
}

impl Page {
    pub fn size_mm(&self) -> (f32, f32) {
        self.orientation.size_mm()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// All text on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageOp> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Image(i) => Some(i),
            _ => None,
        })
    }
}

/// The report being assembled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDocument {
    pages: Vec<Page>,
}

impl ReportDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a blank page and return it.
    pub fn add_page(&mut self, orientation: Orientation) -> &mut Page {
        self.pages.push(Page {
            orientation,
            ops: Vec::new(),
        });
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn last_page_mut(&mut self) -> Option<&mut Page> {
        self.pages.last_mut()
    }

    /// Stamp `Page i of N | product | url` centred at the bottom of every page.
    pub fn stamp_footers(&mut self, product: &str, url: &str) {
        let total = self.pages.len();
        for (index, page) in self.pages.iter_mut().enumerate() {
            let (width, height) = page.size_mm();
            page.push(DrawOp::Text(TextOp {
                text: footer_text(index + 1, total, product, url),
                x_mm: width / 2.0,
                y_mm: height - FOOTER_OFFSET_MM,
                size_pt: 8.0,
                bold: false,
                color: Rgb8::GREY,
                align: Align::Center,
            }));
        }
    }
}

pub fn footer_text(page: usize, total: usize, product: &str, url: &str) -> String {
    format!("Page {} of {} | {} | {}", page, total, product, url)
}

/// Scale `width_px` x `height_px` to fit inside the box, keeping the aspect
/// ratio. Returns the placed (width, height) in millimetres.
pub fn fit_image(
    width_px: u32,
    height_px: u32,
    max_width_mm: f32,
    max_height_mm: f32,
) -> (f32, f32) {
    let (w, h) = (width_px.max(1) as f32, height_px.max(1) as f32);
    let scale = (max_width_mm / w).min(max_height_mm / h);
    (w * scale, h * scale)
}

/// Writes flowing lines onto the last page, starting a new page of the same
/// orientation when the next line would run into the footer band.
pub struct PageCursor<'d> {
    doc: &'d mut ReportDocument,
    orientation: Orientation,
    margin_mm: f32,
    y_mm: f32,
}

impl<'d> PageCursor<'d> {
    /// Open a fresh page and start writing at its top margin.
    pub fn new(doc: &'d mut ReportDocument, orientation: Orientation, margin_mm: f32) -> Self {
        doc.add_page(orientation);
        Self {
            doc,
            orientation,
            margin_mm,
            y_mm: margin_mm,
        }
    }

    pub fn skip(&mut self, mm: f32) {
        self.y_mm += mm;
    }

    /// Make sure `height_mm` fits above the footer band.
    pub fn ensure_space(&mut self, height_mm: f32) {
        let (_, page_height) = self.orientation.size_mm();
        if self.y_mm + height_mm > page_height - FOOTER_BAND_MM {
            self.doc.add_page(self.orientation);
            self.y_mm = self.margin_mm;
        }
    }

    /// Write one line of text and advance by `line_height_mm`.
    pub fn line(&mut self, text: &str, size_pt: f32, bold: bool, color: Rgb8, line_height_mm: f32) {
        self.ensure_space(line_height_mm);
        self.y_mm += line_height_mm;
        let op = DrawOp::Text(TextOp {
            text: text.to_string(),
            x_mm: self.margin_mm,
            y_mm: self.y_mm,
            size_pt,
            bold,
            color,
            align: Align::Left,
        });
        self.push(op);
    }

    /// A full-width coloured banner with centred text.
    pub fn banner(&mut self, text: &str, fill: Rgb8, height_mm: f32) {
        self.ensure_space(height_mm);
        let (page_width, _) = self.orientation.size_mm();
        let top = self.y_mm;
        self.push(DrawOp::Rect(RectOp {
            x_mm: self.margin_mm,
            y_mm: top,
            width_mm: page_width - 2.0 * self.margin_mm,
            height_mm,
            fill,
        }));
        self.push(DrawOp::Text(TextOp {
            text: text.to_string(),
            x_mm: page_width / 2.0,
            y_mm: top + height_mm * 0.65,
            size_pt: 12.0,
            bold: true,
            color: Rgb8::WHITE,
            align: Align::Center,
        }));
        self.y_mm = top + height_mm;
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.doc.last_page_mut() {
            page.push(op);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_sizes() {
        assert_eq!(Orientation::Portrait.size_mm(), (210.0, 297.0));
        assert_eq!(Orientation::Portrait.opposite(), Orientation::Landscape);
        assert_eq!(Orientation::Landscape.size_mm(), (297.0, 210.0));
    }

    #[test]
    fn test_fit_image_is_width_bound_for_wide_images() {
        let (w, h) = fit_image(1200, 600, 267.0, 150.0);
        assert!((w - 267.0).abs() < 1e-3);
        assert!((h - 133.5).abs() < 1e-3);
    }

    #[test]
    fn test_fit_image_is_height_bound_for_tall_images() {
        let (w, h) = fit_image(400, 800, 267.0, 150.0);
        assert!((h - 150.0).abs() < 1e-3);
        assert!((w - 75.0).abs() < 1e-3);
    }

    #[test]
    fn test_footers_on_every_page() {
        let mut doc = ReportDocument::new();
        doc.add_page(Orientation::Portrait);
        doc.add_page(Orientation::Landscape);
        doc.add_page(Orientation::Landscape);
        doc.stamp_footers("Calc", "https://example.org");

        for (i, page) in doc.pages().iter().enumerate() {
            let footer = page.texts().last().unwrap();
            assert_eq!(footer, format!("Page {} of 3 | Calc | https://example.org", i + 1));
        }
    }

    #[test]
    fn test_cursor_breaks_before_footer_band() {
        let mut doc = ReportDocument::new();
        let mut cursor = PageCursor::new(&mut doc, Orientation::Portrait, 15.0);
        for i in 0..60 {
            cursor.line(&format!("line {}", i), 10.0, false, Rgb8::BLACK, 6.0);
        }
        assert_eq!(doc.page_count(), 2);
        for page in doc.pages() {
            for op in page.ops() {
                if let DrawOp::Text(t) = op {
                    assert!(t.y_mm <= A4_LONG_MM - FOOTER_BAND_MM);
                }
            }
        }
    }

    #[test]
    fn test_centered_text_left_edge() {
        let op = TextOp {
            text: "abcd".to_string(),
            x_mm: 100.0,
            y_mm: 10.0,
            size_pt: 10.0,
            bold: false,
            color: Rgb8::BLACK,
            align: Align::Center,
        };
        assert!(op.left_mm() < 100.0);
        assert!((100.0 - op.left_mm()) * 2.0 - op.estimated_width_mm() < 1e-4);
    }
}
