//! PDF backend for [`ReportDocument`].

use crate::document::{DrawOp, ImageOp, RectOp, ReportDocument, Rgb8, TextOp};
use crate::error::{ReportError, Result};
use image::{DynamicImage, RgbImage};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument,
    PdfLayerReference, Rect, Rgb,
};
use printpdf::path::PaintMode;

const IMAGE_DPI: f32 = 300.0;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Render every page of `doc` and return the PDF file bytes.
pub fn render_pdf(doc: &ReportDocument, title: &str) -> Result<Vec<u8>> {
    let pages = doc.pages();
    let first = pages
        .first()
        .ok_or_else(|| ReportError::Pdf("document has no pages".to_string()))?;

    let (width, height) = first.size_mm();
    let (pdf, page_idx, layer_idx) = PdfDocument::new(title, Mm(width), Mm(height), "Layer 1");
    let fonts = Fonts {
        regular: pdf
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(format!("{:?}", e)))?,
        bold: pdf
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Pdf(format!("{:?}", e)))?,
    };

    let mut layers = vec![(pdf.get_page(page_idx).get_layer(layer_idx), height)];
    for page in &pages[1..] {
        let (width, height) = page.size_mm();
        let (page_idx, layer_idx) = pdf.add_page(Mm(width), Mm(height), "Layer 1");
        layers.push((pdf.get_page(page_idx).get_layer(layer_idx), height));
    }

    for (page, (layer, page_height)) in pages.iter().zip(&layers) {
        for op in page.ops() {
            match op {
                DrawOp::Text(text) => draw_text(layer, *page_height, text, &fonts),
                DrawOp::Rect(rect) => draw_rect(layer, *page_height, rect),
                DrawOp::Image(image) => draw_image(layer, *page_height, image)?,
            }
        }
    }

    log::debug!("Rendering {} PDF pages", pages.len());
    pdf.save_to_bytes()
        .map_err(|e| ReportError::Pdf(format!("{:?}", e)))
}

fn color(c: Rgb8) -> Color {
    Color::Rgb(Rgb::new(
        c.0 as f32 / 255.0,
        c.1 as f32 / 255.0,
        c.2 as f32 / 255.0,
        None,
    ))
}

fn draw_text(layer: &PdfLayerReference, page_height: f32, text: &TextOp, fonts: &Fonts) {
    let font = if text.bold { &fonts.bold } else { &fonts.regular };
    layer.set_fill_color(color(text.color));
    layer.use_text(
        text.text.clone(),
        text.size_pt,
        Mm(text.left_mm()),
        Mm(page_height - text.y_mm),
        font,
    );
}

fn draw_rect(layer: &PdfLayerReference, page_height: f32, rect: &RectOp) {
    layer.set_fill_color(color(rect.fill));
    let bottom = page_height - rect.y_mm - rect.height_mm;
    layer.add_rect(
        Rect::new(
            Mm(rect.x_mm),
            Mm(bottom),
            Mm(rect.x_mm + rect.width_mm),
            Mm(bottom + rect.height_mm),
        )
        .with_mode(PaintMode::Fill),
    );
}

fn draw_image(layer: &PdfLayerReference, page_height: f32, op: &ImageOp) -> Result<()> {
    let pixels = RgbImage::from_raw(op.width_px, op.height_px, op.rgb.clone()).ok_or_else(|| {
        ReportError::Image(format!(
            "{} bytes do not make a {}x{} RGB image",
            op.rgb.len(),
            op.width_px,
            op.height_px
        ))
    })?;
    let image = Image::from_dynamic_image(&DynamicImage::ImageRgb8(pixels));

    // Natural size at IMAGE_DPI, scaled to the placed size
    let natural_width_mm = op.width_px as f32 / IMAGE_DPI * 25.4;
    let natural_height_mm = op.height_px as f32 / IMAGE_DPI * 25.4;
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(op.x_mm)),
            translate_y: Some(Mm(page_height - op.y_mm - op.height_mm)),
            scale_x: Some(op.width_mm / natural_width_mm),
            scale_y: Some(op.height_mm / natural_height_mm),
            dpi: Some(IMAGE_DPI),
            ..Default::default()
        },
    );
    Ok(())
}
