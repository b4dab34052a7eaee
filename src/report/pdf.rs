use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use printpdf::color::Color;
use printpdf::graphics::{LinePoint, PaintMode, Point, Polygon, PolygonRing, WindingOrder};
use printpdf::image::RawImage;
use printpdf::matrix::TextMatrix;
use printpdf::ops::Op;
use printpdf::text::TextItem;
use printpdf::xobject::{XObject, XObjectTransform};
use printpdf::{BuiltinFont, Mm, PdfDocument, PdfPage, PdfSaveOptions, Pt, Rgb, XObjectId};
use tracing::debug;

use crate::report::metrics::{text_width, wrap_text};
use crate::report::{Block, Document, ReportError, Table};

// A4 in points.
const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN: f32 = 72.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const CONTENT_BOTTOM: f32 = PAGE_HEIGHT - MARGIN;

const TITLE_SIZE: f32 = 24.0;
const HEADING_SIZE: f32 = 15.0;
const BODY_SIZE: f32 = 11.0;
const CAPTION_SIZE: f32 = 12.0;
const TABLE_SIZE: f32 = 9.0;
const LEADING: f32 = 1.35;

const BLOCK_GAP: f32 = 10.0;
const BULLET_INDENT: f32 = 14.0;
const CELL_PADDING: f32 = 4.0;
const GRID_WIDTH: f32 = 0.5;
const MIN_COLUMN_WIDTH: f32 = 40.0;
const MAX_COLUMN_SHARE: f32 = 0.5;

/// Lays `document` out on A4 pages and writes it to `path`, returning the page count.
///
/// # Errors
/// Fails when a chart image cannot be read or decoded, or when the file cannot be written.
pub fn render_pdf(document: &Document, path: &Path) -> Result<usize, ReportError> {
    debug!("Laying out [{}] with {} sections", document.title(), document.headings().count());
    let mut layout = PageLayout::new(document.title());

    for block in document.blocks() {
        layout.place(block)?;
    }

    let pdf = layout.finish();
    let page_count = pdf.pages.len();

    let mut writer = BufWriter::new(File::create(path)?);
    let mut warnings = Vec::new();
    pdf.save_writer(&mut writer, &PdfSaveOptions::default(), &mut warnings);
    writer.flush()?;

    debug!("Wrote {page_count} pages to [{}]", path.display());

    Ok(page_count)
}

/// Row of wrapped cell lines, measured once and drawn as often as needed.
struct RowLayout {
    cells: Vec<Vec<String>>,
    height: f32
}

/// Flowing layout state: a cursor measured from the top edge of the current page.
struct PageLayout {
    pdf: PdfDocument,
    ops: Vec<Op>,
    cursor: f32,
    has_content: bool
}

impl PageLayout {
    fn new(title: &str) -> Self {
        Self {
            pdf: PdfDocument::new(title),
            ops: Vec::new(),
            cursor: MARGIN,
            has_content: false
        }
    }

    fn place(&mut self, block: &Block) -> Result<(), ReportError> {
        match block {
            Block::Title(text) => self.place_text(text, BuiltinFont::HelveticaBold, TITLE_SIZE, 0.0, 2.0 * BLOCK_GAP),
            Block::Heading(text) => {
                // Keep a heading together with the first lines that follow it.
                self.ensure_space(HEADING_SIZE * LEADING + 3.0 * BODY_SIZE * LEADING);
                self.place_text(text, BuiltinFont::HelveticaBold, HEADING_SIZE, 0.0, BLOCK_GAP / 2.0);
            }
            Block::Paragraph(text) => self.place_text(text, BuiltinFont::Helvetica, BODY_SIZE, 0.0, BLOCK_GAP),
            Block::Bullets(items) => self.place_bullets(items),
            Block::Table(table) => self.place_table(table),
            Block::Chart { title, path } => self.place_chart(title, path)?,
            Block::PageBreak => {
                if self.has_content {
                    self.new_page();
                }
            }
        }

        Ok(())
    }

    fn finish(mut self) -> PdfDocument {
        if self.has_content || self.pdf.pages.is_empty() {
            self.flush_page();
        }

        self.pdf
    }

    fn new_page(&mut self) {
        self.flush_page();
        self.cursor = MARGIN;
        self.has_content = false;
    }

    fn flush_page(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        self.pdf.pages.push(PdfPage::new(Mm(210.0), Mm(297.0), ops));
    }

    /// Starts a new page unless `height` still fits below the cursor. An empty page always accepts.
    fn ensure_space(&mut self, height: f32) {
        if self.has_content && self.cursor + height > CONTENT_BOTTOM {
            self.new_page();
        }
    }

    fn place_text(&mut self, text: &str, font: BuiltinFont, size: f32, indent: f32, gap_after: f32) {
        let line_height = size * LEADING;

        for line in wrap_text(text, font, size, CONTENT_WIDTH - indent) {
            self.ensure_space(line_height);
            self.write_line(&line, MARGIN + indent, self.cursor, font, size);
            self.cursor += line_height;
        }

        self.cursor += gap_after;
    }

    fn place_bullets(&mut self, items: &[String]) {
        let line_height = BODY_SIZE * LEADING;

        for item in items {
            let lines = wrap_text(item, BuiltinFont::Helvetica, BODY_SIZE, CONTENT_WIDTH - BULLET_INDENT);

            for (index, line) in lines.iter().enumerate() {
                self.ensure_space(line_height);

                if index == 0 {
                    self.write_line("-", MARGIN + BULLET_INDENT / 3.0, self.cursor, BuiltinFont::Helvetica, BODY_SIZE);
                }

                self.write_line(line, MARGIN + BULLET_INDENT, self.cursor, BuiltinFont::Helvetica, BODY_SIZE);
                self.cursor += line_height;
            }

            self.cursor += BLOCK_GAP / 3.0;
        }

        self.cursor += BLOCK_GAP;
    }

    fn place_table(&mut self, table: &Table) {
        let columns = table.rows.iter()
            .map(Vec::len)
            .chain(std::iter::once(table.header.len()))
            .max()
            .unwrap_or(0);

        if columns == 0 {
            return;
        }

        let widths = column_widths(table, columns);
        let header = layout_row(&table.header, &widths, BuiltinFont::HelveticaBold);
        let first_row_height = table.rows.first()
            .map(|row| layout_row(row, &widths, BuiltinFont::Helvetica).height)
            .unwrap_or(0.0);

        self.ensure_space(header.height + first_row_height);
        self.draw_row(&header, &widths, true);

        for row in &table.rows {
            let row = layout_row(row, &widths, BuiltinFont::Helvetica);

            if self.has_content && self.cursor + row.height > CONTENT_BOTTOM {
                self.new_page();
                self.draw_row(&header, &widths, true);
            }

            self.draw_row(&row, &widths, false);
        }

        self.cursor += BLOCK_GAP * 1.5;
    }

    fn draw_row(&mut self, row: &RowLayout, widths: &[f32], header: bool) {
        let top = self.cursor;
        let font = if header { BuiltinFont::HelveticaBold } else { BuiltinFont::Helvetica };
        let mut left = MARGIN;

        if header {
            self.rectangle(MARGIN, top, widths.iter().sum(), row.height, PaintMode::Fill, grey());
        }

        for (index, width) in widths.iter().enumerate() {
            self.rectangle(left, top, *width, row.height, PaintMode::Stroke, black());

            if let Some(lines) = row.cells.get(index) {
                for (line_index, line) in lines.iter().enumerate() {
                    let line_top = top + CELL_PADDING + line_index as f32 * TABLE_SIZE * LEADING;
                    self.write_line(line, left + CELL_PADDING, line_top, font, TABLE_SIZE);
                }
            }

            left += width;
        }

        self.cursor += row.height;
        self.has_content = true;
    }

    fn place_chart(&mut self, title: &str, path: &Path) -> Result<(), ReportError> {
        let bytes = fs::read(path)?;
        let mut warnings = Vec::new();
        let image = RawImage::decode_from_bytes(&bytes, &mut warnings)
            .map_err(|error| ReportError::image_decode(path, error.to_string()))?;

        let (pixel_width, pixel_height) = (image.width as f32, image.height as f32);

        if pixel_width <= 0.0 || pixel_height <= 0.0 {
            return Err(ReportError::image_decode(path, "image has no pixels"));
        }

        let caption = wrap_text(title, BuiltinFont::HelveticaBold, CAPTION_SIZE, CONTENT_WIDTH);
        let caption_height = caption.len() as f32 * CAPTION_SIZE * LEADING + BLOCK_GAP / 2.0;
        let max_height = CONTENT_BOTTOM - MARGIN - caption_height - BLOCK_GAP;

        let mut width = CONTENT_WIDTH;
        let mut height = width * pixel_height / pixel_width;

        if height > max_height {
            height = max_height;
            width = height * pixel_width / pixel_height;
        }

        // Caption and image move to the next page together.
        self.ensure_space(caption_height + height);

        for line in &caption {
            self.write_line(line, MARGIN, self.cursor, BuiltinFont::HelveticaBold, CAPTION_SIZE);
            self.cursor += CAPTION_SIZE * LEADING;
        }
        self.cursor += BLOCK_GAP / 2.0;

        let id = XObjectId::new();
        self.pdf.resources.xobjects.map.insert(id.clone(), XObject::Image(image));

        let transform = XObjectTransform {
            translate_x: Some(Pt(MARGIN + (CONTENT_WIDTH - width) / 2.0)),
            translate_y: Some(Pt(PAGE_HEIGHT - (self.cursor + height))),
            scale_x: Some(width / pixel_width),
            scale_y: Some(height / pixel_height),
            rotate: None,
            dpi: Some(72.0)
        };
        self.ops.push(Op::UseXobject { id, transform });

        self.cursor += height + BLOCK_GAP * 2.0;
        self.has_content = true;

        Ok(())
    }

    fn write_line(&mut self, text: &str, x: f32, top: f32, font: BuiltinFont, size: f32) {
        // Baseline sits slightly below the top of the line box.
        let baseline = top + size * 0.8;

        self.ops.extend([
            Op::StartTextSection,
            Op::SetFillColor { col: black() },
            Op::SetFontSizeBuiltinFont { size: Pt(size), font },
            Op::SetTextMatrix { matrix: TextMatrix::Translate(Pt(x), Pt(PAGE_HEIGHT - baseline)) },
            Op::WriteTextBuiltinFont { items: vec![TextItem::Text(text.to_string())], font },
            Op::EndTextSection
        ]);
        self.has_content = true;
    }

    fn rectangle(&mut self, x: f32, top: f32, width: f32, height: f32, mode: PaintMode, color: Color) {
        let bottom = PAGE_HEIGHT - (top + height);

        match mode {
            PaintMode::Fill => self.ops.push(Op::SetFillColor { col: color }),
            _ => {
                self.ops.push(Op::SetOutlineColor { col: color });
                self.ops.push(Op::SetOutlineThickness { pt: Pt(GRID_WIDTH) });
            }
        }

        let polygon = Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    LinePoint { p: Point { x: Pt(x), y: Pt(bottom) }, bezier: false },
                    LinePoint { p: Point { x: Pt(x + width), y: Pt(bottom) }, bezier: false },
                    LinePoint { p: Point { x: Pt(x + width), y: Pt(bottom + height) }, bezier: false },
                    LinePoint { p: Point { x: Pt(x), y: Pt(bottom + height) }, bezier: false },
                ]
            }],
            mode,
            winding_order: WindingOrder::EvenOdd
        };
        self.ops.push(Op::DrawPolygon { polygon });
    }
}

/// Column widths proportional to each column's widest cell, spread over the content width.
fn column_widths(table: &Table, columns: usize) -> Vec<f32> {
    let natural: Vec<f32> = (0..columns)
        .map(|column| {
            let header = table.header.get(column)
                .map(|text| text_width(text, BuiltinFont::HelveticaBold, TABLE_SIZE))
                .unwrap_or(0.0);

            table.rows.iter()
                .filter_map(|row| row.get(column))
                .map(|text| text_width(text, BuiltinFont::Helvetica, TABLE_SIZE))
                .fold(header, f32::max)
                + 2.0 * CELL_PADDING
        })
        .map(|width| width.clamp(MIN_COLUMN_WIDTH, CONTENT_WIDTH * MAX_COLUMN_SHARE))
        .collect();

    let total: f32 = natural.iter().sum();

    natural.iter()
        .map(|width| CONTENT_WIDTH * width / total)
        .collect()
}

fn layout_row(cells: &[String], widths: &[f32], font: BuiltinFont) -> RowLayout {
    let cells: Vec<Vec<String>> = widths.iter().enumerate()
        .map(|(index, width)| {
            let text = cells.get(index).map(String::as_str).unwrap_or("");
            wrap_text(text, font, TABLE_SIZE, width - 2.0 * CELL_PADDING)
        })
        .collect();

    let lines = cells.iter().map(Vec::len).max().unwrap_or(1);

    RowLayout {
        height: lines as f32 * TABLE_SIZE * LEADING + 2.0 * CELL_PADDING,
        cells
    }
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn grey() -> Color {
    Color::Rgb(Rgb::new(0.85, 0.85, 0.85, None))
}
