use printpdf::lopdf;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use textwrap::core::Fragment;
use textwrap::wrap_algorithms::wrap_first_fit;
use ttf_parser::Face;

use crate::errors::RenderError;
use crate::render::{OutputFormat, RenderOptions, compose_paragraph};
use crate::segment::Segment;

// @const: A4 portrait in millimetres
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;

const TITLE_SIZE_PT: f32 = 18.0;
const TITLE_LINE_MM: f32 = 9.0;
const BODY_SIZE_PT: f32 = 11.0;
const BODY_LINE_MM: f32 = 5.5;
const PARAGRAPH_GAP_MM: f32 = 2.0;

// @const: Width of the text block in points
const TEXT_WIDTH_PT: f64 = (PAGE_WIDTH_MM - 2.0 * MARGIN_MM) as f64 * 72.0 / 25.4;

// Bold glyphs run up to a tenth wider than the regular metrics used for measuring.
const TITLE_WIDTH_PT: f64 = TEXT_WIDTH_PT * 0.9;

/// Paginated PDF: title heading, then one wrapped paragraph per segment.
///
/// Text is set in Helvetica unless `options` carries an embedded TrueType
/// font. A character the font cannot show is an `EncodingFailure`; nothing is
/// dropped from the document.
pub fn render_pdf(segments: &[Segment], options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
    let typeface = match &options.pdf_font {
        Some(font) => Typeface::Embedded(Face::parse(font.as_bytes(), 0).map_err(encoding_failure)?),
        None => Typeface::Helvetica,
    };

    let title = options.title();
    typeface.check_coverage(title, "title")?;

    let paragraphs: Vec<String> = segments.iter().map(compose_paragraph).collect();
    for (index, paragraph) in paragraphs.iter().enumerate() {
        typeface.check_coverage(paragraph, &format!("segment {}", index))?;
    }

    let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");

    let (regular, bold) = match &options.pdf_font {
        Some(font) => {
            let embedded = doc.add_external_font(font.as_bytes()).map_err(encoding_failure)?;
            (embedded.clone(), embedded)
        }
        None => (
            doc.add_builtin_font(BuiltinFont::Helvetica).map_err(encoding_failure)?,
            doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(encoding_failure)?,
        ),
    };

    {
        let first_layer = doc.get_page(page).get_layer(layer);
        let mut writer = PageWriter::new(&doc, first_layer);

        for line in typeface.wrap(title, TITLE_SIZE_PT as f64, TITLE_WIDTH_PT) {
            writer.line(&line, TITLE_SIZE_PT, TITLE_LINE_MM, &bold);
        }
        writer.gap(PARAGRAPH_GAP_MM * 2.0);

        for paragraph in &paragraphs {
            for line in typeface.wrap(paragraph, BODY_SIZE_PT as f64, TEXT_WIDTH_PT) {
                writer.line(&line, BODY_SIZE_PT, BODY_LINE_MM, &regular);
            }
            writer.gap(PARAGRAPH_GAP_MM);
        }
    }

    doc.save_to_bytes().map_err(encoding_failure)
}

fn encoding_failure<E: std::fmt::Debug>(err: E) -> RenderError {
    RenderError::EncodingFailure {
        format: OutputFormat::Pdf,
        cause: format!("{:?}", err),
    }
}

// @enum: Font the document text is set in
enum Typeface<'f> {
    /// Built-in Helvetica, limited to WinAnsi
    Helvetica,
    /// Caller supplied TrueType font
    Embedded(Face<'f>),
}

impl Typeface<'_> {
    fn name(&self) -> &'static str {
        match self {
            Typeface::Helvetica => "Helvetica",
            Typeface::Embedded(_) => "embedded",
        }
    }

    fn covers(&self, ch: char) -> bool {
        match self {
            Typeface::Helvetica => {
                let mut buf = [0u8; 4];
                lopdf::Document::encode_text(Some("WinAnsiEncoding"), ch.encode_utf8(&mut buf)).len() == 1
            }
            Typeface::Embedded(face) => face.glyph_index(ch).is_some(),
        }
    }

    fn check_coverage(&self, text: &str, context: &str) -> Result<(), RenderError> {
        match text.chars().find(|&ch| !self.covers(ch)) {
            Some(ch) => Err(RenderError::EncodingFailure {
                format: OutputFormat::Pdf,
                cause: format!(
                    "{} contains {:?} (U+{:04X}), which the {} font cannot encode",
                    context, ch, ch as u32, self.name()
                ),
            }),
            None => Ok(()),
        }
    }

    // @returns: Horizontal advance of `ch` in ems
    fn advance(&self, ch: char) -> f64 {
        match self {
            Typeface::Helvetica => helvetica_advance(ch),
            Typeface::Embedded(face) => face
                .glyph_index(ch)
                .and_then(|id| face.glyph_hor_advance(id))
                .map(|width| width as f64 / face.units_per_em() as f64)
                .unwrap_or(1.0),
        }
    }

    /// Greedy wrap of `text` into lines no wider than `max_width_pt`
    fn wrap(&self, text: &str, size_pt: f64, max_width_pt: f64) -> Vec<String> {
        let space = self.advance(' ') * size_pt;
        let mut pieces: Vec<Piece> = Vec::new();

        for word in text.split_whitespace() {
            self.split_to_width(word, size_pt, max_width_pt, &mut pieces);
            if let Some(last) = pieces.last_mut() {
                last.space = space;
            }
        }

        wrap_first_fit(&pieces, &[max_width_pt])
            .into_iter()
            .map(|line| {
                let mut out = String::new();
                for (i, piece) in line.iter().enumerate() {
                    out.push_str(piece.text);
                    if piece.space > 0.0 && i + 1 < line.len() {
                        out.push(' ');
                    }
                }
                out
            })
            .collect()
    }

    // Words wider than a whole line are broken between characters.
    fn split_to_width<'t>(&self, word: &'t str, size_pt: f64, max_width_pt: f64, out: &mut Vec<Piece<'t>>) {
        let mut start = 0;
        let mut width = 0.0;

        for (pos, ch) in word.char_indices() {
            let advance = self.advance(ch) * size_pt;
            if pos > start && width + advance > max_width_pt {
                out.push(Piece { text: &word[start..pos], width, space: 0.0 });
                start = pos;
                width = 0.0;
            }
            width += advance;
        }

        out.push(Piece { text: &word[start..], width, space: 0.0 });
    }
}

// @struct: Measured run of text that wraps as a unit
#[derive(Debug)]
struct Piece<'t> {
    text: &'t str,
    width: f64,
    space: f64,
}

impl Fragment for Piece<'_> {
    fn width(&self) -> f64 {
        self.width
    }

    fn whitespace_width(&self) -> f64 {
        self.space
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

// Helvetica advance widths for ' '..='~', in thousandths of an em
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

fn helvetica_advance(ch: char) -> f64 {
    let units = match ch {
        ' '..='~' => HELVETICA_ASCII[ch as usize - 0x20],
        c if c.is_lowercase() => 556,
        c if c.is_uppercase() => 778,
        _ => 1000,
    };
    units as f64 / 1000.0
}

// @struct: Top-down text cursor that opens pages as needed
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
    pages: usize,
}

impl<'a> PageWriter<'a> {
    fn new(doc: &'a PdfDocumentReference, layer: PdfLayerReference) -> Self {
        PageWriter {
            doc,
            layer,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
            pages: 1,
        }
    }

    fn line(&mut self, text: &str, size_pt: f32, height_mm: f32, font: &IndirectFontRef) {
        if self.y - height_mm < MARGIN_MM {
            self.new_page();
        }
        self.y -= height_mm;
        self.layer.use_text(text, size_pt, Mm(MARGIN_MM), Mm(self.y), font);
    }

    fn gap(&mut self, height_mm: f32) {
        self.y -= height_mm;
    }

    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            format!("Layer {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
    }
}
