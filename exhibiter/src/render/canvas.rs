//! Drawing pages with lopdf content streams.

use image::{ImageFormat, ImageReader};
use lopdf::content::{Content, Operation};
use lopdf::{Object, Stream, dictionary};
use std::io::Cursor;
use std::path::Path;

use super::font::{helvetica, text_width};
use super::page::{LETTER_HEIGHT, LETTER_WIDTH, Page};
use super::PageRenderer;
use crate::config::LabelPosition;
use crate::error::{ExhibitError, Result};
use crate::index::ExhibitIndex;
use crate::io::PdfReader;

/// Point size of the `EXHIBIT <index>` line on cover sheets.
const COVER_FONT_SIZE: f32 = 32.0;

/// Point size of page labels.
const LABEL_FONT_SIZE: f32 = 12.0;

/// White box drawn behind page labels.
const LABEL_BOX_WIDTH: f32 = 50.0;
const LABEL_BOX_HEIGHT: f32 = 15.0;
const LABEL_BOX_DROP: f32 = 4.0;

/// Share of the page an image may cover in each direction.
const IMAGE_FILL: f32 = 0.9;

/// The stock renderer: Helvetica text, embedded images and lopdf page
/// extraction.
#[derive(Debug, Clone, Default)]
pub struct LopdfRenderer {
    reader: PdfReader,
}

impl LopdfRenderer {
    /// Create a renderer.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageRenderer for LopdfRenderer {
    fn render_cover_page(&self, index: &ExhibitIndex) -> Result<Page> {
        let mut page = Page::letter();
        let font_id = page.add_object(helvetica());
        let font = page.add_resource("Font", "F", font_id)?;

        let text = format!("EXHIBIT {index}");
        let x = (LETTER_WIDTH - text_width(&text, COVER_FONT_SIZE)) / 2.0;
        let y = LETTER_HEIGHT / 7.0;

        let content = Content {
            operations: text_operations(&font, COVER_FONT_SIZE, x, y, &text),
        };
        page.append_content(content.encode()?)?;
        Ok(page)
    }

    fn render_image_as_page(&self, path: &Path, rotate_landscape: bool) -> Result<Page> {
        let load_error =
            |reason: String| ExhibitError::failed_to_load_image(path.to_path_buf(), reason);

        let bytes = std::fs::read(path).map_err(|e| load_error(e.to_string()))?;
        let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .map_err(|e| load_error(e.to_string()))?;
        let format = reader.format();
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| load_error(e.to_string()))?;
        if width == 0 || height == 0 {
            return Err(load_error("image has no pixels".to_string()));
        }

        let xobject = match (format, jpeg_components(&bytes)) {
            (Some(ImageFormat::Jpeg), Some(1)) => jpeg_xobject(width, height, "DeviceGray", bytes),
            (Some(ImageFormat::Jpeg), Some(3)) => jpeg_xobject(width, height, "DeviceRGB", bytes),
            _ => {
                let pixels = image::load_from_memory(&bytes)
                    .map_err(|e| load_error(e.to_string()))?
                    .to_rgb8()
                    .into_raw();
                let mut stream = Stream::new(image_dictionary(width, height, "DeviceRGB"), pixels);
                stream.compress()?;
                stream
            }
        };

        let mut page = Page::letter();
        let image_id = page.add_object(xobject);
        let name = page.add_resource("XObject", "Im", image_id)?;

        let rotate = rotate_landscape && width > height;
        let matrix = image_matrix(
            width as f32,
            height as f32,
            LETTER_WIDTH,
            LETTER_HEIGHT,
            rotate,
        );

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new("cm", matrix.iter().map(|&v| v.into()).collect()),
                Operation::new("Do", vec![Object::Name(name.into_bytes())]),
                Operation::new("Q", vec![]),
            ],
        };
        page.append_content(content.encode()?)?;
        Ok(page)
    }

    fn stamp_label(&self, page: &mut Page, label: &str, position: LabelPosition) -> Result<()> {
        let [llx, lly, urx, ury] = page.media_box();
        let x = llx + (urx - llx) * position.x_percent / 100.0;
        let y = lly + (ury - lly) * position.y_percent / 100.0;

        page.isolate_content()?;
        let font_id = page.add_object(helvetica());
        let font = page.add_resource("Font", "ExF", font_id)?;

        let mut operations = vec![
            Operation::new("q", vec![]),
            Operation::new("g", vec![1.into()]),
            Operation::new(
                "re",
                vec![
                    (x - LABEL_BOX_WIDTH / 2.0).into(),
                    (y - LABEL_BOX_DROP).into(),
                    LABEL_BOX_WIDTH.into(),
                    LABEL_BOX_HEIGHT.into(),
                ],
            ),
            Operation::new("f", vec![]),
            Operation::new("g", vec![0.into()]),
        ];
        let text_x = x - text_width(label, LABEL_FONT_SIZE) / 2.0;
        operations.extend(text_operations(&font, LABEL_FONT_SIZE, text_x, y, label));
        operations.push(Operation::new("Q", vec![]));

        page.append_content(Content { operations }.encode()?)
    }

    fn load_pdf_pages(&self, path: &Path) -> Result<Vec<Page>> {
        self.reader.load(path)?.into_pages()
    }
}

fn image_dictionary(width: u32, height: u32, color_space: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => i64::from(width),
        "Height" => i64::from(height),
        "ColorSpace" => color_space,
        "BitsPerComponent" => 8,
    }
}

/// An image XObject holding the JPEG file as is.
fn jpeg_xobject(width: u32, height: u32, color_space: &str, bytes: Vec<u8>) -> Stream {
    let mut dict = image_dictionary(width, height, color_space);
    dict.set("Filter", "DCTDecode");
    Stream::new(dict, bytes).with_compression(false)
}

/// Number of colour components in a JPEG's baseline or progressive frame.
///
/// `None` when `bytes` is not a JPEG or the frame header cannot be found.
fn jpeg_components(bytes: &[u8]) -> Option<u8> {
    if !bytes.starts_with(&[0xFF, 0xD8]) {
        return None;
    }

    let mut at = 2;
    while at + 4 <= bytes.len() {
        if bytes[at] != 0xFF {
            return None;
        }
        let marker = bytes[at + 1];
        if marker == 0xFF {
            at += 1;
            continue;
        }
        match marker {
            // SOF0, SOF1, SOF2: length, precision, height, width, components
            0xC0..=0xC2 => return bytes.get(at + 9).copied(),
            // start of scan or end of image before any frame
            0xDA | 0xD9 => return None,
            _ => {}
        }
        let length = usize::from(u16::from_be_bytes([bytes[at + 2], bytes[at + 3]]));
        at += 2 + length;
    }

    None
}

/// Operations that draw one line of Helvetica text with its baseline
/// starting at (x, y).
fn text_operations(font: &str, size: f32, x: f32, y: f32, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![Object::Name(font.as_bytes().to_vec()), size.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]
}

/// The `cm` matrix that maps an image's unit square onto the page.
///
/// The image is scaled, keeping its aspect ratio, to fit within
/// [`IMAGE_FILL`] of the page and centred. When `rotate` is set it is
/// turned 90° clockwise first, so its width runs down the page.
pub(crate) fn image_matrix(
    image_width: f32,
    image_height: f32,
    page_width: f32,
    page_height: f32,
    rotate: bool,
) -> [f32; 6] {
    let (box_width, box_height) = if rotate {
        (page_height * IMAGE_FILL, page_width * IMAGE_FILL)
    } else {
        (page_width * IMAGE_FILL, page_height * IMAGE_FILL)
    };

    let scale = (box_width / image_width).min(box_height / image_height);
    let drawn_width = image_width * scale;
    let drawn_height = image_height * scale;

    if rotate {
        [
            0.0,
            -drawn_width,
            drawn_height,
            0.0,
            (page_width - drawn_height) / 2.0,
            (page_height + drawn_width) / 2.0,
        ]
    } else {
        [
            drawn_width,
            0.0,
            0.0,
            drawn_height,
            (page_width - drawn_width) / 2.0,
            (page_height - drawn_height) / 2.0,
        ]
    }
}
