//! Single-page PDF assembly with `lopdf`.

use crate::error::ExportError;
use crate::page::{A4, fit_to_a4};
use crate::raster::Bitmap;
use lopdf::{Document, Object, Stream, dictionary};

/// XObject name the page content stream paints.
const IMAGE_NAME: &str = "Im0";

/// Build a portrait A4 PDF containing `bitmap` as one full-width image.
pub fn build_pdf(bitmap: &Bitmap, title: &str) -> Result<Vec<u8>, ExportError> {
    if bitmap.width == 0 || bitmap.height == 0 {
        return Err(ExportError::EmptyBitmap {
            width: bitmap.width,
            height: bitmap.height,
        });
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => bitmap.width as i64,
            "Height" => bitmap.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        bitmap.to_rgb_on_white(),
    );
    let image_id = doc.add_object(image_stream);

    let rect = fit_to_a4(bitmap.width, bitmap.height);
    let content = format!(
        "q {:.4} 0 0 {:.4} {:.4} {:.4} cm /{IMAGE_NAME} Do Q",
        rect.width, rect.height, rect.x, rect.y
    );
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

    let resources_id = doc.add_object(dictionary! {
        "XObject" => dictionary! {
            IMAGE_NAME => image_id,
        },
    });

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(A4.width as _),
            Object::Real(A4.height as _),
        ],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::from(page_id)],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(title),
        "Producer" => Object::string_literal("DragVoice"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    log::debug!(
        "built PDF: {}x{} px image, {} bytes",
        bitmap.width,
        bitmap.height,
        out.len()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_single_page_document() {
        let bmp = Bitmap::solid(8, 6, [200, 100, 50, 255]);
        let bytes = build_pdf(&bmp, "Invoice 001").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn rejects_empty_bitmap() {
        let bmp = Bitmap {
            width: 0,
            height: 0,
            rgba: Vec::new(),
        };
        assert!(matches!(
            build_pdf(&bmp, "x"),
            Err(ExportError::EmptyBitmap { .. })
        ));
    }
}
