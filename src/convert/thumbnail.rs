//! Thumbnail generators: argument lists for the two rendering modes

use bytes::Bytes;

use super::traits::{ConvertError, Converter};

/// Final canvas, also the bounding box for resized images
pub const THUMBNAIL_GEOMETRY: &str = "100x100";
/// Canvas the label is rendered into before extending to the thumbnail size
pub const LABEL_GEOMETRY: &str = "60x60";
pub const LABEL_BACKGROUND: &str = "#eff0f1";
pub const LABEL_FILL: &str = "#101094";

const OUTPUT: &str = "png:-";

/// `convert <format>:- -resize 100x100 -gravity center -extent 100x100 png:-`
pub fn image_args(source_format: &str) -> Vec<String> {
    vec![
        format!("{source_format}:-"),
        "-resize".into(),
        THUMBNAIL_GEOMETRY.into(),
        "-gravity".into(),
        "center".into(),
        "-extent".into(),
        THUMBNAIL_GEOMETRY.into(),
        OUTPUT.into(),
    ]
}

/// `convert -size 60x60 -background .. -fill .. -gravity center label:<text> -extent 100x100 png:-`
pub fn text_args(label: &str) -> Vec<String> {
    vec![
        "-size".into(),
        LABEL_GEOMETRY.into(),
        "-background".into(),
        LABEL_BACKGROUND.into(),
        "-fill".into(),
        LABEL_FILL.into(),
        "-gravity".into(),
        "center".into(),
        format!("label:{}", escape_label(label)),
        "-extent".into(),
        THUMBNAIL_GEOMETRY.into(),
        OUTPUT.into(),
    ]
}

/// ImageMagick reads `label:@path` from a file; escape so the text is drawn as-is
fn escape_label(label: &str) -> String {
    match label.strip_prefix('@') {
        Some(rest) => format!("\\@{rest}"),
        None => label.to_string(),
    }
}

/// Resize an image of `source_format` to fit 100x100, centered and padded
pub async fn image_thumbnail(
    converter: &dyn Converter,
    source_format: &str,
    input: Bytes,
) -> Result<Bytes, ConvertError> {
    tracing::debug!(format = source_format, input_bytes = input.len(), "Rendering image thumbnail");
    converter.run(&image_args(source_format), Some(input)).await
}

/// Render `label` on a fixed background. Length is the caller's concern.
pub async fn text_thumbnail(converter: &dyn Converter, label: &str) -> Result<Bytes, ConvertError> {
    tracing::debug!(label, "Rendering text thumbnail");
    converter.run(&text_args(label), None).await
}
