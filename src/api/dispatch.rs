use axum::{
    body::Body,
    http::{HeaderValue, Method},
};
use bytes::Bytes;
use http_body_util::BodyExt;

use super::{error::DispatchError, utils::parse_content_type};
use crate::convert::{ConvertError, Converter, image_thumbnail, text_thumbnail};

/// Major type that selects image mode; compared case-sensitively
pub const IMAGE_MAJOR: &str = "image";
/// Longest label accepted in text mode, in characters
pub const MAX_LABEL_CHARS: usize = 4;

/// Routes one request to the image or text generator
///
/// - `image/<format>`: the body is read and converted from `<format>`
/// - `<anything>/<label>`: the label is rendered, the body is never read
///
/// The thumbnail is returned whole so the caller can still pick the status.
pub async fn dispatch(
    converter: &dyn Converter,
    method: &Method,
    content_type: Option<&HeaderValue>,
    body: Body,
) -> Result<Bytes, DispatchError> {
    if *method != Method::POST {
        tracing::debug!(%method, "Rejecting non-POST request");
        return Err(DispatchError::BadRequest);
    }

    // Labels may be any UTF-8 text, so obs-text bytes are allowed through
    let header = content_type
        .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
        .ok_or_else(|| {
            tracing::debug!("Missing or non-UTF-8 Content-Type header");
            DispatchError::BadRequest
        })?;

    let content_type = parse_content_type(header).inspect_err(|_| {
        tracing::debug!(content_type = header, "Malformed Content-Type header");
    })?;

    if content_type.major == IMAGE_MAJOR {
        let input = read_body(body).await?;
        return Ok(image_thumbnail(converter, content_type.minor, input).await?);
    }

    let label = content_type.minor;
    if label.chars().count() > MAX_LABEL_CHARS {
        tracing::debug!(label, "Label longer than {} characters", MAX_LABEL_CHARS);
        return Err(DispatchError::BadRequest);
    }

    Ok(text_thumbnail(converter, label).await?)
}

/// Reads the request body as sent; `Content-Encoding` is not interpreted
async fn read_body(body: Body) -> Result<Bytes, ConvertError> {
    let collected = body
        .collect()
        .await
        .map_err(|err| ConvertError::Io(std::io::Error::other(err)))?;

    Ok(collected.to_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{StaticConverter, image_args, text_args};

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";

    async fn run(
        converter: &StaticConverter,
        method: Method,
        content_type: Option<&'static str>,
        body: &'static [u8],
    ) -> Result<Bytes, DispatchError> {
        let header = content_type.map(|value| HeaderValue::from_bytes(value.as_bytes()).unwrap());
        dispatch(converter, &method, header.as_ref(), Body::from(body)).await
    }

    #[tokio::test]
    async fn test_only_post_is_accepted() {
        let converter = StaticConverter::succeeding(PNG);

        for method in [Method::GET, Method::PUT, Method::HEAD, Method::DELETE] {
            let result = run(&converter, method, Some("text/ok"), b"").await;
            assert!(matches!(result, Err(DispatchError::BadRequest)));
        }
        assert!(converter.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let converter = StaticConverter::succeeding(PNG);

        let result = run(&converter, Method::POST, None, b"").await;

        assert!(matches!(result, Err(DispatchError::BadRequest)));
    }

    #[tokio::test]
    async fn test_image_mode_passes_format_and_body() {
        let converter = StaticConverter::succeeding(PNG);

        let output = run(&converter, Method::POST, Some("image/jpeg"), b"\xff\xd8\xff")
            .await
            .unwrap();

        assert_eq!(&output[..], PNG);
        let calls = converter.calls();
        assert_eq!(calls[0].args, image_args("jpeg"));
        assert_eq!(calls[0].stdin.as_deref(), Some(&b"\xff\xd8\xff"[..]));
    }

    #[tokio::test]
    async fn test_image_match_is_case_sensitive() {
        let converter = StaticConverter::succeeding(PNG);

        // "Image" is not "image", so "png" becomes a three character label
        run(&converter, Method::POST, Some("Image/png"), b"ignored")
            .await
            .unwrap();

        let calls = converter.calls();
        assert_eq!(calls[0].args, text_args("png"));
        assert!(calls[0].stdin.is_none());
    }

    #[tokio::test]
    async fn test_label_length_cutoff() {
        let converter = StaticConverter::succeeding(PNG);

        assert!(run(&converter, Method::POST, Some("text/abcd"), b"").await.is_ok());
        assert!(matches!(
            run(&converter, Method::POST, Some("text/abcde"), b"").await,
            Err(DispatchError::BadRequest)
        ));
        assert!(matches!(
            run(&converter, Method::POST, Some("text/toolong"), b"").await,
            Err(DispatchError::BadRequest)
        ));
        assert_eq!(converter.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_multibyte_labels_count_characters() {
        let converter = StaticConverter::succeeding(PNG);

        assert!(run(&converter, Method::POST, Some("text/é"), b"").await.is_ok());
        assert!(run(&converter, Method::POST, Some("text/日本語字"), b"").await.is_ok());
        assert!(matches!(
            run(&converter, Method::POST, Some("text/日本語文字"), b"").await,
            Err(DispatchError::BadRequest)
        ));

        let calls = converter.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].args, text_args("é"));
        assert_eq!(calls[1].args, text_args("日本語字"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_content_type_is_bad_request() {
        let converter = StaticConverter::succeeding(PNG);
        let header = HeaderValue::from_bytes(b"text/\xff\xfe").unwrap();

        let result = dispatch(&converter, &Method::POST, Some(&header), Body::empty()).await;

        assert!(matches!(result, Err(DispatchError::BadRequest)));
        assert!(converter.calls().is_empty());
    }

    #[tokio::test]
    async fn test_image_mode_has_no_label_limit() {
        let converter = StaticConverter::succeeding(PNG);

        assert!(run(&converter, Method::POST, Some("image/jpeg2000"), b"").await.is_ok());
    }

    #[tokio::test]
    async fn test_converter_failure_is_wrapped() {
        let converter = StaticConverter::failing("exit status 1");

        let result = run(&converter, Method::POST, Some("text/ok"), b"").await;

        assert!(matches!(result, Err(DispatchError::ConversionFailed(_))));
    }
}
