//! External image converter
//!
//! All pixel work is delegated to ImageMagick's `convert`, invoked once per
//! thumbnail with a fixed argument list. The tool sits behind the
//! [`Converter`] trait so the HTTP layer can be exercised without it.
//!
//! ## Key Components
//!
//! - [`Converter`] - run the tool with arguments and stdin, collect stdout
//! - [`ImageMagick`] - subprocess implementation with timeout and kill-on-drop
//! - [`StaticConverter`] - canned-output fake that records invocations
//! - [`image_thumbnail`] / [`text_thumbnail`] - the two rendering modes

mod command;
pub mod fake;
mod thumbnail;
mod traits;

pub use command::ImageMagick;
pub use fake::{Invocation, StaticConverter};
pub use thumbnail::{
    LABEL_BACKGROUND, LABEL_FILL, LABEL_GEOMETRY, THUMBNAIL_GEOMETRY, image_args, image_thumbnail,
    text_args, text_thumbnail,
};
pub use traits::{ConvertError, Converter};
