//! Image file and preview types
//!
//! A selected file and its transient local rendering. The preview is owned
//! by the upload manager's state and released whenever that state drops it.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// A file picked by the user for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Local rendering of a selected file, as a data URL the embedding UI can
/// hand straight to an image element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalPreview {
    pub file_name: String,
    pub data_url: String,
}

impl LocalPreview {
    pub fn render(file: &ImageFile) -> Self {
        Self {
            file_name: file.file_name.clone(),
            data_url: format!(
                "data:{};base64,{}",
                file.content_type,
                BASE64.encode(&file.bytes)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_renders_a_data_url() {
        let file = ImageFile::new("avatar.png", "image/png", vec![1, 2, 3]);
        let preview = LocalPreview::render(&file);

        assert_eq!(preview.file_name, "avatar.png");
        assert_eq!(preview.data_url, "data:image/png;base64,AQID");
    }
}
