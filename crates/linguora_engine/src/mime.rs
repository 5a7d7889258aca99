use std::path::Path;

/// Used for any extension missing from the table.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Extensions the service can be asked to produce as `output_format`.
pub const OUTPUT_FORMATS: [&str; 5] = ["pdf", "docx", "pptx", "html", "txt"];

/// MIME type for the uploaded file part. Total: unknown extensions map to
/// [`FALLBACK_MIME`].
pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "rtf" => "application/rtf",
        "html" => "text/html",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        _ => FALLBACK_MIME,
    }
}

pub fn output_format_for_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.to_ascii_lowercase();
    OUTPUT_FORMATS.iter().copied().find(|known| *known == ext)
}

/// Lowercased extension of `file_name`, empty when there is none.
pub fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}
