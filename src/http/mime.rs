//! MIME type detection for front-end assets

/// Content-Type for a file extension, matched case-insensitively
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension.map(str::to_ascii_lowercase) else {
        return "application/octet-stream";
    };

    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "json" | "map" => "application/json",
        "txt" => "text/plain; charset=utf-8",

        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",

        // Web fonts for the CJK font switcher
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",

        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_end_types() {
        assert_eq!(get_content_type(Some("html")), "text/html; charset=utf-8");
        assert_eq!(get_content_type(Some("css")), "text/css; charset=utf-8");
        assert_eq!(
            get_content_type(Some("js")),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(get_content_type(Some("woff2")), "font/woff2");
        assert_eq!(get_content_type(Some("TTF")), "font/ttf");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(get_content_type(Some("exe")), "application/octet-stream");
        assert_eq!(get_content_type(None), "application/octet-stream");
    }
}
