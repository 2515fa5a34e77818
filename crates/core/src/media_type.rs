//! Media type mapping for artifact file names

/// Media type served for an artifact file name, derived from its extension
#[must_use]
pub fn media_type_for(name: &str) -> &'static str {
    match name.rsplit('.').next().unwrap_or_default() {
        "xml" | "pom" => "application/xml",
        "jar" | "war" | "ear" => "application/java-archive",
        "json" | "module" => "application/json",
        "zip" => "application/zip",
        "gz" | "tgz" => "application/gzip",
        "md5" | "sha1" | "sha256" | "sha512" | "asc" | "txt" => "text/plain",
        "html" => "text/html",
        _ => "application/octet-stream",
    }
}
