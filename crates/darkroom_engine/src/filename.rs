use sha2::{Digest, Sha256};

const SLUG_MAX_LEN: usize = 60;

/// Deterministic, filesystem-safe name for a saved result:
/// `{prompt_slug}--{short_hash(image_ref)}.{ext}`.
pub fn download_filename(prompt: &str, image_ref: &str) -> String {
    let slug = prompt_slug(prompt);
    let hash = short_hash(image_ref);
    let ext = extension_for(image_ref);
    format!("{slug}--{hash}.{ext}")
}

fn prompt_slug(prompt: &str) -> String {
    let mut slug = String::with_capacity(prompt.len());
    let mut prev_dash = true;
    for c in prompt.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
        if slug.len() >= SLUG_MAX_LEN {
            break;
        }
    }
    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "image".to_string()
    } else {
        slug
    }
}

/// Extension taken from the last path segment of the locator, query stripped.
/// Unknown extensions fall back to png.
fn extension_for(image_ref: &str) -> &'static str {
    let path = image_ref
        .split(['?', '#'])
        .next()
        .unwrap_or(image_ref);
    let ext = path
        .rsplit('/')
        .next()
        .and_then(|segment| segment.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") => "jpg",
        Some("jpeg") => "jpeg",
        Some("webp") => "webp",
        Some("gif") => "gif",
        _ => "png",
    }
}

fn short_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
