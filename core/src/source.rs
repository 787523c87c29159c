//! Pulls `uint8_t <name>_map[] = { ... };` byte arrays out of LVGL C sources.

use log::{debug, warn};
use memchr::memmem;

const MAP_SUFFIX: &str = "_map[]";
const ELEMENT_TYPE: &str = "uint8_t";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    pub name: String,
    pub data: Vec<u8>,
}

/// Extracts every image array in declaration order. Inverted-palette
/// preprocessor branches are resolved to their `#else` side.
pub fn extract_images(source: &str) -> Vec<SourceImage> {
    let source = source.replace("\r\n", "\n");
    let mut images = Vec::new();
    for at in memmem::find_iter(source.as_bytes(), MAP_SUFFIX) {
        let Some(name) = declared_name(&source[..at]) else {
            continue;
        };
        let Some(body) = initializer_body(&source[at + MAP_SUFFIX.len()..]) else {
            warn!("Skipping {name}: no initializer terminated by '}};'");
            continue;
        };
        let data = parse_hex_bytes(&resolve_inverted(body));
        debug!("Extracted {name}: {} bytes", data.len());
        images.push(SourceImage {
            name: name.to_string(),
            data,
        });
    }
    images
}

pub fn filter_by_prefix(images: Vec<SourceImage>, prefix: &str) -> Vec<SourceImage> {
    images
        .into_iter()
        .filter(|image| image.name.starts_with(prefix))
        .collect()
}

/// Identifier directly before `_map[]`, provided it is declared as `uint8_t`.
fn declared_name(before: &str) -> Option<&str> {
    let start = before
        .char_indices()
        .rev()
        .find(|&(_, c)| !(c.is_ascii_alphanumeric() || c == '_'))
        .map_or(0, |(i, c)| i + c.len_utf8());
    let name = &before[start..];
    // `uint8_t` must be separated from the name by whitespace
    if name.is_empty() || !before[..start].ends_with(char::is_whitespace) {
        return None;
    }
    let declaration = before[..start].trim_end();
    let is_byte_array = declaration.ends_with(ELEMENT_TYPE)
        && declaration[..declaration.len() - ELEMENT_TYPE.len()]
            .chars()
            .next_back()
            .is_none_or(|c| !(c.is_ascii_alphanumeric() || c == '_'));
    is_byte_array.then_some(name)
}

/// Text between `= {` and the first `};`.
fn initializer_body(after: &str) -> Option<&str> {
    let rest = after.trim_start().strip_prefix('=')?.trim_start();
    let rest = rest.strip_prefix('{')?;
    let end = memmem::find(rest.as_bytes(), b"};")?;
    Some(&rest[..end])
}

fn resolve_inverted(body: &str) -> String {
    #[derive(PartialEq)]
    enum Branch {
        Outside,
        Inverted,
        Normal,
    }

    let mut branch = Branch::Outside;
    let mut kept = String::with_capacity(body.len());
    for line in body.lines() {
        let directive = line.trim_start();
        if directive.starts_with("#if") && directive.contains("INVERTED") {
            branch = Branch::Inverted;
            continue;
        }
        if branch != Branch::Outside {
            if directive.starts_with("#else") {
                branch = Branch::Normal;
                continue;
            }
            if directive.starts_with("#endif") {
                branch = Branch::Outside;
                continue;
            }
        }
        if branch != Branch::Inverted {
            kept.push_str(line);
            kept.push('\n');
        }
    }
    kept
}

/// One byte per `0x` literal, taken from its first two hex digits.
fn parse_hex_bytes(text: &str) -> Vec<u8> {
    let bytes = text.as_bytes();
    memmem::find_iter(bytes, b"0x")
        .filter_map(|at| {
            let digits = bytes.get(at + 2..at + 4)?;
            let digits = core::str::from_utf8(digits).ok()?;
            if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            u8::from_str_radix(digits, 16).ok()
        })
        .collect()
}
