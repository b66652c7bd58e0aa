// File: src/codes.rs
// Purpose: Expand a short error code into candidate message keys, most specific first

/// Where the error code sits in a generated message code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeFormat {
    /// `code.object.field`
    #[default]
    PrefixErrorCode,
    /// `object.field.code`
    PostfixErrorCode,
}

impl CodeFormat {
    fn join(&self, code: &str, object: Option<&str>, field: Option<&str>) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(3);
        if *self == CodeFormat::PrefixErrorCode {
            parts.push(code);
        }
        parts.extend(object.filter(|o| !o.is_empty()));
        parts.extend(field.filter(|f| !f.is_empty()));
        if *self == CodeFormat::PostfixErrorCode {
            parts.push(code);
        }
        parts.join(".")
    }
}

/// Builds the ordered list of message keys tried for an error.
///
/// For an object error the keys are `code.object` then `code`. For a field
/// error they are:
///
/// 1. `code.object.path` (plus de-indexed variants of `path`)
/// 2. `code.path`, then the path with one leading segment stripped at a time
///    (each again with de-indexed variants)
/// 3. `code.type` when the field type is known
/// 4. `code`
///
/// Duplicates are dropped, first occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct MessageCodesResolver {
    prefix: String,
    format: CodeFormat,
}

impl MessageCodesResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `prefix` to every generated code
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_format(mut self, format: CodeFormat) -> Self {
        self.format = format;
        self
    }

    /// Codes for an error on the object as a whole
    pub fn resolve_object_codes(&self, code: &str, object_name: &str) -> Vec<String> {
        let mut codes = Vec::with_capacity(2);
        self.push(&mut codes, code, Some(object_name), None);
        self.push(&mut codes, code, None, None);
        codes
    }

    /// Codes for an error on one field, `field` being a dotted (and possibly
    /// indexed) property path
    pub fn resolve_field_codes(
        &self,
        code: &str,
        object_name: &str,
        field: &str,
        field_type: Option<&str>,
    ) -> Vec<String> {
        let mut codes = Vec::new();

        for path in field_variants(field) {
            self.push(&mut codes, code, Some(object_name), Some(&path));
        }

        let segments = split_path(field);
        for start in 0..segments.len() {
            let suffix = segments[start..].join(".");
            for path in field_variants(&suffix) {
                self.push(&mut codes, code, None, Some(&path));
            }
        }

        if let Some(type_name) = field_type {
            self.push(&mut codes, code, None, Some(type_name));
        }
        self.push(&mut codes, code, None, None);
        codes
    }

    fn push(&self, codes: &mut Vec<String>, code: &str, object: Option<&str>, field: Option<&str>) {
        let generated = format!("{}{}", self.prefix, self.format.join(code, object, field));
        if !codes.contains(&generated) {
            codes.push(generated);
        }
    }
}

/// The path itself followed by variants with `[..]` keys removed, last key first
fn field_variants(path: &str) -> Vec<String> {
    let mut variants = vec![path.to_string()];
    let mut plain = path.to_string();
    while let Some(open) = plain.rfind('[') {
        let Some(close) = plain[open..].find(']').map(|i| open + i) else {
            break;
        };
        plain.replace_range(open..=close, "");
        variants.push(plain.clone());
    }
    variants
}

/// Split a property path on dots that are not inside `[..]`
fn split_path(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in path.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => {
                segments.push(&path[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&path[start..]);
    segments
}
