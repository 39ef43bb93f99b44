//! Navigation document validator
//!
//! Checks a submitted document against the structural and size limits and
//! returns the complete list of problems in one pass. Messages are written
//! for direct display to the person editing the navigation page.

use serde_json::{Map, Value};
use url::Url;

use super::sanitize::sanitize_icon;

pub const MAX_CATEGORIES: usize = 50;
pub const MAX_LINKS_PER_CATEGORY: usize = 100;
pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_URL_LENGTH: usize = 500;
pub const MAX_DESCRIPTION_LENGTH: usize = 200;
pub const MAX_ICON_LENGTH: usize = 5000;

const ALLOWED_URL_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

/// Outcome of validating a candidate document
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    /// Copy of the payload with every non-empty icon sanitized
    pub document: Value,
    /// Every problem found, in document order
    pub errors: Vec<String>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a candidate navigation document.
///
/// Never fails: problems are collected into [`Validation::errors`]. The input
/// is left untouched; sanitized icons only appear in [`Validation::document`],
/// and they are sanitized even when the icon itself is reported as too long.
pub fn validate(payload: &Value) -> Validation {
    let Value::Array(categories) = payload else {
        return Validation {
            document: payload.clone(),
            errors: vec!["根对象必须是数组".to_string()],
        };
    };

    let mut errors = Vec::new();
    if categories.len() > MAX_CATEGORIES {
        errors.push(format!("分类数量不能超过{MAX_CATEGORIES}个"));
    }

    let mut sanitized = categories.clone();
    for (index, category) in sanitized.iter_mut().enumerate() {
        check_category(index + 1, category, &mut errors);
    }

    Validation {
        document: Value::Array(sanitized),
        errors,
    }
}

fn check_category(position: usize, category: &mut Value, errors: &mut Vec<String>) {
    let mut no_fields = Map::new();
    let Some(fields) = fields_of(category, &mut no_fields) else {
        errors.push(format!("第 {position} 个分类不是对象"));
        return;
    };

    match non_blank_str(fields, "title") {
        None => errors.push(format!("第 {position} 个分类缺少有效的 title")),
        Some(title) if text_len(title) > MAX_TITLE_LENGTH => errors.push(format!(
            "第 {position} 个分类标题长度不能超过{MAX_TITLE_LENGTH}字符"
        )),
        Some(_) => {}
    }

    let label = category_label(fields.get("title"));

    let Some(links) = fields.get_mut("links").and_then(Value::as_array_mut) else {
        errors.push(format!("第 {position} 个分类的 links 不是数组"));
        return;
    };

    if links.len() > MAX_LINKS_PER_CATEGORY {
        errors.push(format!(
            "第 {position} 个分类的链接数量不能超过{MAX_LINKS_PER_CATEGORY}个"
        ));
    }

    for (index, link) in links.iter_mut().enumerate() {
        check_link(&label, index + 1, link, errors);
    }
}

fn check_link(category: &str, position: usize, link: &mut Value, errors: &mut Vec<String>) {
    let prefix = format!("分类 {category} 的第 {position} 个链接");

    let mut no_fields = Map::new();
    let Some(fields) = fields_of(link, &mut no_fields) else {
        errors.push(format!("{prefix}不是对象"));
        return;
    };

    match non_blank_str(fields, "title") {
        None => errors.push(format!("{prefix}缺少 title")),
        Some(title) if text_len(title) > MAX_TITLE_LENGTH => {
            errors.push(format!("{prefix}标题长度不能超过{MAX_TITLE_LENGTH}字符"));
        }
        Some(_) => {}
    }

    // Length is checked before syntax, so an oversized URL is never reported as malformed.
    match non_blank_str(fields, "url") {
        None => errors.push(format!("{prefix}缺少 url")),
        Some(url) if text_len(url) > MAX_URL_LENGTH => {
            errors.push(format!("{prefix}URL长度不能超过{MAX_URL_LENGTH}字符"));
        }
        Some(url) if !is_allowed_url(url) => errors.push(format!("{prefix}URL格式不合法")),
        Some(_) => {}
    }

    if let Some(Value::String(description)) = fields.get("description") {
        if text_len(description) > MAX_DESCRIPTION_LENGTH {
            errors.push(format!(
                "{prefix}描述长度不能超过{MAX_DESCRIPTION_LENGTH}字符"
            ));
        }
    }

    if let Some(Value::String(icon)) = fields.get_mut("icon") {
        if !icon.is_empty() {
            if text_len(icon) > MAX_ICON_LENGTH {
                errors.push(format!("{prefix}图标长度不能超过{MAX_ICON_LENGTH}字符"));
            }
            *icon = sanitize_icon(icon);
        }
    }
}

/// Named fields of an object-like value
///
/// Arrays count as objects that have no named fields, so they fail the field
/// checks instead of the "not an object" check. Null and scalars yield `None`.
fn fields_of<'a>(
    value: &'a mut Value,
    no_fields: &'a mut Map<String, Value>,
) -> Option<&'a mut Map<String, Value>> {
    match value {
        Value::Object(fields) => Some(fields),
        Value::Array(_) => Some(no_fields),
        _ => None,
    }
}

/// String field that is present and not blank after trimming (returned untrimmed)
fn non_blank_str<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// How a category is named in link-level messages
///
/// Follows string interpolation of a loosely typed title: a missing title
/// reads `undefined`, and arrays join their items with commas.
fn category_label(title: Option<&Value>) -> String {
    title.map_or_else(|| "undefined".to_string(), display_value)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{f}"),
            _ => n.to_string(),
        },
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Length in UTF-16 code units, the unit the limits are defined in
fn text_len(s: &str) -> usize {
    s.encode_utf16().count()
}

fn is_allowed_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok_and(|url| ALLOWED_URL_SCHEMES.contains(&url.scheme()))
}
