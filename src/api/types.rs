// API 类型定义模块
// 响应体结构和面向用户的提示信息

use serde::Serialize;

pub const MSG_READ_FAILED: &str = "无法读取 navigation 数据";
pub const MSG_WRITE_FAILED: &str = "无法写入 navigation 数据";
pub const MSG_INVALID_DOCUMENT: &str = "传入的数据格式不正确";
pub const MSG_SAVED: &str = "导航数据已保存";
pub const MSG_INVALID_JSON: &str = "请求体不是合法的 JSON";
pub const MSG_BODY_TOO_LARGE: &str = "请求体过大";
pub const MSG_BODY_UNREADABLE: &str = "无法读取请求体";
pub const MSG_METHOD_NOT_ALLOWED: &str = "不支持的请求方法";

/// `{ "message": ... }`
#[derive(Debug, Serialize)]
pub struct MessageBody<'a> {
    pub message: &'a str,
}

/// `{ "message": ..., "detail": ... }` for storage and request-body failures
#[derive(Debug, Serialize)]
pub struct FailureBody<'a> {
    pub message: &'a str,
    pub detail: String,
}

/// `{ "message": ..., "errors": [...] }` for documents the validator rejected
#[derive(Debug, Serialize)]
pub struct ValidationFailedBody<'a> {
    pub message: &'a str,
    pub errors: &'a [String],
}
