//! Render requests as reproducible `curl` command lines
//!
//! The output is meant to be pasted into a POSIX shell while debugging a
//! failing test, so every argument goes through [`shell_quote`].

use crate::traits::{HttpBody, HttpRequest};

/// Render `request` as a `curl` invocation.
///
/// Headers appear in name order. Byte bodies are passed with `-d` (decoded
/// lossily as UTF-8); multipart bodies become one `-F` per field and per
/// file, with file parts referencing the file name via `@`.
///
/// ```rust
/// use sakusou_transport::{HttpRequest, to_curl};
///
/// let request = HttpRequest::new("GET", "https://api.example.com/v1/users")
///     .with_header("accept", "*/*");
/// assert_eq!(
///     to_curl(&request),
///     "curl -X GET -H 'accept: */*' https://api.example.com/v1/users"
/// );
/// ```
pub fn to_curl(request: &HttpRequest) -> String {
    let mut parts: Vec<String> = vec![
        "curl".to_string(),
        "-X".to_string(),
        request.method.to_uppercase(),
    ];

    for (name, value) in &request.headers {
        parts.push("-H".to_string());
        parts.push(shell_quote(&format!("{}: {}", name, value)));
    }

    match &request.body {
        None => {}
        Some(HttpBody::Bytes(bytes)) => {
            parts.push("-d".to_string());
            parts.push(shell_quote(&String::from_utf8_lossy(bytes)));
        }
        Some(HttpBody::Multipart { fields, files }) => {
            for (name, value) in fields {
                parts.push("-F".to_string());
                parts.push(shell_quote(&format!("{}={}", name, value)));
            }
            for file in files {
                parts.push("-F".to_string());
                parts.push(shell_quote(&format!(
                    "{}=@{};type={}",
                    file.field, file.file_name, file.content_type
                )));
            }
        }
    }

    parts.push(shell_quote(&request.url));
    parts.join(" ")
}

/// Quote `text` for a POSIX shell.
///
/// Text made only of characters that are never special to the shell is
/// returned unchanged; anything else is wrapped in single quotes with
/// embedded single quotes spliced as `'"'"'`.
pub fn shell_quote(text: &str) -> String {
    if text.is_empty() {
        return "''".to_string();
    }

    let safe = text
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c));
    if safe {
        return text.to_string();
    }

    format!("'{}'", text.replace('\'', r#"'"'"'"#))
}
