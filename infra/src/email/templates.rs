//! Email bodies sent to submitters

/// Rendered email content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Message carrying a verification code
pub fn verification_code(code: &str, expiry_minutes: i64) -> EmailContent {
    EmailContent {
        subject: "Your Verification Code".to_string(),
        html: format!(
            "<h1>Verification Code</h1>\
             <p>Your verification code is: <strong>{}</strong></p>\
             <p>This code will expire in {} minutes.</p>",
            escape_html(code),
            expiry_minutes
        ),
        text: format!(
            "Your verification code is: {}\n\nThis code will expire in {} minutes.",
            code, expiry_minutes
        ),
    }
}

/// Acknowledgement sent after a verified project request submission
pub fn request_received(title: &str) -> EmailContent {
    EmailContent {
        subject: "Request Received".to_string(),
        html: format!(
            "<h1>Request Received</h1><p>We've received your request: <strong>{}</strong></p>",
            escape_html(title)
        ),
        text: format!("We've received your request: {}", title),
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
