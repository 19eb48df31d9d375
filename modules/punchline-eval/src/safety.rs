use serde::Serialize;

/// Disallowed substrings, checked in order. Matching ignores case.
pub const UNSAFE_KEYWORDS: &[&str] = &["darn", "maldita", "maldito"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetyVerdict {
    pub is_safe: bool,
    pub status: String,
}

/// Flag `text` as unsafe on the first keyword it contains, naming that keyword.
pub fn check_safety(text: &str, keywords: &[&str]) -> SafetyVerdict {
    let lowered = text.to_lowercase();
    for keyword in keywords {
        if lowered.contains(&keyword.to_lowercase()) {
            return SafetyVerdict {
                is_safe: false,
                status: format!("Unsafe (Reason: '{keyword}')"),
            };
        }
    }
    SafetyVerdict {
        is_safe: true,
        status: "Safe".to_string(),
    }
}
