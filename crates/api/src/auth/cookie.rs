pub const SESSION_COOKIE: &str = "session_id";

pub fn build_session_cookie(
    raw_token: &str,
    max_age_secs: i64,
    cookie_domain: &Option<String>,
    secure: bool,
) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };
    let same_site = if secure { "Strict" } else { "Lax" };

    let mut cookie = format!(
        "{SESSION_COOKIE}={}; HttpOnly{}; SameSite={}; Path=/; Max-Age={}",
        raw_token, secure_flag, same_site, max_age_secs
    );

    if let Some(domain) = cookie_domain {
        cookie.push_str(&format!("; Domain={}", domain));
    }

    cookie
}

pub fn build_clear_cookie(cookie_domain: &Option<String>, secure: bool) -> String {
    build_session_cookie("", 0, cookie_domain, secure)
}

/// Pull the session token out of a `Cookie` request header.
pub fn extract_session_id(cookie_header: &str) -> Option<String> {
    cookie_header
        .split(';')
        .filter_map(|part| part.trim().strip_prefix("session_id="))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_attributes() {
        let cookie = build_session_cookie("abc", 3600, &Some("book.example".to_string()), true);
        assert_eq!(
            cookie,
            "session_id=abc; HttpOnly; Secure; SameSite=Strict; Path=/; Max-Age=3600; Domain=book.example"
        );

        let local = build_session_cookie("abc", 60, &None, false);
        assert!(!local.contains("Secure"));
        assert!(local.contains("SameSite=Lax"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = build_clear_cookie(&None, false);
        assert!(cookie.starts_with("session_id=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn extracts_among_other_cookies() {
        assert_eq!(
            extract_session_id("theme=dark; session_id=tok123; lang=en"),
            Some("tok123".to_string())
        );
        assert_eq!(extract_session_id("session_id=; theme=dark"), None);
        assert_eq!(extract_session_id("other_session_id=x"), None);
    }
}
