//! Coarse user-agent classification.
//!
//! This is a heuristic, not a parser. Each dimension is resolved by walking an
//! ordered rule table and taking the first case-insensitive substring match.
//! Agents matching several rules resolve to the earliest one, so a Chromium
//! Edge agent (which also advertises `Chrome`) is reported as `Chrome`, and an
//! Android agent (which also advertises `Linux`) as `Linux`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserFamily {
    Chrome,
    Firefox,
    Safari,
    Edge,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    MacOs,
    Linux,
    Android,
    Ios,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
}

/// Browser rules, checked in order.
pub const BROWSER_RULES: &[(&str, BrowserFamily)] = &[
    ("chrome", BrowserFamily::Chrome),
    ("firefox", BrowserFamily::Firefox),
    ("safari", BrowserFamily::Safari),
    ("edge", BrowserFamily::Edge),
];

/// Operating system rules, checked in order.
pub const OS_RULES: &[(&str, OsFamily)] = &[
    ("windows", OsFamily::Windows),
    ("mac", OsFamily::MacOs),
    ("linux", OsFamily::Linux),
    ("android", OsFamily::Android),
    ("ios", OsFamily::Ios),
];

/// Device rules, checked in order. No match means [`DeviceType::Desktop`].
pub const DEVICE_RULES: &[(&str, DeviceType)] = &[
    ("mobile", DeviceType::Mobile),
    ("tablet", DeviceType::Tablet),
];

impl BrowserFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserFamily::Chrome => "Chrome",
            BrowserFamily::Firefox => "Firefox",
            BrowserFamily::Safari => "Safari",
            BrowserFamily::Edge => "Edge",
            BrowserFamily::Unknown => "Unknown",
        }
    }
}

impl OsFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Windows => "Windows",
            OsFamily::MacOs => "macOS",
            OsFamily::Linux => "Linux",
            OsFamily::Android => "Android",
            OsFamily::Ios => "iOS",
            OsFamily::Unknown => "Unknown",
        }
    }
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Mobile => "Mobile",
            DeviceType::Tablet => "Tablet",
            DeviceType::Desktop => "Desktop",
        }
    }
}

impl fmt::Display for BrowserFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a user agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserAgentClass {
    pub browser: BrowserFamily,
    pub os: OsFamily,
    pub device: DeviceType,
}

fn first_match<T: Copy>(haystack: &str, rules: &[(&str, T)], fallback: T) -> T {
    rules
        .iter()
        .find(|(needle, _)| haystack.contains(needle))
        .map(|(_, value)| *value)
        .unwrap_or(fallback)
}

/// Classifies a raw `User-Agent` header value.
///
/// # Examples
///
/// ```ignore
/// let class = classify_user_agent("Mozilla/5.0 (Linux; Android 10) Mobile Chrome");
/// assert_eq!(class.browser, BrowserFamily::Chrome);
/// assert_eq!(class.os, OsFamily::Linux);
/// assert_eq!(class.device, DeviceType::Mobile);
/// ```
pub fn classify_user_agent(user_agent: &str) -> UserAgentClass {
    let ua = user_agent.to_lowercase();

    UserAgentClass {
        browser: first_match(&ua, BROWSER_RULES, BrowserFamily::Unknown),
        os: first_match(&ua, OS_RULES, OsFamily::Unknown),
        device: first_match(&ua, DEVICE_RULES, DeviceType::Desktop),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_android_mobile_chrome_resolves_linux() {
        let class = classify_user_agent("Mozilla/5.0 (Linux; Android 10) Mobile Chrome");

        assert_eq!(
            class,
            UserAgentClass {
                browser: BrowserFamily::Chrome,
                os: OsFamily::Linux,
                device: DeviceType::Mobile,
            }
        );
    }

    #[test]
    fn test_desktop_firefox_on_windows() {
        let class = classify_user_agent(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
        );

        assert_eq!(class.browser, BrowserFamily::Firefox);
        assert_eq!(class.os, OsFamily::Windows);
        assert_eq!(class.device, DeviceType::Desktop);
    }

    #[test]
    fn test_safari_on_mac() {
        let class = classify_user_agent(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_2) AppleWebKit/605.1.15 Version/17.2 Safari/605.1.15",
        );

        assert_eq!(class.browser, BrowserFamily::Safari);
        assert_eq!(class.os, OsFamily::MacOs);
    }

    #[test]
    fn test_iphone_resolves_mac_first() {
        // "like Mac OS X" precedes the "ios" rule.
        let class = classify_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) Version/17.2 Mobile/15E148 Safari/604.1",
        );

        assert_eq!(class.os, OsFamily::MacOs);
        assert_eq!(class.device, DeviceType::Mobile);
    }

    #[test]
    fn test_edge_reports_chrome() {
        let class = classify_user_agent(
            "Mozilla/5.0 (Windows NT 10.0) AppleWebKit/537.36 Chrome/120.0 Safari/537.36 Edg/120.0",
        );
        assert_eq!(class.browser, BrowserFamily::Chrome);

        let legacy = classify_user_agent("Mozilla/5.0 (Windows NT 10.0) Edge/18.19041");
        assert_eq!(legacy.browser, BrowserFamily::Edge);
    }

    #[test]
    fn test_tablet() {
        let class = classify_user_agent("SomeReader/2.0 (Android; Tablet)");
        assert_eq!(class.device, DeviceType::Tablet);
        assert_eq!(class.os, OsFamily::Android);
    }

    #[test]
    fn test_unknown_agent() {
        let class = classify_user_agent("curl/8.5.0");

        assert_eq!(class.browser, BrowserFamily::Unknown);
        assert_eq!(class.os, OsFamily::Unknown);
        assert_eq!(class.device, DeviceType::Desktop);

        assert_eq!(classify_user_agent(""), class);
    }

    #[test]
    fn test_labels() {
        assert_eq!(OsFamily::MacOs.to_string(), "macOS");
        assert_eq!(OsFamily::Ios.as_str(), "iOS");
        assert_eq!(BrowserFamily::Unknown.as_str(), "Unknown");
        assert_eq!(DeviceType::Desktop.as_str(), "Desktop");
    }
}
