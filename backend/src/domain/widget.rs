//! Public recommendation widget: request validation and origin policy.
//!
//! The widget runs on third-party pages. A request proves which website it
//! belongs to with that website's verification token, and in production the
//! browser `Origin` must also resolve to the website's registered domain.

use serde::Serialize;
use url::Url;

use super::WebsiteId;

/// Image served when a promoted article has none.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/350x197/111111/333333?text=CredX";
/// Link served when a promoted article has no original URL.
pub const PLACEHOLDER_LINK: &str = "#";

/// Validation errors for raw widget input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetValidationError {
    #[error("verificationToken is required")]
    MissingToken,
    #[error("userId is required")]
    MissingViewer,
    #[error("Origin header is required")]
    MissingOrigin,
}

/// Validated widget request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetRequest {
    verification_token: String,
    viewer_id: String,
    origin: String,
}

impl WidgetRequest {
    /// Validate raw values; blank strings count as missing.
    pub fn try_from_parts(
        verification_token: Option<&str>,
        viewer_id: Option<&str>,
        origin: Option<&str>,
    ) -> Result<Self, WidgetValidationError> {
        let present = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };
        Ok(Self {
            verification_token: present(verification_token)
                .ok_or(WidgetValidationError::MissingToken)?,
            viewer_id: present(viewer_id).ok_or(WidgetValidationError::MissingViewer)?,
            origin: present(origin).ok_or(WidgetValidationError::MissingOrigin)?,
        })
    }

    pub fn verification_token(&self) -> &str {
        &self.verification_token
    }

    /// Opaque visitor identifier supplied by the embedding page.
    pub fn viewer_id(&self) -> &str {
        &self.viewer_id
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}

/// Website resolved from a verification token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedWebsite {
    pub website_id: WebsiteId,
    pub domain_name: String,
}

/// Whether the request origin must match the verified domain.
///
/// Only production enforces the match. Development and staging accept any
/// origin so the widget can be embedded from localhost; that also means a
/// leaked token is usable from anywhere outside production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginPolicy {
    Enforce,
    Permissive,
}

impl OriginPolicy {
    /// Policy for the given deployment flag.
    pub const fn for_environment(production: bool) -> Self {
        if production { Self::Enforce } else { Self::Permissive }
    }

    /// Check `origin` against the registered domain.
    pub fn allows(self, origin: &str, registered_domain: &str) -> bool {
        match self {
            Self::Permissive => true,
            Self::Enforce => origin_hostname(origin)
                .is_some_and(|host| host == normalise_domain(registered_domain)),
        }
    }
}

/// Lower-cased hostname of an origin, if it parses as a URL.
pub fn origin_hostname(origin: &str) -> Option<String> {
    Url::parse(origin)
        .ok()?
        .host_str()
        .map(str::to_ascii_lowercase)
}

/// Strip an `http(s)://` prefix and trailing slashes, then lower-case.
///
/// # Examples
/// ```
/// use credx_backend::domain::normalise_domain;
///
/// assert_eq!(normalise_domain("https://Good.com/"), "good.com");
/// assert_eq!(normalise_domain("good.com"), "good.com");
/// ```
pub fn normalise_domain(raw: &str) -> String {
    let lowered = raw.trim().to_ascii_lowercase();
    let without_scheme = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
        .unwrap_or(&lowered);
    without_scheme.trim_end_matches('/').to_owned()
}

/// Recommendation payload rendered by the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: String,
}

impl Recommendation {
    /// Build a payload, filling placeholder link and image.
    pub fn new(
        title: String,
        description: Option<String>,
        url: Option<String>,
        image: Option<String>,
    ) -> Self {
        let filled = |value: Option<String>, fallback: &str| {
            value
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| fallback.to_owned())
        };
        Self {
            title,
            description: description.unwrap_or_default(),
            url: filled(url, PLACEHOLDER_LINK),
            image: filled(image, PLACEHOLDER_IMAGE_URL),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Origin matching and request validation.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://good.com", "good.com", true)]
    #[case("https://GOOD.com", "https://good.com/", true)]
    #[case("http://good.com:8080", "good.com", true)]
    #[case("https://evil.com", "good.com", false)]
    #[case("https://sub.good.com", "good.com", false)]
    #[case("not a url", "good.com", false)]
    fn enforced_policy_compares_hostnames(
        #[case] origin: &str,
        #[case] domain: &str,
        #[case] allowed: bool,
    ) {
        assert_eq!(OriginPolicy::Enforce.allows(origin, domain), allowed);
    }

    #[rstest]
    fn permissive_policy_accepts_any_origin() {
        assert!(OriginPolicy::Permissive.allows("https://evil.com", "good.com"));
    }

    #[rstest]
    #[case(None, Some("v"), Some("https://a.b"), WidgetValidationError::MissingToken)]
    #[case(Some("t"), Some("  "), Some("https://a.b"), WidgetValidationError::MissingViewer)]
    #[case(Some("t"), Some("v"), None, WidgetValidationError::MissingOrigin)]
    fn missing_fields_are_rejected(
        #[case] token: Option<&str>,
        #[case] viewer: Option<&str>,
        #[case] origin: Option<&str>,
        #[case] expected: WidgetValidationError,
    ) {
        assert_eq!(WidgetRequest::try_from_parts(token, viewer, origin), Err(expected));
    }

    #[rstest]
    fn recommendation_defaults_are_applied() {
        let rec = Recommendation::new("Intro".into(), None, None, Some(String::new()));
        assert_eq!(rec.url, PLACEHOLDER_LINK);
        assert_eq!(rec.image, PLACEHOLDER_IMAGE_URL);
        assert_eq!(rec.description, "");
    }
}
