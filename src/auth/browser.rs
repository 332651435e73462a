use reqwest::Url;

use super::error::AuthError;

/// Opens URLs for the user.
pub trait BrowserLauncher: Send + Sync {
    fn open(&self, url: &str) -> Result<(), AuthError>;
}

/// Launches the platform's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), AuthError> {
        open::that(url).map_err(|e| AuthError::Browser(e.to_string()))
    }
}

/// Build the human-facing login URL for an authorization request.
///
/// Produces `{web_origin}/auth/cli?login_code=..&tenancy_id=..`; any path on
/// `web_origin` is kept as a prefix, and its query and fragment are dropped.
///
/// # Example
/// ```
/// use reqwest::Url;
/// use stack_auth_cli::auth::login_url;
///
/// let origin = Url::parse("http://localhost:3000").unwrap();
/// let url = login_url(&origin, "xyz", "tenant-1");
/// assert_eq!(
///     url.as_str(),
///     "http://localhost:3000/auth/cli?login_code=xyz&tenancy_id=tenant-1"
/// );
/// ```
pub fn login_url(web_origin: &Url, login_code: &str, tenancy_id: &str) -> Url {
    let mut url = web_origin.clone();
    let path = format!("{}/auth/cli", web_origin.path().trim_end_matches('/'));
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);
    url.query_pairs_mut()
        .append_pair("login_code", login_code)
        .append_pair("tenancy_id", tenancy_id);
    url
}
