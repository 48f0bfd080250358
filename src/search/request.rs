pub const DEFAULT_BASE_URL: &str = "http://10.1.72.173/nemoread/master/result/search/api.php";

/// Fixed query parameters sent with every lookup; `key` is appended last.
const FIXED_QUERY: &str = "type=all_uri&limit=100&classify=1";

/// Builds the lookup URL for one key.
///
/// The key is appended as-is. Characters such as `&` or spaces are not escaped.
pub fn build_request_url(base_url: &str, key: &str) -> String {
    format!("{}?{}&key={}", base_url, FIXED_QUERY, key)
}
