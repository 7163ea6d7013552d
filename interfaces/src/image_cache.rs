use entities::image::ImageToken;

/// Short-lived storage for images uploaded by the web page.
///
/// Implementations must be safe to share between request handlers.
pub trait ImageCache {
    /// Stores the payload and returns a fresh token for it.
    fn put(&self, payload: Vec<u8>) -> ImageToken;

    /// Returns the payload if the token is known and its entry has not expired yet.
    fn get(&self, token: &ImageToken) -> Option<Vec<u8>>;

    /// Drops expired entries, returns how many were removed.
    fn purge_expired(&self) -> usize;
}
