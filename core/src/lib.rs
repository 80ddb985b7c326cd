
/// A single play that can be forwarded to a listening-history service
pub trait ListenData {
    type MetaType<'m>: serde::Serialize where Self: 'm;

    /// Seconds since the unix epoch
    fn listened_at(&self) -> i64;

    fn track_name(&self) -> &str;
    fn artist_name(&self) -> &str;

    fn release_name(&self) -> Option<&str> { None }

    fn track_metadata(&self) -> Option<Self::MetaType<'_>> { None }
}
