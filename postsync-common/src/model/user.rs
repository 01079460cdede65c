/// Marker for ids that reference the owner of a post.
///
/// Owners are opaque to this service: there is no users table, the id is
/// whatever the client or the external feed supplied.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct UserMarker;
