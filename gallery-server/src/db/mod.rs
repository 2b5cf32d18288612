//! Database access — one module per table, runtime-bound queries

pub mod admins;
pub mod artworks;
pub mod contacts;
pub mod exhibitions;
pub mod users;

/// Frontend convention: artwork and exhibition record ids cross the wire
/// as strings, not numbers.
pub(crate) fn id_as_string<S>(id: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(id)
}
