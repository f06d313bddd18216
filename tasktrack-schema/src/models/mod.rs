/// Row types for the TaskTrack tables
///
/// These are thin row-level helpers: enough to write and read back rows so
/// the constraints declared in `schema` can be exercised. Every operation
/// returns [`SchemaError`](crate::error::SchemaError), so a rejected write
/// arrives classified (`UniqueViolation`, `ForeignKeyViolation`, ...).
///
/// # Models
///
/// - `user`: Accounts (`users`)
/// - `task`: Tasks owned by a user (`tasks`)
/// - `comment`: Comments on a task (`comments`)

pub mod comment;
pub mod task;
pub mod user;
