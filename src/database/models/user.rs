/// Row in the `"SecondUsers"` table.
///
/// Rows are only ever inserted; duplicate names are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub age: i32,
}
