use super::Matches;

/// One step of a relationship: rows of `from` joined to rows of `to`
/// where each field of `from` equals its paired field of `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub from: String,
    pub to: String,
    pub on: Matches,
}
