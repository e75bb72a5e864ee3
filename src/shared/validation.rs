use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating submission draft identifiers
    /// Draft ids become file names, so only a conservative alphabet is allowed
    /// - Valid: "draft-1", "a1b2c3", "user_42_draft"
    /// - Invalid: "", "../etc", "draft.json", "has space"
    pub static ref DRAFT_ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_-]{1,64}$").unwrap();
}
