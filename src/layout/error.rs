use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("entity `{entity}` belongs to unknown region `{region}`")]
    UnknownRegion { entity: String, region: String },
    #[error("entity id `{0}` appears more than once")]
    DuplicateEntity(String),
}
