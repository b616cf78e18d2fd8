// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CheckIn, ConnectionRecord, ConnectionStatus, Direction, DirectionalConnection, FeatureTag,
    Preferences, PublicUser, ScoredShelter, ServiceTag, Shelter, UserSummary,
};
pub use requests::{
    AddBookmarkRequest, CheckInRequest, CreateConnectionRequest, RankSheltersRequest,
    RespondConnectionRequest, UpdateUserRequest,
};
pub use responses::{CheckInResponse, ErrorResponse, HealthResponse, RankSheltersResponse};
