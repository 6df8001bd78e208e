use crate::model::FloorIndex;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither side of a portal could be matched against the route.
    #[error("Cannot resolve transition {portal} onto floor {floor}")]
    TransitionResolution { portal: usize, floor: FloorIndex },

    /// The route has no steps: origin equals destination, or no path exists.
    #[error("No route from '{start}' to '{destination}'")]
    EmptyRoute { start: String, destination: String },

    /// A start or destination point is not a door on any floor.
    #[error("Unknown route anchor '{id}'")]
    MissingAnchor { id: String },

    #[error("Unknown path segment {segment} on floor {floor}")]
    UnknownSegment { floor: FloorIndex, segment: usize },

    /// A segment touches neither end of the point the route reached.
    #[error("Path segment {segment} on floor {floor} does not connect to the route")]
    DisconnectedSegment { floor: FloorIndex, segment: usize },

    #[error("Unknown portal {portal}")]
    UnknownPortal { portal: usize },

    #[error("Unknown floor '{floor}'")]
    UnknownFloor { floor: String },

    #[error("A wayfinding widget needs at least one floor")]
    NoFloors,

    /// No destination was given and no endpoint is configured.
    #[error("No destination to route to")]
    NoDestination,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
