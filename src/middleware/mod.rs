pub mod route_gate;

pub use route_gate::{classify, route_gate, AuthUser, RouteClass};
