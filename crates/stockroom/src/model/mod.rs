//! Pure data structures (DTOs) managed by the resource actors.
//!
//! [`Product`] and [`Order`] implement [`ActorEntity`](actor_framework::ActorEntity) in
//! [`crate::product_actor`] and [`crate::order_actor`]; [`Metric`] is appended to by the
//! [`MetricRecorder`](crate::analytics::MetricRecorder).

pub mod metric;
pub mod order;
pub mod product;

pub use metric::*;
pub use order::*;
pub use product::*;
