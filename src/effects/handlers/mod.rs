// Effect handler implementations
//
// Concrete handlers for different execution environments:
//
// - mock: deterministic, in-memory answers for testing
// - live: real file system, console and tracing output (sync and async)

pub mod live;
pub mod mock;

pub use live::{AsyncLiveHandler, LiveHandler};
pub use mock::MockHandler;
